use reqparam::extract::{
    Multipart, ParamDescriptor, ParamKind, Part, RequestSnapshot, ResolveRejection, Resolved,
    Resolver, ResolverConfig, UploadedFile, DEFAULT_TIP,
};
use reqparam::http::StatusCode;

fn multipart(parts: Multipart) -> RequestSnapshot {
    RequestSnapshot::new()
        .content_type("multipart/form-data; boundary=X")
        .multipart(parts)
}

#[test]
fn not_empty_present() {
    let snapshot = RequestSnapshot::new().param("name", "alice");
    let param = ParamDescriptor::of::<String>("name").not_empty();

    let name: String = Resolver::default().resolve(&snapshot, &param).unwrap();
    assert_eq!(name, "alice");
}

#[test]
fn not_empty_missing() {
    let param = ParamDescriptor::of::<String>("name").not_empty();
    let err = Resolver::default()
        .resolve::<String>(&RequestSnapshot::new(), &param)
        .unwrap_err();

    assert!(matches!(err, ResolveRejection::Validation { .. }));
    assert_eq!(err.to_string(), format!("name{}", DEFAULT_TIP));
    assert_eq!(err.name(), "name");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn not_empty_blank() {
    let resolver = Resolver::default();
    let param = ParamDescriptor::of::<String>("name").not_empty();

    for value in ["", "   "] {
        let snapshot = RequestSnapshot::new().param("name", value);
        let err = resolver.resolve::<String>(&snapshot, &param).unwrap_err();
        assert!(matches!(err, ResolveRejection::Validation { .. }));
    }
}

#[test]
fn not_empty_tips() {
    let snapshot = RequestSnapshot::new();

    let param = ParamDescriptor::of::<String>("name").tip(" is required");
    assert!(param.is_not_empty());
    let err = Resolver::default()
        .resolve::<String>(&snapshot, &param)
        .unwrap_err();
    assert_eq!(err.to_string(), "name is required");

    let resolver = Resolver::new(ResolverConfig::new().default_tip(" cannot be blank"));
    let param = ParamDescriptor::of::<String>("nick").named("n").not_empty();
    let err = resolver.resolve::<String>(&snapshot, &param).unwrap_err();
    assert_eq!(err.to_string(), "n cannot be blank");
}

#[test]
fn not_required_absent() {
    let resolver = Resolver::default();
    let snapshot = RequestSnapshot::new();

    let param = ParamDescriptor::of::<Option<String>>("name");
    assert!(!param.is_required());
    assert_eq!(resolver.resolve_value(&snapshot, &param).unwrap(), Resolved::Absent);
    assert_eq!(resolver.resolve::<Option<String>>(&snapshot, &param).unwrap(), None);

    let param = ParamDescriptor::of::<Resolved>("name").required(false);
    assert_eq!(resolver.resolve::<Resolved>(&snapshot, &param).unwrap(), Resolved::Absent);
}

#[test]
fn required_absent() {
    let param = ParamDescriptor::of::<u32>("page");
    let err = Resolver::default()
        .resolve::<u32>(&RequestSnapshot::new(), &param)
        .unwrap_err();

    assert!(matches!(err, ResolveRejection::MissingValue { .. }));
    assert_eq!(err.to_string(), "Required u32 parameter 'page' is not present");
}

#[test]
fn multiple_values() {
    let snapshot = RequestSnapshot::new()
        .param("tag", "b")
        .param("other", "x")
        .param("tag", "a")
        .param("tag", "c");
    let resolver = Resolver::default();
    let param = ParamDescriptor::of::<Vec<String>>("tag");

    assert_eq!(
        resolver.resolve_name(&snapshot, &param).unwrap(),
        Resolved::Values(vec!["b".into(), "a".into(), "c".into()])
    );

    let tags: Vec<String> = resolver.resolve(&snapshot, &param).unwrap();
    assert_eq!(tags, ["b", "a", "c"]);

    let joined: String = resolver
        .resolve(&snapshot, &ParamDescriptor::of::<String>("tag"))
        .unwrap();
    assert_eq!(joined, "b,a,c");

    let single: Vec<String> = resolver
        .resolve(&snapshot, &ParamDescriptor::of::<Vec<String>>("other"))
        .unwrap();
    assert_eq!(single, ["x"]);
}

#[test]
fn defaults() {
    let resolver = Resolver::default();
    let param = ParamDescriptor::of::<u32>("page").default_value("1");

    let page: u32 = resolver.resolve(&RequestSnapshot::new(), &param).unwrap();
    assert_eq!(page, 1);

    let page: u32 = resolver
        .resolve(&RequestSnapshot::new().param("page", ""), &param)
        .unwrap();
    assert_eq!(page, 1);

    let page: u32 = resolver
        .resolve(&RequestSnapshot::new().param("page", "7"), &param)
        .unwrap();
    assert_eq!(page, 7);
}

#[test]
fn conversion() {
    let snapshot = RequestSnapshot::new().param("page", "seven");
    let err = Resolver::default()
        .resolve::<u32>(&snapshot, &ParamDescriptor::of::<u32>("page"))
        .unwrap_err();

    assert!(matches!(err, ResolveRejection::Conversion { .. }));
    assert!(err.to_string().starts_with("Failed to convert parameter 'page' to u32"));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn file_not_multipart() {
    let snapshot = RequestSnapshot::new()
        .content_type("application/x-www-form-urlencoded")
        .param("avatar", "not a file")
        .param("name", "alice");

    for param in [
        ParamDescriptor::of::<UploadedFile>("avatar"),
        ParamDescriptor::of::<Vec<UploadedFile>>("avatar"),
        ParamDescriptor::of::<Part>("avatar"),
        ParamDescriptor::of::<Vec<Part>>("avatar"),
        ParamDescriptor::of::<Option<UploadedFile>>("avatar"),
    ] {
        let err = Resolver::default()
            .resolve_value(&snapshot, &param)
            .unwrap_err();
        assert!(matches!(err, ResolveRejection::InvalidRequest { .. }));
        assert_eq!(err.to_string(), "The current request is not a multipart request");
    }
}

#[test]
fn multipart_unavailable() {
    let snapshot = RequestSnapshot::new().content_type("Multipart/Form-Data; boundary=X");
    assert!(snapshot.is_multipart());

    let err = Resolver::default()
        .resolve::<UploadedFile>(&snapshot, &ParamDescriptor::of::<UploadedFile>("avatar"))
        .unwrap_err();

    assert!(matches!(err, ResolveRejection::MultipartUnavailable { .. }));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn files() {
    let snapshot = multipart(
        Multipart::new()
            .field("name", "alice")
            .file(UploadedFile::new("doc", "one").with_file_name("one.txt"))
            .file(UploadedFile::new("doc", "two").with_file_name("two.txt"))
            .file(UploadedFile::new("avatar", "png").with_content_type("image/png")),
    );
    let resolver = Resolver::default();

    let avatar: UploadedFile = resolver
        .resolve(&snapshot, &ParamDescriptor::of::<UploadedFile>("avatar"))
        .unwrap();
    assert_eq!(avatar.content_type(), Some("image/png"));
    assert_eq!(&avatar.bytes()[..], b"png");

    let docs: Vec<UploadedFile> = resolver
        .resolve(&snapshot, &ParamDescriptor::of::<Vec<UploadedFile>>("doc"))
        .unwrap();
    let names = docs.iter().map(|doc| doc.file_name()).collect::<Vec<_>>();
    assert_eq!(names, [Some("one.txt"), Some("two.txt")]);

    let missing: Option<UploadedFile> = resolver
        .resolve(&snapshot, &ParamDescriptor::of::<Option<UploadedFile>>("missing"))
        .unwrap();
    assert!(missing.is_none());

    let name: String = resolver
        .resolve(&snapshot, &ParamDescriptor::of::<String>("name").not_empty())
        .unwrap();
    assert_eq!(name, "alice");

    // files win over values for scalar declarations
    assert!(matches!(
        resolver.resolve_name(&snapshot, &ParamDescriptor::of::<Resolved>("doc")),
        Ok(Resolved::Files(files)) if files.len() == 2
    ));
    assert!(matches!(
        resolver.resolve_name(&snapshot, &ParamDescriptor::of::<Resolved>("avatar")),
        Ok(Resolved::File(_))
    ));
}

#[test]
fn parts() {
    let snapshot = multipart(
        Multipart::new()
            .field("name", "alice")
            .file(UploadedFile::new("doc", "one").with_file_name("one.txt")),
    );
    let resolver = Resolver::default();

    let part: Part = resolver
        .resolve(&snapshot, &ParamDescriptor::of::<Part>("doc"))
        .unwrap();
    assert_eq!(part.file_name().as_deref(), Some("one.txt"));
    assert!(part.header("CONTENT-DISPOSITION").is_some());

    // every part of the request, whatever the declared name
    let parts: Vec<Part> = resolver
        .resolve(&snapshot, &ParamDescriptor::of::<Vec<Part>>("ignored"))
        .unwrap();
    let names = parts.iter().map(Part::name).collect::<Vec<_>>();
    assert_eq!(names, ["name", "doc"]);
}

#[test]
fn supports() {
    let resolver = Resolver::default();
    let plain = Resolver::new(ResolverConfig::new().use_default_resolution(false));

    let scalar = ParamDescriptor::of::<String>("name");
    assert!(resolver.supports(&scalar));
    assert!(!plain.supports(&scalar));
    assert!(plain.supports(&scalar.clone().not_empty()));

    let file = ParamDescriptor::of::<UploadedFile>("avatar");
    assert_eq!(file.kind(), ParamKind::File);
    assert!(plain.supports(&file));

    let part = ParamDescriptor::of::<String>("body").request_part();
    assert!(!resolver.supports(&part));
    assert!(resolver.supports(&part.clone().not_empty()));

    let err = resolver
        .resolve_value(&RequestSnapshot::new(), &part)
        .unwrap_err();
    assert!(matches!(err, ResolveRejection::Unsupported { .. }));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn descriptor() {
    let param = ParamDescriptor::of::<Vec<String>>("tags").named("");
    assert_eq!(param.name(), "tags");
    assert_eq!(param.field_name(), "tags");
    assert_eq!(param.type_name(), "Vec<String>");
    assert!(param.is_required());

    let param = ParamDescriptor::of::<Option<u32>>("page").named("p").not_empty();
    assert_eq!(param.name(), "p");
    assert!(param.is_required());
    assert_eq!(param.configured_tip(), None);
}

#[test]
fn not_empty_missing_file() {
    let snapshot = multipart(Multipart::new().field("name", "alice"));
    let resolver = Resolver::default();

    for param in [
        ParamDescriptor::of::<UploadedFile>("avatar").not_empty(),
        ParamDescriptor::of::<Vec<UploadedFile>>("avatar").not_empty(),
        ParamDescriptor::of::<Option<UploadedFile>>("avatar").not_empty(),
    ] {
        let err = resolver.resolve_value(&snapshot, &param).unwrap_err();
        assert!(matches!(err, ResolveRejection::Validation { .. }));
        assert_eq!(err.to_string(), "avatar must not be empty");
    }
}

#[test]
fn file_names_with_separators() {
    let multipart = Multipart::new()
        .file(UploadedFile::new("doc", "x").with_file_name(r#"a;b "c".txt"#));

    let part = &multipart.parts()[0];
    assert_eq!(
        part.header("content-disposition"),
        Some(r#"form-data; name="doc"; filename="a;b \"c\".txt""#)
    );
    assert_eq!(part.file_name().as_deref(), Some(r#"a;b "c".txt"#));

    let part = Part::new("f", "x")
        .with_header("Content-Disposition", r#"form-data; name="f"; filename="x;y.txt""#);
    assert_eq!(part.file_name().as_deref(), Some("x;y.txt"));

    let part = Part::new("f", "x").with_header("Content-Disposition", "form-data; filename=plain.txt");
    assert_eq!(part.file_name().as_deref(), Some("plain.txt"));

    let part = Part::new("f", "x").with_header("Content-Disposition", r#"form-data; name="f""#);
    assert_eq!(part.file_name(), None);
}

#[test]
fn config_from_json() {
    let config: ResolverConfig = serde_json::from_str(r#"{ "default_tip": " is required" }"#).unwrap();
    let resolver = Resolver::new(config);

    assert!(resolver.supports(&ParamDescriptor::of::<String>("name")));
    let err = resolver
        .resolve::<String>(
            &RequestSnapshot::new(),
            &ParamDescriptor::of::<String>("name").not_empty(),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "name is required");

    let config: ResolverConfig =
        serde_json::from_str(r#"{ "use_default_resolution": false }"#).unwrap();
    let resolver = Resolver::new(config);

    assert!(!resolver.supports(&ParamDescriptor::of::<String>("name")));
    let err = resolver
        .resolve::<String>(
            &RequestSnapshot::new(),
            &ParamDescriptor::of::<String>("name").not_empty(),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), format!("name{}", DEFAULT_TIP));
}
