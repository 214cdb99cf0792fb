use reqparam::extract::{Multipart, ResolverConfig, UploadedFile};
use reqparam::http::{header, Body, Method, RequestBuilder, StatusCode};
use reqparam::{App, Params, Request, Response};

#[derive(Params)]
struct SayHiV1 {
    name: Option<String>,
}

async fn say_hi_v1(cx: SayHiV1) -> (StatusCode, String) {
    match cx.name {
        Some(name) if !name.trim().is_empty() => (StatusCode::OK, format!("hello,{}", name)),
        _ => (StatusCode::BAD_REQUEST, "name must not be empty".to_owned()),
    }
}

#[derive(Params)]
struct SayHiV2 {
    #[param(not_empty)]
    name: String,
}

async fn say_hi_v2(cx: SayHiV2) -> String {
    format!("hello,{}", cx.name)
}

#[derive(Params)]
struct Upload {
    #[param(not_empty, tip = " is required")]
    title: String,
    avatar: UploadedFile,
}

async fn upload(cx: Upload) -> String {
    format!("{}:{}", cx.title, cx.avatar.bytes().len())
}

fn app() -> App {
    App::new()
        .get("/hello/sayHiv1", say_hi_v1)
        .get("/hello/sayHiv2", say_hi_v2)
        .post("/hello/sayHiv2", say_hi_v2)
        .post("/upload", upload)
}

fn get(uri: &str) -> Request {
    RequestBuilder::new().uri(uri).body(Body::empty()).unwrap()
}

async fn text(response: Response) -> String {
    let bytes = response.into_body().bytes(usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn say_hi() {
    let app = app();

    for uri in ["/hello/sayHiv1?name=alice", "/hello/sayHiv2?name=alice"] {
        let response = app.serve(get(uri)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, "hello,alice");
    }

    let response = app.serve(get("/hello/sayHiv1")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await, "name must not be empty");
}

#[tokio::test]
async fn say_hi_rejected() {
    let app = app();

    for uri in ["/hello/sayHiv2", "/hello/sayHiv2?name=", "/hello/sayHiv2?name=%20%20"] {
        let response = app.serve(get(uri)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body: serde_json::Value = serde_json::from_str(&text(response).await).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": { "code": 400, "message": "name must not be empty" } })
        );
    }
}

#[tokio::test]
async fn form_body() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .uri("/hello/sayHiv2")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::once("name=bob"))
        .unwrap();

    let response = app().serve(req).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(response).await, "hello,bob");
}

#[tokio::test]
async fn form_limit() {
    let app = App::with_config(ResolverConfig::new().form_limit(4))
        .post("/hello/sayHiv2", say_hi_v2);

    let req = RequestBuilder::new()
        .method(Method::POST)
        .uri("/hello/sayHiv2")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::once("name=bob"))
        .unwrap();

    let response = app.serve(req).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn multipart() {
    let app = app();

    let req = RequestBuilder::new()
        .method(Method::POST)
        .uri("/upload?title=me")
        .body(Body::empty())
        .unwrap();
    let response = app.serve(req).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(text(response)
        .await
        .contains("The current request is not a multipart request"));

    let multipart_request = || {
        RequestBuilder::new()
            .method(Method::POST)
            .uri("/upload")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=X")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.serve(multipart_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(text(response).await.contains("title is required"));

    let mut req = multipart_request();
    req.extensions_mut().insert(Multipart::new().field("title", "me"));
    let response = app.serve(req).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(text(response)
        .await
        .contains("Required UploadedFile parameter 'avatar' is not present"));

    let mut req = multipart_request();
    req.extensions_mut().insert(
        Multipart::new()
            .field("title", "me")
            .file(UploadedFile::new("avatar", "png").with_file_name("me.png")),
    );
    let response = app.serve(req).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(response).await, "me:3");
}

#[tokio::test]
async fn routing() {
    let app = app();

    let response = app.serve(get("/missing")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let req = RequestBuilder::new()
        .method(Method::PUT)
        .uri("/hello/sayHiv2")
        .body(Body::empty())
        .unwrap();
    let response = app.serve(req).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.headers().get(header::ALLOW).unwrap(),
        "GET, POST, OPTIONS"
    );

}

#[tokio::test]
async fn trailing_slash_redirect_keeps_query() {
    let app = app();

    let response = app.serve(get("/hello/sayHiv2/?name=alice")).await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);

    let location = response.headers().get(header::LOCATION).unwrap();
    assert_eq!(location, "/hello/sayHiv2?name=alice");

    let response = app.serve(get(location.to_str().unwrap())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(response).await, "hello,alice");

    let response = app.serve(get("/hello/sayHiv2/")).await;
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/hello/sayHiv2"
    );
}

#[derive(Params)]
struct Lookup {
    id: u32,
}

async fn lookup(cx: Lookup) -> Result<(StatusCode, &'static str), StatusCode> {
    match cx.id {
        1 => Ok((StatusCode::CREATED, "found")),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

#[tokio::test]
async fn result_responses() {
    let app = App::new().get("/lookup", lookup);

    let response = app.serve(get("/lookup?id=1")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(text(response).await, "found");

    let response = app.serve(get("/lookup?id=2")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
