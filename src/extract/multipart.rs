use bytes::Bytes;

use std::borrow::Cow;

/// A file uploaded as part of a multipart request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

impl UploadedFile {
    /// Create a file uploaded under the form field `name`.
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Set the original file name sent by the client.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the content type sent by the client.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The form field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original file name, if the client sent one.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The content type, if the client sent one.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The file contents.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns `true` if the file has no contents.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A raw part of a multipart request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    name: String,
    headers: Vec<(String, String)>,
    bytes: Bytes,
}

impl Part {
    /// Create a part named `name`.
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            headers: Vec::new(),
            bytes: bytes.into(),
        }
    }

    /// Add a part header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The part name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The part headers in the order they were sent.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `filename` parameter of the part's `Content-Disposition`.
    pub fn file_name(&self) -> Option<Cow<'_, str>> {
        disposition_param(self.header("content-disposition")?, "filename")
    }

    /// The part contents.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

/// A parsed multipart request.
///
/// Transports insert this type into the request extensions after parsing a
/// `multipart/*` body. The [`Resolver`](super::Resolver) reads files and parts
/// from it, and treats its text fields like form values.
#[derive(Clone, Debug, Default)]
pub struct Multipart {
    fields: Vec<(String, String)>,
    files: Vec<UploadedFile>,
    parts: Vec<Part>,
}

impl Multipart {
    /// Create an empty multipart snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        self.parts.push(Part::new(name.clone(), value.clone()));
        self.fields.push((name, value));
        self
    }

    /// Add an uploaded file.
    pub fn file(mut self, file: UploadedFile) -> Self {
        let mut disposition = format!("form-data; name={}", quote(file.name()));
        if let Some(file_name) = file.file_name() {
            disposition.push_str("; filename=");
            disposition.push_str(&quote(file_name));
        }

        let mut part =
            Part::new(file.name(), file.bytes().clone()).with_header("Content-Disposition", disposition);
        if let Some(content_type) = file.content_type() {
            part = part.with_header("Content-Type", content_type);
        }

        self.parts.push(part);
        self.files.push(file);
        self
    }

    /// Returns the first file uploaded under `name`.
    pub fn get_file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|file| file.name() == name)
    }

    /// Returns every file uploaded under `name`, in request order.
    pub fn get_files(&self, name: &str) -> Vec<&UploadedFile> {
        self.files.iter().filter(|file| file.name() == name).collect()
    }

    /// Returns the first part named `name`.
    pub fn get_part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.name() == name)
    }

    /// Every part of the request, in request order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// The text fields of the request, in request order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

fn disposition_param<'a>(disposition: &'a str, key: &str) -> Option<Cow<'a, str>> {
    let mut rest = disposition;

    loop {
        let (param, tail) = split_param(rest);

        if let Some((name, value)) = param.split_once('=') {
            if name.trim().eq_ignore_ascii_case(key) {
                return Some(unquote(value.trim()));
            }
        }

        rest = tail?;
    }
}

// splits at the first `;` outside a quoted string
fn split_param(input: &str) -> (&str, Option<&str>) {
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => return (&input[..i], Some(&input[i + 1..])),
            _ => {}
        }
    }

    (input, None)
}

fn unquote(value: &str) -> Cow<'_, str> {
    let inner = match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner,
        None => return Cow::Borrowed(value),
    };

    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }

    Cow::Owned(out)
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
