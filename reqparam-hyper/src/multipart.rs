//! Reading `multipart/form-data` bodies.

use reqparam::extract::{Multipart, UploadedFile};
use reqparam::http::StatusCode;
use reqparam::{Reject, Response};

/// The default limit of a multipart body (2mb).
pub const DEFAULT_LIMIT: u64 = 2 * 1024 * 1024;

/// Read a multipart body into a [`Multipart`].
///
/// Fields with a file name become [`UploadedFile`]s, the others text fields.
pub async fn read(
    body: hyper::Body,
    content_type: &str,
    limit: u64,
) -> Result<Multipart, MultipartRejection> {
    let boundary = multer::parse_boundary(content_type)?;
    let constraints =
        multer::Constraints::new().size_limit(multer::SizeLimit::new().whole_stream(limit));
    let mut stream = multer::Multipart::with_constraints(body, boundary, constraints);

    let mut multipart = Multipart::new();

    while let Some(field) = stream.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = field.bytes().await?;

        multipart = match file_name {
            Some(file_name) => {
                let mut file = UploadedFile::new(name, bytes).with_file_name(file_name);
                if let Some(content_type) = content_type {
                    file = file.with_content_type(content_type);
                }

                multipart.file(file)
            }
            None => multipart.field(name, String::from_utf8_lossy(&bytes)),
        };
    }

    tracing::trace!(parts = multipart.parts().len(), "read multipart body");
    Ok(multipart)
}

/// Error returned by [`read`].
///
/// Rejects the request with `413 Payload Too Large` when the body exceeds
/// the limit, and `400 Bad Request` otherwise.
#[derive(Debug, thiserror::Error)]
#[error("failed to read multipart body: {0}")]
pub struct MultipartRejection(#[from] multer::Error);

impl Reject for MultipartRejection {
    fn reject(self) -> Response {
        let status = match self.0 {
            multer::Error::StreamSizeExceeded { .. } | multer::Error::FieldSizeExceeded { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            _ => StatusCode::BAD_REQUEST,
        };

        reqparam::error_response(status, &self)
    }
}
