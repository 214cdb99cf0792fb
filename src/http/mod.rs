//! HTTP types shared by the resolver, the router and transports.

mod body;
mod ext;

pub use body::{Body, BytesRejection};
pub use ext::RequestExt;
pub(crate) use ext::is_multipart;

pub use bytes::Bytes;
pub use http::{header, Extensions, HeaderValue, Method, StatusCode, Uri};

/// An HTTP request.
pub type Request = http::Request<Body>;

/// An HTTP response.
pub type Response = http::Response<Body>;

/// A builder for [`Response`]s.
pub type ResponseBuilder = http::response::Builder;

/// A builder for [`Request`]s.
pub type RequestBuilder = http::request::Builder;
