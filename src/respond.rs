use std::convert::Infallible;

use crate::http::{header, Body, HeaderValue, Response, StatusCode};
use crate::reject::{IntoRejection, Rejection};

/// A handler return value that can be turned into an HTTP response.
///
/// Text is sent as `text/plain`. Wrap it in a tuple to pick the status,
/// or return a `Result` to reject the request with the error.
pub trait Respond {
    /// The error returned if the conversion fails.
    type Rejection: IntoRejection;

    /// Build the response.
    fn respond(self) -> Result<Response, Self::Rejection>;
}

impl Respond for Response {
    type Rejection = Infallible;

    fn respond(self) -> Result<Response, Infallible> {
        Ok(self)
    }
}

impl Respond for String {
    type Rejection = Infallible;

    fn respond(self) -> Result<Response, Infallible> {
        Ok(text(Body::once(self)))
    }
}

impl Respond for &'static str {
    type Rejection = Infallible;

    fn respond(self) -> Result<Response, Infallible> {
        Ok(text(Body::once(self)))
    }
}

impl<T> Respond for (StatusCode, T)
where
    T: Respond,
{
    type Rejection = T::Rejection;

    fn respond(self) -> Result<Response, T::Rejection> {
        let (status, body) = self;
        let mut response = body.respond()?;
        *response.status_mut() = status;
        Ok(response)
    }
}

impl<T, E> Respond for Result<T, E>
where
    T: Respond,
    E: IntoRejection,
{
    type Rejection = Rejection;

    fn respond(self) -> Result<Response, Rejection> {
        match self {
            Ok(ok) => ok.respond().map_err(Rejection::new),
            Err(err) => Err(Rejection::new(err)),
        }
    }
}

fn text(body: Body) -> Response {
    let mut response = Response::new(body);
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
