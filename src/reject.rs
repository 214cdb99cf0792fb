use crate::http::{header, Body, Response, ResponseBuilder, StatusCode};

use std::convert::Infallible;
use std::fmt::{self, Debug, Display};

/// An error capable rejecting a request with an HTTP error response.
pub trait Reject: Debug + Display + Send + Sync {
    /// Reject the request with an HTTP error response.
    fn reject(self) -> Response;
}

impl Reject for StatusCode {
    fn reject(self) -> Response {
        error_response(self, &self.canonical_reason().unwrap_or_default())
    }
}

impl Reject for Infallible {
    fn reject(self) -> Response {
        match self {}
    }
}

/// A dynamically typed rejection.
pub struct Rejection {
    inner: Box<dyn BoxedReject>,
}

impl Rejection {
    /// Create a new `Rejection`.
    pub fn new<E>(err: E) -> Self
    where
        E: IntoRejection,
    {
        err.into_rejection()
    }

    /// Convert this error into an HTTP response.
    ///
    /// This method is analogous to [`Reject::reject`],
    /// which cannot be implemented directly due to
    /// coherence rules.
    pub fn reject(self) -> Response {
        self.inner.reject_boxed()
    }
}

trait BoxedReject: Reject {
    fn reject_boxed(self: Box<Self>) -> Response;
}

impl<T: Reject> BoxedReject for T {
    fn reject_boxed(self: Box<Self>) -> Response {
        Reject::reject(*self)
    }
}

impl fmt::Debug for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<E> From<E> for Rejection
where
    E: Reject + 'static,
{
    fn from(err: E) -> Self {
        Self {
            inner: Box::new(err),
        }
    }
}

/// A type that can be converted into a [`Rejection`].
///
/// This trait allows [`Rejection`] and [`Response`]
/// to be used as rejections while not implementing
/// [`Reject`] directly. You shouldn't have to
/// worry about this trait, but it may show up
/// in error messages when [`Reject`] is not
/// implemented.
pub trait IntoRejection {
    /// Perform the conversion.
    fn into_rejection(self) -> Rejection;
}

impl<E> IntoRejection for E
where
    E: Reject + 'static,
{
    fn into_rejection(self) -> Rejection {
        self.into()
    }
}

impl IntoRejection for Rejection {
    fn into_rejection(self) -> Rejection {
        self
    }
}

impl IntoRejection for Response {
    fn into_rejection(self) -> Rejection {
        struct Impl(Response);

        impl fmt::Debug for Impl {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}", self.0)
            }
        }

        impl fmt::Display for Impl {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "status {}", self.0.status())
            }
        }

        impl Reject for Impl {
            fn reject(self) -> Response {
                self.0
            }
        }

        Impl(self).into()
    }
}

/// Build an error response whose body carries `message`.
///
/// Transports use this to reject requests the same way the resolver does.
/// With the `json` feature the body is `{"error":{"code":..,"message":..}}`,
/// otherwise it is the plain text message.
pub fn error_response(status: StatusCode, message: &dyn Display) -> Response {
    let builder = ResponseBuilder::new().status(status);

    #[cfg(feature = "json")]
    let response = {
        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": message.to_string(),
            }
        });

        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::once(body.to_string()))
    };

    #[cfg(not(feature = "json"))]
    let response = builder
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::once(message.to_string()));

    response.unwrap_or_else(|_| {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = status;
        response
    })
}
