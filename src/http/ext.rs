use crate::extract::Resolver;
use crate::http::{header, Request};

use std::sync::Arc;

/// Extension methods for [`Request`].
pub trait RequestExt {
    /// Returns the parsed `Content-Type` of the request, if any.
    fn content_type(&self) -> Option<mime::Mime>;

    /// Returns `true` if the request carries a `multipart/*` body.
    fn is_multipart(&self) -> bool;

    /// Returns the resolver injected by [`App`](crate::App), or a
    /// resolver with the default configuration.
    fn resolver(&self) -> Arc<Resolver>;
}

impl RequestExt for Request {
    fn content_type(&self) -> Option<mime::Mime> {
        self.headers()
            .get(header::CONTENT_TYPE)?
            .to_str()
            .ok()?
            .parse::<mime::Mime>()
            .ok()
    }

    fn is_multipart(&self) -> bool {
        is_multipart(
            self.headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        )
    }

    fn resolver(&self) -> Arc<Resolver> {
        self.extensions()
            .get::<Arc<Resolver>>()
            .cloned()
            .unwrap_or_default()
    }
}

pub(crate) fn is_multipart(content_type: Option<&str>) -> bool {
    match content_type {
        Some(content_type) => content_type
            .get(..10)
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case("multipart/")),
        None => false,
    }
}
