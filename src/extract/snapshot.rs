use crate::extract::{Multipart, ResolverConfig};
use crate::http::{header, BytesRejection, Request, RequestExt};

use std::sync::Arc;

/// A read-only view of the parameters carried by a request.
///
/// Values are kept in request order: query string first, then the
/// url-encoded form body, then the text fields of a multipart body.
#[derive(Clone, Debug, Default)]
pub struct RequestSnapshot {
    params: Vec<(String, String)>,
    content_type: Option<String>,
    multipart: Option<Multipart>,
}

impl RequestSnapshot {
    /// Capture the snapshot of `req`.
    ///
    /// The url-encoded body is read at most once; the snapshot is cached in
    /// the request extensions and later calls return the cached value.
    pub async fn capture(
        req: &mut Request,
        config: &ResolverConfig,
    ) -> Result<Arc<RequestSnapshot>, BytesRejection> {
        if let Some(snapshot) = req.extensions().get::<Arc<RequestSnapshot>>() {
            return Ok(snapshot.clone());
        }

        let mut params = req
            .uri()
            .query()
            .map(parse_urlencoded)
            .unwrap_or_default();

        if is_url_encoded(req) {
            let limit = config.form_limit;
            let body = req.body_mut().bytes(limit).await?;
            params.extend(parse_urlencoded(&String::from_utf8_lossy(&body)));
        }

        let multipart = req.extensions().get::<Multipart>().cloned();
        if let Some(multipart) = &multipart {
            params.extend(multipart.fields().iter().cloned());
        }

        let snapshot = Arc::new(RequestSnapshot {
            params,
            content_type: req
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
            multipart,
        });

        tracing::trace!(params = snapshot.params.len(), "captured request snapshot");
        req.extensions_mut().insert(snapshot.clone());
        Ok(snapshot)
    }

    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a form or query value.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Set the request content type.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Attach a parsed multipart body.
    pub fn multipart(mut self, multipart: Multipart) -> Self {
        self.params.extend(multipart.fields().iter().cloned());
        self.multipart = Some(multipart);
        self
    }

    /// Returns every value of the parameter `name`, in request order.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// All parameters in request order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Returns `true` if the request declared a `multipart/*` content type.
    pub fn is_multipart(&self) -> bool {
        crate::http::is_multipart(self.content_type.as_deref())
    }

    /// The parsed multipart body, if the transport provided one.
    pub fn get_multipart(&self) -> Option<&Multipart> {
        self.multipart.as_ref()
    }
}

fn parse_urlencoded(input: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(input).unwrap_or_else(|err| {
        tracing::debug!(%err, "ignoring malformed url-encoded parameters");
        Vec::new()
    })
}

fn is_url_encoded(req: &Request) -> bool {
    match req.content_type() {
        Some(mime) => {
            mime.type_() == mime::APPLICATION && mime.subtype() == mime::WWW_FORM_URLENCODED
        }
        None => false,
    }
}
