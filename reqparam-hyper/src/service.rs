use crate::multipart;

use std::convert::Infallible;
use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use hyper::service::Service;
use reqparam::http::{header, Body, RequestExt};
use reqparam::{App, Reject, Request, Response};

/// Creates an [`AppService`] for every connection.
pub struct AppMakeService {
    service: AppService,
}

impl AppMakeService {
    pub(crate) fn new(service: AppService) -> Self {
        Self { service }
    }

    /// Set the maximum size of a multipart body, in bytes.
    pub fn multipart_limit(mut self, limit: u64) -> Self {
        self.service = self.service.multipart_limit(limit);
        self
    }
}

impl<T> Service<T> for AppMakeService {
    type Response = AppService;
    type Error = Infallible;
    type Future = Ready<Result<AppService, Infallible>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _: T) -> Self::Future {
        ready(Ok(self.service.clone()))
    }
}

/// Serves hyper requests with an [`App`].
#[derive(Clone)]
pub struct AppService {
    app: Arc<App>,
    multipart_limit: u64,
}

impl AppService {
    pub(crate) fn new(app: App) -> Self {
        Self {
            app: Arc::new(app),
            multipart_limit: multipart::DEFAULT_LIMIT,
        }
    }

    /// Set the maximum size of a multipart body, in bytes.
    ///
    /// Larger bodies are rejected with `413 Payload Too Large`.
    /// Defaults to [`multipart::DEFAULT_LIMIT`].
    pub fn multipart_limit(mut self, limit: u64) -> Self {
        self.multipart_limit = limit;
        self
    }

    async fn serve(self, req: hyper::Request<hyper::Body>) -> Response {
        let (parts, body) = req.into_parts();
        let mut req = Request::from_parts(parts, Body::empty());

        if !req.is_multipart() {
            *req.body_mut() = Body::stream(body);
            return self.app.serve(req).await;
        }

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        let parsed = multipart::read(body, &content_type, self.multipart_limit).await;
        match parsed {
            Ok(parsed) => {
                req.extensions_mut().insert(parsed);
                self.app.serve(req).await
            }
            Err(rejection) => {
                tracing::warn!(uri = %req.uri(), %rejection, "request rejected");
                rejection.reject()
            }
        }
    }
}

impl Service<hyper::Request<hyper::Body>> for AppService {
    type Response = hyper::Response<hyper::Body>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: hyper::Request<hyper::Body>) -> Self::Future {
        let service = self.clone();

        Box::pin(async move {
            let (parts, body) = service.serve(req).await.into_parts();
            Ok(hyper::Response::from_parts(parts, into_hyper(body)))
        })
    }
}

fn into_hyper(body: Body) -> hyper::Body {
    match body.size_hint() {
        (0, Some(0)) => hyper::Body::empty(),
        _ => hyper::Body::wrap_stream(body),
    }
}
