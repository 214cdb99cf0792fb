use crate::handler::{self, FromRequest, Handler};
use crate::http::{header, Body, Method, Request, Response, ResponseBuilder, StatusCode};

use std::collections::HashMap;

use matchit::MatchError;

pub(crate) struct Router {
    routes: HashMap<Method, matchit::Router<handler::Erased>>,
}

impl Router {
    pub(crate) fn new() -> Self {
        Self {
            routes: HashMap::with_capacity(6),
        }
    }

    pub(crate) fn route<H, C>(
        &mut self,
        method: Method,
        path: impl Into<String>,
        handler: H,
    ) -> Result<(), matchit::InsertError>
    where
        H: Handler<C>,
        C: FromRequest,
    {
        self.routes
            .entry(method)
            .or_insert_with(matchit::Router::new)
            .insert(path, handler::erase(handler))
    }

    fn allowed_methods(&self, path: &str) -> Vec<&str> {
        let mut allowed = self
            .routes
            .iter()
            .filter(|(method, _)| **method != Method::OPTIONS)
            .filter(|(_, node)| node.at(path).is_ok())
            .map(|(method, _)| method.as_str())
            .collect::<Vec<_>>();

        if !allowed.is_empty() {
            allowed.sort_unstable();
            allowed.push(Method::OPTIONS.as_str())
        }

        allowed
    }

    pub(crate) async fn serve(&self, req: Request) -> Response {
        let path = req.uri().path().to_owned();

        let node = match self.routes.get(req.method()) {
            Some(node) => node,
            None => return self.method_not_allowed(&path),
        };

        match node.at(&path) {
            Ok(matched) => {
                let handler = matched.value;
                match handler(req).await {
                    Ok(response) => response,
                    Err(rejection) => {
                        tracing::warn!(%path, %rejection, "request rejected");
                        rejection.reject()
                    }
                }
            }
            Err(MatchError::ExtraTrailingSlash | MatchError::MissingTrailingSlash)
                if req.method() != Method::CONNECT && path != "/" => {
                let mut location = if path.len() > 1 && path.ends_with('/') {
                    path[..path.len() - 1].to_owned()
                } else {
                    format!("{}/", path)
                };

                // parameters must survive the redirect
                if let Some(query) = req.uri().query() {
                    location.push('?');
                    location.push_str(query);
                }

                respond_with(
                    ResponseBuilder::new()
                        .header(header::LOCATION, location)
                        .status(StatusCode::PERMANENT_REDIRECT),
                )
            }
            Err(_) => self.method_not_allowed(&path),
        }
    }

    fn method_not_allowed(&self, path: &str) -> Response {
        let allowed = self.allowed_methods(path);

        if allowed.is_empty() {
            respond_with(ResponseBuilder::new().status(StatusCode::NOT_FOUND))
        } else {
            respond_with(
                ResponseBuilder::new()
                    .header(header::ALLOW, allowed.join(", "))
                    .status(StatusCode::METHOD_NOT_ALLOWED),
            )
        }
    }
}

fn respond_with(builder: ResponseBuilder) -> Response {
    builder.body(Body::empty()).unwrap_or_else(|err| {
        tracing::error!(%err, "failed to build response");
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response
    })
}
