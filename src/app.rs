use crate::extract::{Resolver, ResolverConfig};
use crate::handler::{FromRequest, Handler};
use crate::http::{Method, Request, Response};
use crate::router::Router;

use std::sync::Arc;

/// An HTTP application: a set of routes sharing one [`Resolver`].
///
/// ```
/// use reqparam::{App, Params};
///
/// #[derive(Params)]
/// struct Hello {
///     #[param(not_empty)]
///     name: String,
/// }
///
/// async fn hello(cx: Hello) -> String {
///     format!("hello,{}", cx.name)
/// }
///
/// let app = App::new().get("/hello", hello);
/// ```
pub struct App {
    router: Router,
    resolver: Arc<Resolver>,
}

impl App {
    /// Create an application with the default [`ResolverConfig`].
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    /// Create an application whose parameters are resolved with `config`.
    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            router: Router::new(),
            resolver: Arc::new(Resolver::new(config)),
        }
    }

    /// The resolver shared by every route.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Insert a route.
    ///
    /// # Panics
    ///
    /// Panics if the path conflicts with an existing route.
    pub fn route<H, C>(mut self, method: Method, path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<C>,
        C: FromRequest,
    {
        let path = path.into();
        if let Err(err) = self.router.route(method.clone(), path.clone(), handler) {
            panic!("failed to insert route {} {}: {}", method, path, err);
        }

        self
    }

    /// Serve a single request.
    pub async fn serve(&self, mut req: Request) -> Response {
        tracing::debug!(method = %req.method(), uri = %req.uri(), "serving request");
        req.extensions_mut().insert(self.resolver.clone());
        self.router.serve(req).await
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! insert_route {
    ($name:ident => Method::$method:ident) => {
        #[doc = concat!("Insert a route for the `", stringify!($method), "` method.")]
        pub fn $name<H, C>(self, path: impl Into<String>, handler: H) -> Self
        where
            H: Handler<C>,
            C: FromRequest,
        {
            self.route(Method::$method, path, handler)
        }
    };
}

impl App {
    insert_route!(get => Method::GET);
    insert_route!(put => Method::PUT);
    insert_route!(post => Method::POST);
    insert_route!(delete => Method::DELETE);
    insert_route!(head => Method::HEAD);
    insert_route!(options => Method::OPTIONS);
    insert_route!(patch => Method::PATCH);
}
