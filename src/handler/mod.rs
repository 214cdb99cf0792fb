//! Asynchronous functions that can handle HTTP requests.

mod context;
mod erased;

pub use context::FromRequest;
pub(crate) use erased::{erase, Erased};

use crate::bounded::{BoxFuture, Send, Sync};
use crate::Respond;

use std::future::Future;

/// An asynchronous HTTP handler.
///
/// You should not need to interact this trait directly, it is automatically
/// implemented for async functions taking a single [`FromRequest`] argument.
pub trait Handler<C>: Send + Sync + 'static {
    /// The handler's response.
    type Response: Respond;

    /// Call the handler with some context about the request.
    fn call(&self, cx: C) -> BoxFuture<'static, Self::Response>;
}

impl<F, C, O, R> Handler<C> for F
where
    F: Fn(C) -> O + Send + Sync + 'static,
    O: Future<Output = R> + Send + 'static,
    R: Respond,
    C: FromRequest,
{
    type Response = R;

    fn call(&self, cx: C) -> BoxFuture<'static, R> {
        Box::pin(self(cx))
    }
}
