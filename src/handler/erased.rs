use crate::bounded::{BoxFuture, Send, Sync};
use crate::handler::{FromRequest, Handler};
use crate::http::{Request, Response};
use crate::{Rejection, Respond};

use std::sync::Arc;

/// A type-erased [`Handler`] together with its context extraction.
pub(crate) type Erased =
    Box<dyn Fn(Request) -> BoxFuture<'static, Result<Response, Rejection>> + Send + Sync>;

pub(crate) fn erase<H, C>(handler: H) -> Erased
where
    H: Handler<C>,
    C: FromRequest,
{
    let handler = Arc::new(handler);

    Box::new(move |mut req: Request| {
        let handler = handler.clone();

        Box::pin(async move {
            let cx = C::from_request(&mut req).await?;
            handler.call(cx).await.respond().map_err(Rejection::new)
        })
    })
}
