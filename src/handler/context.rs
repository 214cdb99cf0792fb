use crate::http::Request;
use crate::Rejection;

/// Context about an HTTP request.
///
/// This trait is usually implemented through the `Params` derive macro:
///
/// ```
/// use reqparam::Params;
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
/// ```
#[crate::async_trait]
pub trait FromRequest: Send + Sized + 'static {
    /// Extract this type from the request.
    async fn from_request(req: &mut Request) -> Result<Self, Rejection>;
}

#[crate::async_trait]
impl FromRequest for () {
    async fn from_request(_: &mut Request) -> Result<Self, Rejection> {
        Ok(())
    }
}

#[crate::async_trait]
impl FromRequest for Request {
    async fn from_request(req: &mut Request) -> Result<Self, Rejection> {
        Ok(std::mem::take(req))
    }
}
