//! Request parameter resolution for async HTTP handlers.
//!
//! Handlers declare the parameters they need, `reqparam` reads them out of
//! the query string, the url-encoded form body or a parsed multipart body,
//! rejects the request when a not-empty parameter is missing or blank, and
//! converts the value into the declared type.
//!
//! ```
//! use reqparam::{App, Params};
//!
//! #[derive(Params)]
//! struct SayHi {
//!     #[param(not_empty, tip = " must not be empty")]
//!     name: String,
//! }
//!
//! async fn say_hi(cx: SayHi) -> String {
//!     format!("hello,{}", cx.name)
//! }
//!
//! let app = App::new().get("/hello/sayHiv2", say_hi);
//! ```

mod app;
mod bounded;
mod reject;
mod respond;
mod router;

pub mod extract;
pub mod handler;
pub mod http;
pub mod uri;

pub use app::App;
pub use async_trait::async_trait;
pub use bounded::{BoxError, BoxFuture};
pub use handler::{FromRequest, Handler};
pub use crate::http::{Request, Response};
pub use reject::{error_response, IntoRejection, Reject, Rejection};
pub use reqparam_codegen::Params;
pub use respond::Respond;
