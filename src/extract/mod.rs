//! Resolution of request parameters into handler arguments.
//!
//! A handler declares each parameter it needs with a [`ParamDescriptor`],
//! usually through `#[derive(Params)]`. The [`Resolver`] reads the value out
//! of a [`RequestSnapshot`], enforces the not-empty marker and converts the
//! result into the declared type through [`FromParam`].

mod config;
mod descriptor;
mod from_param;
mod multipart;
mod rejection;
mod resolve;
mod snapshot;

pub use config::ResolverConfig;
pub use descriptor::{ParamDescriptor, ParamKind, DEFAULT_TIP};
pub use from_param::{ConvertError, FromParam, FromValue, Resolved};
pub use multipart::{Multipart, Part, UploadedFile};
pub use rejection::ResolveRejection;
pub use resolve::Resolver;
pub use snapshot::RequestSnapshot;
