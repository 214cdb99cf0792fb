//! Contributing resolved parameters back into URIs.
//!
//! This is the write path of parameter resolution: given the value a
//! handler parameter holds, append it to the query string of a link that
//! would resolve to the same value.

use crate::extract::{ParamDescriptor, ParamKind, Part, Resolved, UploadedFile};
use crate::http::Uri;

use std::fmt::{self, Display};
use std::net::*;
use std::num::*;

/// Builds a URI from a path and ordered query parameters.
///
/// ```
/// use reqparam::uri::UriBuilder;
///
/// let uri = UriBuilder::new("/hello/sayHiv2")
///     .query_param("name", Some("alice".to_owned()))
///     .build()
///     .unwrap();
///
/// assert_eq!(uri, "/hello/sayHiv2?name=alice");
/// ```
#[derive(Clone, Debug, Default)]
pub struct UriBuilder {
    path: String,
    query: Vec<(String, Option<String>)>,
}

impl UriBuilder {
    /// Start from a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Start from an existing URI, keeping its query parameters.
    pub fn from_uri(uri: &Uri) -> Self {
        let path = match uri.authority() {
            Some(authority) => format!(
                "{}://{}{}",
                uri.scheme_str().unwrap_or("http"),
                authority,
                uri.path()
            ),
            None => uri.path().to_owned(),
        };

        let query = uri
            .query()
            .and_then(|query| serde_urlencoded::from_str::<Vec<(String, String)>>(query).ok())
            .unwrap_or_default()
            .into_iter()
            .map(|(name, value)| (name, Some(value)))
            .collect();

        Self { path, query }
    }

    /// Append a query parameter. A `None` value renders as a bare `name`.
    pub fn query_param(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a query parameter in place.
    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        self.query.push((name.into(), value));
    }

    /// The query parameters added so far.
    pub fn query(&self) -> &[(String, Option<String>)] {
        &self.query
    }

    /// Render the query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(name, value)| match value {
                Some(value) => format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                ),
                None => urlencoding::encode(name).into_owned(),
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Build the URI.
    pub fn build(&self) -> Result<Uri, ::http::uri::InvalidUri> {
        self.to_string().parse()
    }
}

impl fmt::Display for UriBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;

        if !self.query.is_empty() {
            write!(f, "?{}", self.query_string())?;
        }

        Ok(())
    }
}

/// Converts parameter values to their URI representation.
///
/// Returning `None` adds the parameter name without a value.
pub trait FormatValue {
    /// Format a single value.
    fn format(&self, value: &dyn Display) -> Option<String>;
}

/// Formats values with their [`Display`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisplayFormat;

impl FormatValue for DisplayFormat {
    fn format(&self, value: &dyn Display) -> Option<String> {
        Some(value.to_string())
    }
}

impl<F> FormatValue for F
where
    F: Fn(&dyn Display) -> Option<String>,
{
    fn format(&self, value: &dyn Display) -> Option<String> {
        self(value)
    }
}

/// A value that can be contributed to the query string of a URI.
pub trait ContributeUri {
    /// Append this value under `name`.
    fn contribute(&self, name: &str, builder: &mut UriBuilder, format: &dyn FormatValue);
}

macro_rules! contribute_display {
    ($($ty:ty),*) => ($(
        impl ContributeUri for $ty {
            fn contribute(&self, name: &str, builder: &mut UriBuilder, format: &dyn FormatValue) {
                builder.push(name, format.format(self));
            }
        }
    )*)
}

contribute_display! {
    String, &str, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    bool, char, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6, SocketAddr,
    NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize,
    NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize
}

impl<T> ContributeUri for Option<T>
where
    T: ContributeUri,
{
    fn contribute(&self, name: &str, builder: &mut UriBuilder, format: &dyn FormatValue) {
        if let Some(value) = self {
            value.contribute(name, builder, format);
        }
    }
}

impl<T> ContributeUri for Vec<T>
where
    T: ContributeUri,
{
    fn contribute(&self, name: &str, builder: &mut UriBuilder, format: &dyn FormatValue) {
        for value in self {
            value.contribute(name, builder, format);
        }
    }
}

impl ContributeUri for UploadedFile {
    fn contribute(&self, _: &str, _: &mut UriBuilder, _: &dyn FormatValue) {}
}

impl ContributeUri for Part {
    fn contribute(&self, _: &str, _: &mut UriBuilder, _: &dyn FormatValue) {}
}

impl ContributeUri for Resolved {
    fn contribute(&self, name: &str, builder: &mut UriBuilder, format: &dyn FormatValue) {
        match self {
            Resolved::Value(value) => builder.push(name, format.format(value)),
            Resolved::Values(values) => {
                for value in values {
                    builder.push(name, format.format(value));
                }
            }
            Resolved::Absent
            | Resolved::File(_)
            | Resolved::Files(_)
            | Resolved::Part(_)
            | Resolved::Parts(_) => {}
        }
    }
}

/// Append `value` to `builder` as the query parameter declared by `param`.
///
/// File and part parameters are never contributed, absent values are
/// omitted, and collections add one query parameter per element.
pub fn contribute<T>(
    param: &ParamDescriptor,
    value: &T,
    builder: &mut UriBuilder,
    format: &dyn FormatValue,
) where
    T: ContributeUri + ?Sized,
{
    if matches!(param.kind(), ParamKind::File | ParamKind::Part) {
        return;
    }

    value.contribute(param.name(), builder, format);
}
