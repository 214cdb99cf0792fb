use crate::bounded::BoxError;
use crate::extract::{ParamKind, Part, UploadedFile};

use std::convert::Infallible;
use std::net::*;
use std::num::*;
use std::str::FromStr;

/// A value read out of a request, before conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// No value was found.
    Absent,
    /// A single form or query value.
    Value(String),
    /// Several values sharing one name, in request order.
    Values(Vec<String>),
    /// A single uploaded file.
    File(UploadedFile),
    /// Several uploaded files sharing one name.
    Files(Vec<UploadedFile>),
    /// A single multipart part.
    Part(Part),
    /// Several multipart parts.
    Parts(Vec<Part>),
}

impl Resolved {
    /// Returns `true` for [`Resolved::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }

    fn describe(&self) -> &'static str {
        match self {
            Resolved::Absent => "no value",
            Resolved::Value(_) => "a value",
            Resolved::Values(_) => "multiple values",
            Resolved::File(_) => "a file",
            Resolved::Files(_) => "multiple files",
            Resolved::Part(_) => "a part",
            Resolved::Parts(_) => "multiple parts",
        }
    }
}

/// Errors that can occur in [`FromParam::from_resolved`].
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The value was absent and the type is not optional.
    #[error("value is missing")]
    Missing,
    /// The resolved value has the wrong shape for the type.
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// What the type can be built from.
        expected: &'static str,
        /// What was resolved.
        found: &'static str,
    },
    /// Parsing a string value failed.
    #[error("{0}")]
    Parse(BoxError),
}

impl ConvertError {
    fn mismatch(expected: &'static str, found: &Resolved) -> Self {
        ConvertError::Mismatch {
            expected,
            found: found.describe(),
        }
    }
}

/// A type that can be built from a [`Resolved`] value.
///
/// The associated constants tell the resolver where to look for the value,
/// see [`ParamDescriptor::of`](super::ParamDescriptor::of).
pub trait FromParam: Sized {
    /// Where the value is read from.
    const KIND: ParamKind;

    /// Whether an absent value is acceptable.
    const OPTIONAL: bool = false;

    /// Convert the resolved value.
    fn from_resolved(value: Resolved) -> Result<Self, ConvertError>;
}

/// A type that can be parsed from a single form or query value.
///
/// Implementing this trait makes the type and `Vec`s of it usable as
/// handler parameters.
pub trait FromValue: Sized {
    /// The associated error which can be returned from parsing.
    type Err: Into<BoxError>;

    /// Parse the value.
    fn from_value(value: &str) -> Result<Self, Self::Err>;
}

impl FromValue for String {
    type Err = Infallible;

    fn from_value(value: &str) -> Result<Self, Self::Err> {
        Ok(value.to_owned())
    }
}

macro_rules! from_value {
    ($($ty:ty),*) => ($(
        impl FromValue for $ty {
            type Err = <$ty as FromStr>::Err;

            fn from_value(value: &str) -> Result<Self, Self::Err> {
                <$ty as FromStr>::from_str(value.trim())
            }
        }

        impl FromParam for $ty {
            const KIND: ParamKind = ParamKind::Scalar;

            fn from_resolved(value: Resolved) -> Result<Self, ConvertError> {
                match value {
                    Resolved::Value(value) => {
                        Self::from_value(&value).map_err(|err| ConvertError::Parse(err.into()))
                    }
                    Resolved::Absent => Err(ConvertError::Missing),
                    other => Err(ConvertError::mismatch("a single value", &other)),
                }
            }
        }
    )*)
}

from_value! {
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    bool, char, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6, SocketAddr,
    NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize,
    NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize
}

impl FromParam for String {
    const KIND: ParamKind = ParamKind::Scalar;

    fn from_resolved(value: Resolved) -> Result<Self, ConvertError> {
        match value {
            Resolved::Value(value) => Ok(value),
            Resolved::Values(values) => Ok(values.join(",")),
            Resolved::Absent => Err(ConvertError::Missing),
            other => Err(ConvertError::mismatch("a value", &other)),
        }
    }
}

impl<T> FromParam for Vec<T>
where
    T: FromValue,
{
    const KIND: ParamKind = ParamKind::Scalar;

    fn from_resolved(value: Resolved) -> Result<Self, ConvertError> {
        let parse = |value: &str| T::from_value(value).map_err(|err| ConvertError::Parse(err.into()));

        match value {
            Resolved::Value(value) => Ok(vec![parse(&value)?]),
            Resolved::Values(values) => values.iter().map(|value| parse(value)).collect(),
            Resolved::Absent => Err(ConvertError::Missing),
            other => Err(ConvertError::mismatch("values", &other)),
        }
    }
}

impl<T> FromParam for Option<T>
where
    T: FromParam,
{
    const KIND: ParamKind = T::KIND;
    const OPTIONAL: bool = true;

    fn from_resolved(value: Resolved) -> Result<Self, ConvertError> {
        match value {
            Resolved::Absent => Ok(None),
            value => T::from_resolved(value).map(Some),
        }
    }
}

impl FromParam for UploadedFile {
    const KIND: ParamKind = ParamKind::File;

    fn from_resolved(value: Resolved) -> Result<Self, ConvertError> {
        match value {
            Resolved::File(file) => Ok(file),
            Resolved::Absent => Err(ConvertError::Missing),
            other => Err(ConvertError::mismatch("a file", &other)),
        }
    }
}

impl FromParam for Vec<UploadedFile> {
    const KIND: ParamKind = ParamKind::FileList;

    fn from_resolved(value: Resolved) -> Result<Self, ConvertError> {
        match value {
            Resolved::Files(files) => Ok(files),
            Resolved::File(file) => Ok(vec![file]),
            Resolved::Absent => Err(ConvertError::Missing),
            other => Err(ConvertError::mismatch("files", &other)),
        }
    }
}

impl FromParam for Part {
    const KIND: ParamKind = ParamKind::Part;

    fn from_resolved(value: Resolved) -> Result<Self, ConvertError> {
        match value {
            Resolved::Part(part) => Ok(part),
            Resolved::Absent => Err(ConvertError::Missing),
            other => Err(ConvertError::mismatch("a part", &other)),
        }
    }
}

impl FromParam for Vec<Part> {
    const KIND: ParamKind = ParamKind::PartList;

    fn from_resolved(value: Resolved) -> Result<Self, ConvertError> {
        match value {
            Resolved::Parts(parts) => Ok(parts),
            Resolved::Part(part) => Ok(vec![part]),
            Resolved::Absent => Err(ConvertError::Missing),
            other => Err(ConvertError::mismatch("parts", &other)),
        }
    }
}

impl FromParam for Resolved {
    const KIND: ParamKind = ParamKind::Scalar;
    const OPTIONAL: bool = true;

    fn from_resolved(value: Resolved) -> Result<Self, ConvertError> {
        Ok(value)
    }
}
