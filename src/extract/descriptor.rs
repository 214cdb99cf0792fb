use crate::extract::FromParam;

use std::borrow::Cow;

/// The tip used when a not-empty parameter does not configure its own.
pub const DEFAULT_TIP: &str = " must not be empty";

/// The class of a declared parameter type.
///
/// The kind decides where the [`Resolver`](super::Resolver) looks for the
/// value: form and query values, uploaded files, or raw multipart parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// A string, number, bool, or a list of those.
    Scalar,
    /// A single uploaded file.
    File,
    /// All uploaded files sharing a name.
    FileList,
    /// A single multipart part.
    Part,
    /// Every part of a multipart request.
    PartList,
}

impl ParamKind {
    /// Returns `true` for kinds that can only be read from a multipart request.
    pub fn requires_multipart(self) -> bool {
        !matches!(self, ParamKind::Scalar)
    }
}

/// The declaration of a single handler parameter.
#[derive(Clone, Debug)]
pub struct ParamDescriptor {
    field_name: &'static str,
    name: Option<Cow<'static, str>>,
    kind: ParamKind,
    type_name: &'static str,
    required: bool,
    not_empty: bool,
    tip: Option<Cow<'static, str>>,
    default_value: Option<Cow<'static, str>>,
    request_part: bool,
}

impl ParamDescriptor {
    /// Describe a parameter of type `T` bound to `field_name`.
    ///
    /// The kind and type name are taken from `T`. The parameter is
    /// required unless `T` is optional.
    pub fn of<T>(field_name: &'static str) -> Self
    where
        T: FromParam,
    {
        Self {
            field_name,
            name: None,
            kind: T::KIND,
            type_name: std::any::type_name::<T>(),
            required: !T::OPTIONAL,
            not_empty: false,
            tip: None,
            default_value: None,
            request_part: false,
        }
    }

    /// Bind to the request parameter `name` instead of the field name.
    ///
    /// An empty name falls back to the field name.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark the parameter as not-empty. Implies [`required`](Self::required).
    pub fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self.required = true;
        self
    }

    /// Set the not-empty tip. Implies [`not_empty`](Self::not_empty).
    ///
    /// The validation message is the parameter name followed by the tip.
    pub fn tip(mut self, tip: impl Into<Cow<'static, str>>) -> Self {
        self.tip = Some(tip.into());
        self.not_empty()
    }

    /// Override whether the parameter must be present.
    ///
    /// Has no effect on not-empty parameters.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required || self.not_empty;
        self
    }

    /// Value used when the parameter is absent or empty.
    pub fn default_value(mut self, value: impl Into<Cow<'static, str>>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Mark the parameter as bound by a dedicated part resolver.
    pub fn request_part(mut self) -> Self {
        self.request_part = true;
        self
    }

    /// The request parameter name.
    pub fn name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.field_name,
        }
    }

    /// The name of the field or argument being resolved.
    pub fn field_name(&self) -> &'static str {
        self.field_name
    }

    /// The declared kind.
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// The short name of the declared type, used in error messages.
    pub fn type_name(&self) -> String {
        short_type_name(self.type_name)
    }

    /// Whether an absent value is an error.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the not-empty marker is present.
    pub fn is_not_empty(&self) -> bool {
        self.not_empty
    }

    /// The configured tip, if the parameter sets one.
    pub fn configured_tip(&self) -> Option<&str> {
        self.tip.as_deref()
    }

    /// The default value, if any.
    pub fn default(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Whether the parameter is bound by a dedicated part resolver.
    pub fn is_request_part(&self) -> bool {
        self.request_part
    }
}

// `alloc::vec::Vec<alloc::string::String>` -> `Vec<String>`
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();

    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or_default());
            segment.clear();
            out.push(c);
        }
    }

    out.push_str(segment.rsplit("::").next().unwrap_or_default());
    out
}
