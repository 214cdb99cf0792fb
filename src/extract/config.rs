use crate::extract::DEFAULT_TIP;

use serde::Deserialize;

use std::borrow::Cow;

/// Configuration for the [`Resolver`](super::Resolver).
///
/// ```
/// use reqparam::extract::ResolverConfig;
///
/// let config = ResolverConfig::new()
///     .default_tip(" is required")
///     .form_limit(64 * 1024);
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub(crate) use_default_resolution: bool,
    pub(crate) default_tip: Cow<'static, str>,
    pub(crate) form_limit: usize,
}

impl ResolverConfig {
    /// Create a [`ResolverConfig`] instance.
    pub fn new() -> Self {
        Self {
            use_default_resolution: true,
            default_tip: Cow::Borrowed(DEFAULT_TIP),
            form_limit: 16_384, // (~16kb)
        }
    }

    /// Whether parameters without a not-empty marker are resolved.
    ///
    /// When disabled, only marked parameters and file or part parameters
    /// are supported. Enabled by default.
    pub fn use_default_resolution(mut self, enabled: bool) -> Self {
        self.use_default_resolution = enabled;
        self
    }

    /// The tip appended to the parameter name when a not-empty
    /// parameter does not set its own.
    pub fn default_tip(mut self, tip: impl Into<Cow<'static, str>>) -> Self {
        self.default_tip = tip.into();
        self
    }

    /// Set maximum number of bytes of an url-encoded form body.
    ///
    /// By default the limit is 16kb.
    pub fn form_limit(mut self, limit: usize) -> Self {
        self.form_limit = limit;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
