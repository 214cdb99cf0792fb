use crate::extract::ConvertError;
use crate::http::{Response, StatusCode};
use crate::reject::{self, Reject};

/// The error returned by the [`Resolver`](super::Resolver) if resolution fails.
///
/// Every variant names the parameter that could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveRejection {
    /// No value was found, no default is configured and the
    /// parameter is required.
    ///
    /// Rejects the request with `400 Bad Request`.
    #[error("Required {ty} parameter '{name}' is not present")]
    MissingValue {
        /// The request parameter name.
        name: String,
        /// The declared type.
        ty: String,
    },

    /// A not-empty parameter was absent, empty or blank.
    ///
    /// Rejects the request with `400 Bad Request`.
    #[error("{message}")]
    Validation {
        /// The request parameter name.
        name: String,
        /// The parameter name followed by the configured tip.
        message: String,
    },

    /// A file or part parameter was declared but the request
    /// is not a multipart request.
    ///
    /// Rejects the request with `400 Bad Request`.
    #[error("The current request is not a multipart request")]
    InvalidRequest {
        /// The request parameter name.
        name: String,
    },

    /// The request is multipart but the transport did not provide
    /// a parsed multipart body.
    ///
    /// Rejects the request with `500 Internal Server Error`.
    #[error("Expected a parsed multipart request for '{name}': is a multipart transport configured?")]
    MultipartUnavailable {
        /// The request parameter name.
        name: String,
    },

    /// The resolved value could not be converted to the declared type.
    ///
    /// Rejects the request with `400 Bad Request`.
    #[error("Failed to convert parameter '{name}' to {ty}: {source}")]
    Conversion {
        /// The request parameter name.
        name: String,
        /// The declared type.
        ty: String,
        /// The conversion error.
        source: ConvertError,
    },

    /// The resolver does not handle this parameter.
    ///
    /// Rejects the request with `500 Internal Server Error`.
    #[error("No resolver supports parameter '{name}'")]
    Unsupported {
        /// The request parameter name.
        name: String,
    },
}

impl ResolveRejection {
    /// The request parameter this rejection is about.
    pub fn name(&self) -> &str {
        match self {
            ResolveRejection::MissingValue { name, .. }
            | ResolveRejection::Validation { name, .. }
            | ResolveRejection::InvalidRequest { name }
            | ResolveRejection::MultipartUnavailable { name }
            | ResolveRejection::Conversion { name, .. }
            | ResolveRejection::Unsupported { name } => name,
        }
    }

    /// The status code used when rejecting the request.
    pub fn status(&self) -> StatusCode {
        match self {
            ResolveRejection::MissingValue { .. }
            | ResolveRejection::Validation { .. }
            | ResolveRejection::InvalidRequest { .. }
            | ResolveRejection::Conversion { .. } => StatusCode::BAD_REQUEST,
            ResolveRejection::MultipartUnavailable { .. } | ResolveRejection::Unsupported { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl Reject for ResolveRejection {
    fn reject(self) -> Response {
        reject::error_response(self.status(), &self)
    }
}
