//! Error rendering for transport layers.

use serde::Serialize;

use synthpop_core::errors::{SynthpopError, SynthpopErrorCode};

/// Error body returned to clients. `status` goes on the response line, not
/// in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: u16,
    pub code: &'static str,
    pub message: String,
}

impl From<&SynthpopError> for ApiError {
    fn from(err: &SynthpopError) -> Self {
        Self {
            status: err.http_status(),
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

impl From<SynthpopError> for ApiError {
    fn from(err: SynthpopError) -> Self {
        Self::from(&err)
    }
}
