//! Stable error codes and HTTP status mapping for the API boundary.

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const INSUFFICIENT_SAMPLES: &str = "INSUFFICIENT_SAMPLES";
pub const COMPUTATION_FAILURE: &str = "COMPUTATION_FAILURE";
pub const INVALID_OBSERVABLE: &str = "INVALID_OBSERVABLE";
pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
pub const CANCELLED: &str = "CANCELLED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

/// Implemented by every error enum that can reach a caller.
pub trait SynthpopErrorCode {
    /// Machine-readable code, stable across releases.
    fn error_code(&self) -> &'static str;

    /// HTTP status an API layer should answer with.
    fn http_status(&self) -> u16 {
        500
    }
}
