use super::error_code::{self, SynthpopErrorCode};
use super::{ConfigError, StorageError};

/// Top-level error aggregating all subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum SynthpopError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("validation failed for {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error(
        "region analysis needs at least {required} synth outcomes, simulation has {available}; \
         rerun with a larger synth population"
    )]
    InsufficientSamples { required: usize, available: usize },

    #[error("simulation {run_id} failed: {reason}")]
    ComputationFailure { run_id: String, reason: String },

    #[error("synth {synth_id} has invalid observable {attribute}={value}")]
    InvalidObservable {
        synth_id: String,
        attribute: String,
        value: f64,
    },

    #[error("invalid simulation status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("operation cancelled")]
    Cancelled,

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience alias used across all synthpop crates.
pub type SynthpopResult<T> = Result<T, SynthpopError>;

impl SynthpopError {
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl SynthpopErrorCode for SynthpopError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::ValidationError { .. } => error_code::VALIDATION_ERROR,
            Self::InsufficientSamples { .. } => error_code::INSUFFICIENT_SAMPLES,
            Self::ComputationFailure { .. } => error_code::COMPUTATION_FAILURE,
            Self::InvalidObservable { .. } => error_code::INVALID_OBSERVABLE,
            Self::InvalidTransition { .. } => error_code::INVALID_TRANSITION,
            Self::Cancelled => error_code::CANCELLED,
            Self::StorageError(e) => e.error_code(),
            Self::ConfigError(e) => e.error_code(),
            Self::SerializationError(_) => error_code::SERIALIZATION_ERROR,
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::ValidationError { .. } => 422,
            Self::InsufficientSamples { .. } => 400,
            Self::SerializationError(_) => 400,
            Self::InvalidTransition { .. } => 409,
            Self::ComputationFailure { .. }
            | Self::InvalidObservable { .. }
            | Self::Cancelled
            | Self::StorageError(_)
            | Self::ConfigError(_) => 500,
        }
    }
}
