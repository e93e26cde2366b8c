//! Error handling for synthpop.
//! One error enum per subsystem, `thiserror` only, aggregated into [`SynthpopError`].

pub mod config_error;
pub mod error_code;
pub mod storage_error;
pub mod synthpop_error;

pub use config_error::ConfigError;
pub use error_code::SynthpopErrorCode;
pub use storage_error::StorageError;
pub use synthpop_error::{SynthpopError, SynthpopResult};
