//! # synthpop-storage
//!
//! SQLite persistence implementing the store traits of `synthpop-core`.
//! One connection behind a mutex; schema managed with `PRAGMA user_version`
//! migrations; nested values stored as JSON columns.

pub mod engine;
pub mod migrations;
pub mod pragmas;
pub mod queries;

pub use engine::StorageEngine;

use synthpop_core::errors::{StorageError, SynthpopError};

/// Wrap a rusqlite (or lock) failure message as a storage error.
pub fn to_storage_err(message: impl Into<String>) -> SynthpopError {
    StorageError::SqliteError {
        message: message.into(),
    }
    .into()
}

/// Map a rusqlite error, turning unique/primary-key violations into
/// [`StorageError::DuplicateKey`]. Other constraint failures (foreign keys)
/// stay plain SQLite errors.
pub(crate) fn map_insert_err(table: &str, id: &str, err: rusqlite::Error) -> SynthpopError {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            StorageError::DuplicateKey {
                table: table.to_string(),
                id: id.to_string(),
            }
            .into()
        }
        other => to_storage_err(other.to_string()),
    }
}

pub(crate) fn corrupt_row(table: &str, details: impl Into<String>) -> SynthpopError {
    StorageError::CorruptRow {
        table: table.to_string(),
        details: details.into(),
    }
    .into()
}
