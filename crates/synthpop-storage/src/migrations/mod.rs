//! Schema migrations using PRAGMA user_version.

pub mod v001_initial;

use rusqlite::Connection;

use synthpop_core::errors::{StorageError, SynthpopResult};

use crate::to_storage_err;

const MIGRATIONS: &[(&str, u32)] = &[(v001_initial::MIGRATION_SQL, 1)];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 1;

/// Apply every migration newer than the database's `user_version`.
pub fn run_migrations(conn: &Connection) -> SynthpopResult<()> {
    let current = current_version(conn)?;

    for &(sql, version) in MIGRATIONS {
        if current >= version {
            continue;
        }
        let migrate = || -> rusqlite::Result<()> {
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(sql)?;
            tx.pragma_update(None, "user_version", version)?;
            tx.commit()
        };
        migrate().map_err(|e| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        })?;
        tracing::info!(version, "applied migration");
    }
    Ok(())
}

pub fn current_version(conn: &Connection) -> SynthpopResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
