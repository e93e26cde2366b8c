//! PRAGMA configuration applied to every connection.
//!
//! WAL and NORMAL sync for file databases, foreign keys on, 5s busy timeout.

use rusqlite::Connection;

use synthpop_core::errors::SynthpopResult;

use crate::to_storage_err;

pub fn apply_pragmas(conn: &Connection) -> SynthpopResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// In-memory databases cannot use WAL.
pub fn apply_memory_pragmas(conn: &Connection) -> SynthpopResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn verify_wal_mode(conn: &Connection) -> SynthpopResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
