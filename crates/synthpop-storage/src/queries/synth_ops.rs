//! synths table: bulk import and lookup.

use rusqlite::{params, Connection, OptionalExtension, Row};

use synthpop_core::errors::SynthpopResult;
use synthpop_core::models::{Observables, Synth};

use super::sql_count;
use crate::{map_insert_err, to_storage_err};

const TABLE: &str = "synths";

const SELECT_COLUMNS: &str = "SELECT id, name, digital_literacy, similar_tool_experience,
        motor_ability, time_availability, domain_expertise FROM synths";

fn row_to_synth(row: &Row<'_>) -> rusqlite::Result<Synth> {
    Ok(Synth {
        id: row.get(0)?,
        name: row.get(1)?,
        observables: Observables {
            digital_literacy: observable(row, 2)?,
            similar_tool_experience: observable(row, 3)?,
            motor_ability: observable(row, 4)?,
            time_availability: observable(row, 5)?,
            domain_expertise: observable(row, 6)?,
        },
    })
}

/// NULL is how SQLite stores NaN; read it back as NaN.
fn observable(row: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    Ok(row.get::<_, Option<f64>>(idx)?.unwrap_or(f64::NAN))
}

/// Insert in one transaction. Ids already present are skipped; returns the
/// number of rows actually inserted. Synths with invalid observables are
/// stored as given and logged; simulations exclude them.
pub fn insert_synths(conn: &Connection, synths: &[Synth]) -> SynthpopResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut inserted = 0;
    {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO synths (id, name, digital_literacy,
                    similar_tool_experience, motor_ability, time_availability, domain_expertise)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO NOTHING",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for synth in synths {
            if let Some((attribute, value)) = synth.observables.first_invalid() {
                tracing::warn!(
                    synth_id = %synth.id,
                    attribute,
                    value,
                    "synth imported with an invalid observable"
                );
            }
            let o = &synth.observables;
            inserted += stmt
                .execute(params![
                    synth.id,
                    synth.name,
                    o.digital_literacy,
                    o.similar_tool_experience,
                    o.motor_ability,
                    o.time_availability,
                    o.domain_expertise,
                ])
                .map_err(|e| map_insert_err(TABLE, &synth.id, e))?;
        }
    }
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(inserted)
}

pub fn get_synth(conn: &Connection, id: &str) -> SynthpopResult<Option<Synth>> {
    conn.prepare_cached(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
        .and_then(|mut stmt| stmt.query_row(params![id], row_to_synth).optional())
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Synths in the order of `ids`; unknown ids are skipped.
pub fn get_synths(conn: &Connection, ids: &[String]) -> SynthpopResult<Vec<Synth>> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut result = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(synth) = stmt
            .query_row(params![id], row_to_synth)
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))?
        {
            result.push(synth);
        }
    }
    Ok(result)
}

/// First `limit` synths in insertion order.
pub fn first_synths(conn: &Connection, limit: usize) -> SynthpopResult<Vec<Synth>> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT_COLUMNS} ORDER BY seq LIMIT ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![sql_count(limit)], row_to_synth)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count_synths(conn: &Connection) -> SynthpopResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM synths", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count.max(0) as usize)
}
