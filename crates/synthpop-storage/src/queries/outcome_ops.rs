//! synth_outcomes table. Positions preserve population order for paging.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rusqlite::{params, Connection};

use synthpop_core::errors::SynthpopResult;
use synthpop_core::models::SynthOutcome;

use super::{decode_json, encode_json, sql_count, sql_limit};
use crate::{map_insert_err, to_storage_err};

const TABLE: &str = "synth_outcomes";

/// Insert all outcomes in a single transaction. Positions continue after any
/// outcomes already stored for the same simulation.
pub fn insert_outcomes(conn: &Connection, outcomes: &[SynthOutcome]) -> SynthpopResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    write_outcomes(&tx, outcomes)?;
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(outcomes.len())
}

/// Row writes only; the caller owns the transaction.
pub(crate) fn write_outcomes(conn: &Connection, outcomes: &[SynthOutcome]) -> SynthpopResult<()> {
    let mut next_position: HashMap<&str, i64> = HashMap::new();
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO synth_outcomes (simulation_id, position, synth_id,
                did_not_try_rate, failed_rate, success_rate, latent_traits)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    for outcome in outcomes {
        let position = match next_position.entry(outcome.simulation_id.as_str()) {
            Entry::Occupied(next) => next.into_mut(),
            Entry::Vacant(slot) => slot.insert(sql_count(count(conn, &outcome.simulation_id)?)),
        };
        stmt.execute(params![
            outcome.simulation_id,
            *position,
            outcome.synth_id,
            outcome.did_not_try_rate,
            outcome.failed_rate,
            outcome.success_rate,
            encode_json(&outcome.latent_traits)?,
        ])
        .map_err(|e| {
            map_insert_err(
                TABLE,
                &format!("{}/{}", outcome.simulation_id, outcome.synth_id),
                e,
            )
        })?;
        *position += 1;
    }
    Ok(())
}

/// Outcomes of one simulation in population order.
pub fn get_outcomes(
    conn: &Connection,
    simulation_id: &str,
    limit: Option<usize>,
    offset: usize,
) -> SynthpopResult<Vec<SynthOutcome>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT simulation_id, synth_id, did_not_try_rate, failed_rate, success_rate,
                    latent_traits
             FROM synth_outcomes WHERE simulation_id = ?1
             ORDER BY position LIMIT ?2 OFFSET ?3",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![simulation_id, sql_limit(limit), sql_count(offset)],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        let (simulation_id, synth_id, did_not_try_rate, failed_rate, success_rate, traits) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        result.push(SynthOutcome {
            simulation_id,
            synth_id,
            did_not_try_rate,
            failed_rate,
            success_rate,
            latent_traits: decode_json(TABLE, &traits)?,
        });
    }
    Ok(result)
}

pub fn count_outcomes(conn: &Connection, simulation_id: &str) -> SynthpopResult<usize> {
    count(conn, simulation_id)
}

fn count(conn: &Connection, simulation_id: &str) -> SynthpopResult<usize> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM synth_outcomes WHERE simulation_id = ?1",
            params![simulation_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n.max(0) as usize)
}
