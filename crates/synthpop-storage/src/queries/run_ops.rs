//! simulation_runs table. Runs are written once, in a terminal state.

use rusqlite::{params, Connection, OptionalExtension};

use synthpop_core::errors::{SynthpopError, SynthpopResult};
use synthpop_core::models::{AggregatedOutcomes, SimulationConfig, SimulationRun, SynthOutcome};
use synthpop_core::traits::RunFilter;

use super::outcome_ops::write_outcomes;
use super::{decode_json, decode_opt_ts, decode_ts, encode_json, encode_ts};
use crate::{corrupt_row, map_insert_err, to_storage_err};

const TABLE: &str = "simulation_runs";

const SELECT_COLUMNS: &str = "SELECT id, scorecard_id, scenario_id, status, config, synth_ids,
        aggregated_outcomes, total_synths, excluded_synth_ids, failure_reason,
        execution_time_seconds, created_at, started_at, completed_at
    FROM simulation_runs";

struct RunRow {
    id: String,
    scorecard_id: String,
    scenario_id: String,
    status: String,
    config: String,
    synth_ids: String,
    aggregated_outcomes: Option<String>,
    total_synths: i64,
    excluded_synth_ids: String,
    failure_reason: Option<String>,
    execution_time_seconds: f64,
    created_at: String,
    started_at: Option<String>,
    completed_at: Option<String>,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RunRow> {
    Ok(RunRow {
        id: row.get(0)?,
        scorecard_id: row.get(1)?,
        scenario_id: row.get(2)?,
        status: row.get(3)?,
        config: row.get(4)?,
        synth_ids: row.get(5)?,
        aggregated_outcomes: row.get(6)?,
        total_synths: row.get(7)?,
        excluded_synth_ids: row.get(8)?,
        failure_reason: row.get(9)?,
        execution_time_seconds: row.get(10)?,
        created_at: row.get(11)?,
        started_at: row.get(12)?,
        completed_at: row.get(13)?,
    })
}

impl RunRow {
    fn into_run(self) -> SynthpopResult<SimulationRun> {
        let status = self
            .status
            .parse()
            .map_err(|_| corrupt_row(TABLE, format!("unknown status '{}'", self.status)))?;
        let config: SimulationConfig = decode_json(TABLE, &self.config)?;
        let synth_ids: Vec<String> = decode_json(TABLE, &self.synth_ids)?;
        let aggregated_outcomes: Option<AggregatedOutcomes> = self
            .aggregated_outcomes
            .as_deref()
            .map(|raw| decode_json(TABLE, raw))
            .transpose()?;
        let excluded_synth_ids: Vec<String> = decode_json(TABLE, &self.excluded_synth_ids)?;
        let total_synths = usize::try_from(self.total_synths)
            .map_err(|_| corrupt_row(TABLE, format!("negative total_synths for {}", self.id)))?;

        Ok(SimulationRun {
            created_at: decode_ts(TABLE, &self.created_at)?,
            started_at: decode_opt_ts(TABLE, self.started_at)?,
            completed_at: decode_opt_ts(TABLE, self.completed_at)?,
            id: self.id,
            scorecard_id: self.scorecard_id,
            scenario_id: self.scenario_id,
            synth_ids,
            config,
            status,
            aggregated_outcomes,
            total_synths,
            excluded_synths: excluded_synth_ids.len(),
            excluded_synth_ids,
            failure_reason: self.failure_reason,
            execution_time_seconds: self.execution_time_seconds,
        })
    }
}

pub fn insert_run(conn: &Connection, run: &SimulationRun) -> SynthpopResult<()> {
    let aggregated = run
        .aggregated_outcomes
        .as_ref()
        .map(encode_json)
        .transpose()?;
    conn.execute(
        "INSERT INTO simulation_runs (id, scorecard_id, scenario_id, status, config, synth_ids,
            aggregated_outcomes, total_synths, excluded_synth_ids, failure_reason,
            execution_time_seconds, created_at, started_at, completed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            run.id,
            run.scorecard_id,
            run.scenario_id,
            run.status.as_str(),
            encode_json(&run.config)?,
            encode_json(&run.synth_ids)?,
            aggregated,
            super::sql_count(run.total_synths),
            encode_json(&run.excluded_synth_ids)?,
            run.failure_reason,
            run.execution_time_seconds,
            encode_ts(&run.created_at),
            run.started_at.as_ref().map(encode_ts),
            run.completed_at.as_ref().map(encode_ts),
        ],
    )
    .map_err(|e| map_insert_err(TABLE, &run.id, e))?;
    Ok(())
}

/// Run row and its outcomes in one transaction. A failure on any outcome
/// leaves neither behind.
pub fn insert_execution(
    conn: &Connection,
    run: &SimulationRun,
    outcomes: &[SynthOutcome],
) -> SynthpopResult<()> {
    if let Some(stray) = outcomes.iter().find(|o| o.simulation_id != run.id) {
        return Err(SynthpopError::validation(
            "simulation_id",
            format!(
                "outcome for synth {} belongs to {}, not {}",
                stray.synth_id, stray.simulation_id, run.id
            ),
        ));
    }
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    insert_run(&tx, run)?;
    write_outcomes(&tx, outcomes)?;
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_run(conn: &Connection, id: &str) -> SynthpopResult<Option<SimulationRun>> {
    let row = conn
        .prepare_cached(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
        .and_then(|mut stmt| stmt.query_row(params![id], read_row).optional())
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(RunRow::into_run).transpose()
}

/// Newest first. Unset filter fields match everything.
pub fn list_runs(conn: &Connection, filter: &RunFilter) -> SynthpopResult<Vec<SimulationRun>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "{SELECT_COLUMNS}
             WHERE (?1 IS NULL OR scorecard_id = ?1)
               AND (?2 IS NULL OR scenario_id = ?2)
               AND (?3 IS NULL OR status = ?3)
             ORDER BY seq DESC"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![
                filter.scorecard_id,
                filter.scenario_id,
                filter.status.map(|s| s.as_str()),
            ],
            read_row,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| to_storage_err(e.to_string()))?.into_run()?);
    }
    Ok(result)
}
