//! scorecards table. Scorecards are immutable: insert and read only.

use rusqlite::{params, Connection, OptionalExtension};

use synthpop_core::errors::SynthpopResult;
use synthpop_core::models::Scorecard;

use super::{decode_ts, encode_ts};
use crate::{map_insert_err, to_storage_err};

const TABLE: &str = "scorecards";

struct ScorecardRow {
    id: String,
    name: String,
    description: Option<String>,
    complexity: f64,
    initial_effort: f64,
    perceived_risk: f64,
    time_to_value: f64,
    created_at: String,
}

impl ScorecardRow {
    fn into_scorecard(self) -> SynthpopResult<Scorecard> {
        Ok(Scorecard {
            created_at: decode_ts(TABLE, &self.created_at)?,
            id: self.id,
            name: self.name,
            description: self.description,
            complexity: self.complexity,
            initial_effort: self.initial_effort,
            perceived_risk: self.perceived_risk,
            time_to_value: self.time_to_value,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, description, complexity, initial_effort,
        perceived_risk, time_to_value, created_at FROM scorecards";

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScorecardRow> {
    Ok(ScorecardRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        complexity: row.get(3)?,
        initial_effort: row.get(4)?,
        perceived_risk: row.get(5)?,
        time_to_value: row.get(6)?,
        created_at: row.get(7)?,
    })
}

pub fn insert_scorecard(conn: &Connection, scorecard: &Scorecard) -> SynthpopResult<()> {
    conn.execute(
        "INSERT INTO scorecards (id, name, description, complexity, initial_effort,
            perceived_risk, time_to_value, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            scorecard.id,
            scorecard.name,
            scorecard.description,
            scorecard.complexity,
            scorecard.initial_effort,
            scorecard.perceived_risk,
            scorecard.time_to_value,
            encode_ts(&scorecard.created_at),
        ],
    )
    .map_err(|e| map_insert_err(TABLE, &scorecard.id, e))?;
    Ok(())
}

pub fn get_scorecard(conn: &Connection, id: &str) -> SynthpopResult<Option<Scorecard>> {
    let row = conn
        .prepare_cached(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
        .and_then(|mut stmt| stmt.query_row(params![id], read_row).optional())
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(ScorecardRow::into_scorecard).transpose()
}

/// All scorecards in creation order.
pub fn list_scorecards(conn: &Connection) -> SynthpopResult<Vec<Scorecard>> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT_COLUMNS} ORDER BY seq"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| to_storage_err(e.to_string()))?.into_scorecard()?);
    }
    Ok(result)
}
