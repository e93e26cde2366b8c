//! Query modules, one per table, plus shared column codecs.

pub mod outcome_ops;
pub mod run_ops;
pub mod scorecard_ops;
pub mod synth_ops;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use synthpop_core::errors::SynthpopResult;

use crate::corrupt_row;

pub(crate) fn encode_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn decode_ts(table: &str, raw: &str) -> SynthpopResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| corrupt_row(table, format!("bad timestamp '{raw}': {e}")))
}

pub(crate) fn decode_opt_ts(
    table: &str,
    raw: Option<String>,
) -> SynthpopResult<Option<DateTime<Utc>>> {
    raw.map(|s| decode_ts(table, &s)).transpose()
}

pub(crate) fn encode_json<T: Serialize + ?Sized>(value: &T) -> SynthpopResult<String> {
    Ok(serde_json::to_string(value)?)
}

pub(crate) fn decode_json<T: DeserializeOwned>(table: &str, raw: &str) -> SynthpopResult<T> {
    serde_json::from_str(raw).map_err(|e| corrupt_row(table, format!("bad JSON column: {e}")))
}

/// SQLite treats a negative LIMIT as "no limit".
pub(crate) fn sql_limit(limit: Option<usize>) -> i64 {
    limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX))
}

pub(crate) fn sql_count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
