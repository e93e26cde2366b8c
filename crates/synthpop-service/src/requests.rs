//! Request bodies and query parameters. Unknown fields are rejected.

use serde::{Deserialize, Serialize};

use synthpop_core::errors::{SynthpopError, SynthpopResult};
use synthpop_core::models::Scorecard;

/// `POST /scorecards`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateScorecardRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub complexity: f64,
    pub initial_effort: f64,
    pub perceived_risk: f64,
    pub time_to_value: f64,
}

impl CreateScorecardRequest {
    /// Validated scorecard with a fresh id.
    pub fn into_scorecard(self) -> SynthpopResult<Scorecard> {
        if self.name.trim().is_empty() {
            return Err(SynthpopError::validation("name", "must not be empty"));
        }
        let mut scorecard = Scorecard::new(
            self.name,
            self.complexity,
            self.initial_effort,
            self.perceived_risk,
            self.time_to_value,
        );
        scorecard.description = self.description;
        scorecard.validate()?;
        Ok(scorecard)
    }
}

/// `POST /simulations`
///
/// The population is either `synth_ids` or the first `n_synths` stored synths;
/// with neither, every stored synth is simulated. Unset run parameters fall
/// back to the `[simulation]` config, and a missing seed is drawn at random.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSimulationRequest {
    pub scorecard_id: String,
    pub scenario_id: String,
    #[serde(default)]
    pub synth_ids: Option<Vec<String>>,
    #[serde(default)]
    pub n_synths: Option<usize>,
    #[serde(default)]
    pub n_executions: Option<u32>,
    #[serde(default)]
    pub sigma: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// `POST /simulations/compare`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareRequest {
    pub simulation_ids: Vec<String>,
}

/// `GET /simulations/{id}/regions` query.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionQuery {
    /// Defaults to `regions.default_min_failure_rate`.
    #[serde(default)]
    pub min_failure_rate: Option<f64>,
    /// Keep only the top `limit` ranked regions.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Parse `?deltas=0.05,0.10`. Range checks happen in the analyzer.
pub fn parse_deltas(raw: &str) -> SynthpopResult<Vec<f64>> {
    let deltas = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>().map_err(|_| {
                SynthpopError::validation("deltas", format!("cannot parse '{part}' as a number"))
            })
        })
        .collect::<SynthpopResult<Vec<f64>>>()?;
    if deltas.is_empty() {
        return Err(SynthpopError::validation("deltas", "at least one delta is required"));
    }
    Ok(deltas)
}
