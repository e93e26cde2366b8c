use serde::{Deserialize, Serialize};

use super::{AggregatedOutcomes, ScorecardDimension};

/// Direction of a one-at-a-time perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Self::Increase, Self::Decrease];

    pub fn sign(self) -> f64 {
        match self {
            Self::Increase => 1.0,
            Self::Decrease => -1.0,
        }
    }
}

/// Outcome of one auxiliary run (one dimension, one delta, one direction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaOutcome {
    pub delta: f64,
    pub direction: Direction,
    /// Dimension value after clamping to [0, 1].
    pub perturbed_value: f64,
    pub aggregated_outcomes: AggregatedOutcomes,
    /// `None` when clamping left the value unchanged.
    pub elasticity: Option<f64>,
}

/// Sensitivity of the success rate to one scorecard dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub dimension: ScorecardDimension,
    pub baseline_value: f64,
    pub deltas_tested: Vec<f64>,
    pub outcomes_by_delta: Vec<DeltaOutcome>,
    pub sensitivity_index: f64,
    /// 1 = most influential.
    pub rank: usize,
}

/// Full OAT analysis of one baseline simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub simulation_id: String,
    pub deltas: Vec<f64>,
    pub baseline_success_rate: f64,
    /// Ordered by rank.
    pub results: Vec<SensitivityResult>,
    pub most_sensitive_dimension: ScorecardDimension,
    pub auxiliary_runs: usize,
}
