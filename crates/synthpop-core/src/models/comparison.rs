use serde::{Deserialize, Serialize};

use super::{AggregatedOutcomes, RuleCondition};

/// One compared simulation, with its aggregated outcomes unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub simulation_id: String,
    pub scorecard_id: String,
    pub scenario_id: String,
    pub total_synths: usize,
    pub aggregated_outcomes: AggregatedOutcomes,
}

/// A matched region's failure rate within one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationFailedRate {
    pub simulation_id: String,
    pub failed_rate: f64,
    pub synth_count: usize,
}

/// A region present in every compared simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedRegion {
    pub rule_text: String,
    pub rules: Vec<RuleCondition>,
    /// `max - min` of `failed_rate` across the simulations.
    pub failed_rate_spread: f64,
    /// In the order the simulation ids were given.
    pub failed_rates: Vec<SimulationFailedRate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub simulations_summary: Vec<SimulationSummary>,
    pub most_affected_regions: Vec<AffectedRegion>,
}
