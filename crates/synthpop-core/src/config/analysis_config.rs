//! `[regions]`, `[sensitivity]`, and `[comparison]` sections.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Minimum synth outcomes before rule induction is attempted.
    pub min_samples: usize,
    /// Smallest subgroup, as a fraction of the population, kept as a region.
    pub min_region_fraction: f64,
    /// Used when a request does not pass `min_failure_rate`.
    pub default_min_failure_rate: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            min_samples: defaults::DEFAULT_REGION_MIN_SAMPLES,
            min_region_fraction: defaults::DEFAULT_MIN_REGION_FRACTION,
            default_min_failure_rate: defaults::DEFAULT_MIN_FAILURE_RATE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityConfig {
    pub default_deltas: Vec<f64>,
    /// Auxiliary runs allowed in flight at once.
    pub max_concurrent_runs: usize,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            default_deltas: constants::DEFAULT_SENSITIVITY_DELTAS.to_vec(),
            max_concurrent_runs: defaults::DEFAULT_MAX_CONCURRENT_RUNS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub min_simulations: usize,
    pub max_simulations: usize,
    /// Matched regions returned, after ranking by spread.
    pub max_regions: usize,
    /// Threshold passed to region analysis for each compared simulation.
    pub region_min_failure_rate: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            min_simulations: constants::MIN_COMPARE_SIMULATIONS,
            max_simulations: constants::MAX_COMPARE_SIMULATIONS,
            max_regions: defaults::DEFAULT_COMPARISON_MAX_REGIONS,
            region_min_failure_rate: defaults::DEFAULT_COMPARISON_REGION_MIN_FAILURE_RATE,
        }
    }
}
