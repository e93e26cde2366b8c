//! Compiled defaults for every config section.

use crate::constants;

// Simulation
pub const DEFAULT_N_EXECUTIONS: u32 = 100;
pub const DEFAULT_MIN_N_EXECUTIONS: u32 = constants::MIN_N_EXECUTIONS;
pub const DEFAULT_MAX_N_EXECUTIONS: u32 = 100_000;
pub const DEFAULT_SIGMA: f64 = 0.1;

// Model: try stage
pub const DEFAULT_TRY_EXPLORATION: f64 = 2.0;
pub const DEFAULT_TRY_MOTIVATION: f64 = 1.5;
pub const DEFAULT_TRY_COMPLEXITY: f64 = 2.0;
pub const DEFAULT_TRY_INITIAL_EFFORT: f64 = 1.5;
pub const DEFAULT_TRY_TASK_CRITICALITY: f64 = 0.5;

// Model: success stage
pub const DEFAULT_SUCCESS_CAPABILITY: f64 = 2.0;
pub const DEFAULT_SUCCESS_TRUST: f64 = 1.0;
pub const DEFAULT_SUCCESS_TRUST_MODIFIER: f64 = 1.0;
pub const DEFAULT_SUCCESS_FRICTION_TOLERANCE: f64 = 1.0;
pub const DEFAULT_SUCCESS_PERCEIVED_RISK: f64 = 1.5;
pub const DEFAULT_SUCCESS_FRICTION_MODIFIER: f64 = 1.0;
pub const DEFAULT_SUCCESS_TASK_CRITICALITY: f64 = 0.5;
pub const DEFAULT_SUCCESS_TIME_TO_VALUE: f64 = 0.5;

// Regions
pub const DEFAULT_REGION_MIN_SAMPLES: usize = constants::MIN_REGION_SAMPLES;
pub const DEFAULT_MIN_REGION_FRACTION: f64 = 0.05;
pub const DEFAULT_MIN_FAILURE_RATE: f64 = 0.5;

// Sensitivity
pub const DEFAULT_MAX_CONCURRENT_RUNS: usize = 4;

// Comparison
pub const DEFAULT_COMPARISON_MAX_REGIONS: usize = 10;
pub const DEFAULT_COMPARISON_REGION_MIN_FAILURE_RATE: f64 = 0.0;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
