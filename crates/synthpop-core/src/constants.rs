/// synthpop version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Smallest `n_executions` accepted at the boundary.
pub const MIN_N_EXECUTIONS: u32 = 10;

/// Minimum number of synth outcomes required for region analysis.
pub const MIN_REGION_SAMPLES: usize = 40;

/// Quantile cut points used for candidate rule generation.
pub const REGION_QUANTILES: [f64; 3] = [0.25, 0.50, 0.75];

/// Decimal places kept on region thresholds.
pub const REGION_THRESHOLD_DECIMALS: i32 = 2;

/// Default perturbation deltas for sensitivity analysis.
pub const DEFAULT_SENSITIVITY_DELTAS: [f64; 2] = [0.05, 0.10];

/// Bounds on the number of simulations in a comparison.
pub const MIN_COMPARE_SIMULATIONS: usize = 2;
pub const MAX_COMPARE_SIMULATIONS: usize = 5;

/// Lower/upper clamp applied to every sigmoid output.
pub const PROBABILITY_FLOOR: f64 = 1e-9;
pub const PROBABILITY_CEILING: f64 = 1.0 - 1e-9;

/// Tolerance used when checking that rates sum to 1.0.
pub const RATE_EPSILON: f64 = 1e-9;

/// Pagination defaults for outcome listing.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
pub const MAX_PAGE_LIMIT: usize = 1000;
