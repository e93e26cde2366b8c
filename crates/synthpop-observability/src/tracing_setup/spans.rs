//! Span definitions per operation: simulation, regions, sensitivity, comparison.
//!
//! Each span carries the identifiers needed to correlate log lines of one request.

/// Create a simulation run span.
#[macro_export]
macro_rules! simulation_span {
    ($run_id:expr, $scorecard_id:expr, $scenario_id:expr, $synth_count:expr) => {
        tracing::info_span!(
            "synthpop.simulation",
            run_id = %$run_id,
            scorecard_id = %$scorecard_id,
            scenario_id = %$scenario_id,
            synth_count = $synth_count
        )
    };
}

/// Create a region analysis span.
#[macro_export]
macro_rules! region_span {
    ($simulation_id:expr, $min_failure_rate:expr) => {
        tracing::info_span!(
            "synthpop.regions",
            simulation_id = %$simulation_id,
            min_failure_rate = $min_failure_rate
        )
    };
}

/// Create a sensitivity analysis span.
#[macro_export]
macro_rules! sensitivity_span {
    ($simulation_id:expr, $delta_count:expr) => {
        tracing::info_span!(
            "synthpop.sensitivity",
            simulation_id = %$simulation_id,
            delta_count = $delta_count
        )
    };
}

/// Create a comparison span.
#[macro_export]
macro_rules! comparison_span {
    ($simulation_count:expr) => {
        tracing::info_span!("synthpop.comparison", simulation_count = $simulation_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SIMULATION: &str = "synthpop.simulation";
    pub const REGIONS: &str = "synthpop.regions";
    pub const SENSITIVITY: &str = "synthpop.sensitivity";
    pub const COMPARISON: &str = "synthpop.comparison";
}
