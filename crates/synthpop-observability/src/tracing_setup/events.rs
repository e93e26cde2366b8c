//! Structured events for the simulation lifecycle and analyses.
//!
//! Field names are stable so log pipelines can key on them.

use synthpop_core::models::{AggregatedOutcomes, SimulationRun};

pub fn run_started(run: &SimulationRun) {
    tracing::info!(
        run_id = %run.id,
        scorecard_id = %run.scorecard_id,
        scenario_id = %run.scenario_id,
        synth_count = run.total_synths,
        n_executions = run.config.n_executions,
        sigma = run.config.sigma,
        seed = run.config.seed,
        "simulation started"
    );
}

pub fn run_completed(run: &SimulationRun, aggregated: &AggregatedOutcomes) {
    tracing::info!(
        run_id = %run.id,
        excluded_synths = run.excluded_synths,
        did_not_try_rate = aggregated.did_not_try_rate,
        failed_rate = aggregated.failed_rate,
        success_rate = aggregated.success_rate,
        execution_time_seconds = run.execution_time_seconds,
        "simulation completed"
    );
}

pub fn run_failed(run: &SimulationRun, reason: &str) {
    tracing::error!(
        run_id = %run.id,
        scorecard_id = %run.scorecard_id,
        scenario_id = %run.scenario_id,
        synth_count = run.total_synths,
        execution_time_seconds = run.execution_time_seconds,
        reason,
        "simulation failed"
    );
}

/// A synth was dropped from aggregation (partial degradation).
pub fn synth_excluded(run_id: &str, synth_id: &str, reason: &str) {
    tracing::warn!(run_id, synth_id, reason, "synth excluded from aggregation");
}

pub fn partial_degradation(run_id: &str, excluded: usize, total: usize) {
    tracing::warn!(
        run_id,
        excluded,
        total,
        "simulation completed with excluded synths"
    );
}

pub fn regions_found(simulation_id: &str, candidates: usize, retained: usize) {
    tracing::info!(simulation_id, candidates, retained, "region analysis finished");
}

pub fn sensitivity_ranked(simulation_id: &str, most_sensitive: &str, auxiliary_runs: usize) {
    tracing::info!(
        simulation_id,
        most_sensitive,
        auxiliary_runs,
        "sensitivity analysis finished"
    );
}

pub fn comparison_finished(simulations: usize, matched_regions: usize) {
    tracing::info!(simulations, matched_regions, "comparison finished");
}
