//! Sensitivity analyzer: run the perturbation plan on the engine in bounded
//! batches and fold the auxiliary runs into a ranked report.

use std::sync::Arc;

use synthpop_core::config::SensitivityConfig;
use synthpop_core::errors::{SynthpopError, SynthpopResult};
use synthpop_core::models::{
    DeltaOutcome, Scorecard, ScorecardDimension, SensitivityReport, SensitivityResult,
    SimulationRun, SimulationStatus, Synth,
};
use synthpop_core::traits::Cancellable;
use synthpop_observability::{events, sensitivity_span};
use synthpop_simulation::{SimulationEngine, SimulationRequest};

use super::elasticity::{elasticity, rank, sensitivity_index};
use super::perturbation::{plan, validate_deltas, Perturbation};

pub struct SensitivityAnalyzer {
    engine: Arc<SimulationEngine>,
    config: SensitivityConfig,
}

impl SensitivityAnalyzer {
    pub fn new(engine: Arc<SimulationEngine>, config: SensitivityConfig) -> Self {
        Self { engine, config }
    }

    pub fn default_deltas(&self) -> &[f64] {
        &self.config.default_deltas
    }

    /// OAT analysis around a completed baseline run.
    ///
    /// `synths` must be the baseline population; every auxiliary run reuses the
    /// baseline scenario and `SimulationConfig`, seed included. Auxiliary runs
    /// are not persisted.
    pub fn analyze<C>(
        &self,
        baseline: &SimulationRun,
        scorecard: &Scorecard,
        synths: &[Synth],
        deltas: &[f64],
        token: &C,
    ) -> SynthpopResult<SensitivityReport>
    where
        C: Cancellable + ?Sized,
    {
        let span = sensitivity_span!(baseline.id, deltas.len());
        let _guard = span.enter();

        validate_deltas(deltas)?;
        let baseline_success = match (baseline.is_completed(), baseline.aggregated_outcomes) {
            (true, Some(aggregated)) => aggregated.success_rate,
            _ => {
                return Err(SynthpopError::validation(
                    "simulation_id",
                    format!(
                        "simulation {} is {}, not completed",
                        baseline.id, baseline.status
                    ),
                ))
            }
        };
        if scorecard.id != baseline.scorecard_id {
            return Err(SynthpopError::validation(
                "scorecard_id",
                format!(
                    "scorecard {} does not belong to simulation {}",
                    scorecard.id, baseline.id
                ),
            ));
        }

        let perturbations = plan(scorecard, deltas);
        let scorecards: Vec<Scorecard> = perturbations.iter().map(|p| p.apply(scorecard)).collect();
        let requests: Vec<SimulationRequest<'_>> = scorecards
            .iter()
            .map(|perturbed| SimulationRequest {
                scorecard: perturbed,
                scenario_id: &baseline.scenario_id,
                synths,
                config: baseline.config,
            })
            .collect();

        let mut outcomes = Vec::with_capacity(perturbations.len());
        let batch_size = self.config.max_concurrent_runs.max(1);
        for (batch_index, batch) in requests.chunks(batch_size).enumerate() {
            token.check()?;
            tracing::debug!(batch = batch_index, runs = batch.len(), "sensitivity batch");

            let offset = batch_index * batch_size;
            for (i, result) in self.engine.run_many(batch, token).into_iter().enumerate() {
                let execution = result?;
                let perturbation = &perturbations[offset + i];
                if execution.run.status != SimulationStatus::Completed {
                    return Err(auxiliary_failure(baseline, perturbation, &execution.run, token));
                }
                let aggregated = execution.run.aggregated_outcomes.unwrap_or_default();
                outcomes.push(DeltaOutcome {
                    delta: perturbation.delta,
                    direction: perturbation.direction,
                    perturbed_value: perturbation.perturbed_value,
                    aggregated_outcomes: aggregated,
                    elasticity: elasticity(
                        perturbation.baseline_value,
                        perturbation.perturbed_value,
                        baseline_success,
                        aggregated.success_rate,
                    ),
                });
            }
        }

        let mut results: Vec<SensitivityResult> = ScorecardDimension::ALL
            .iter()
            .map(|&dimension| {
                let by_delta: Vec<DeltaOutcome> = perturbations
                    .iter()
                    .zip(&outcomes)
                    .filter(|(p, _)| p.dimension == dimension)
                    .map(|(_, o)| o.clone())
                    .collect();
                SensitivityResult {
                    dimension,
                    baseline_value: scorecard.get(dimension),
                    deltas_tested: deltas.to_vec(),
                    sensitivity_index: sensitivity_index(deltas, &by_delta),
                    outcomes_by_delta: by_delta,
                    rank: 0,
                }
            })
            .collect();
        rank(&mut results);

        let most_sensitive_dimension = results[0].dimension;
        events::sensitivity_ranked(
            &baseline.id,
            most_sensitive_dimension.name(),
            outcomes.len(),
        );

        Ok(SensitivityReport {
            simulation_id: baseline.id.clone(),
            deltas: deltas.to_vec(),
            baseline_success_rate: baseline_success,
            results,
            most_sensitive_dimension,
            auxiliary_runs: outcomes.len(),
        })
    }
}

fn auxiliary_failure<C>(
    baseline: &SimulationRun,
    perturbation: &Perturbation,
    run: &SimulationRun,
    token: &C,
) -> SynthpopError
where
    C: Cancellable + ?Sized,
{
    if token.is_cancelled() {
        return SynthpopError::Cancelled;
    }
    SynthpopError::ComputationFailure {
        run_id: baseline.id.clone(),
        reason: format!(
            "auxiliary run for {} {:?} {} failed: {}",
            perturbation.dimension,
            perturbation.direction,
            perturbation.delta,
            run.failure_reason.as_deref().unwrap_or("unknown")
        ),
    }
}
