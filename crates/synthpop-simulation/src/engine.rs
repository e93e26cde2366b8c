//! Monte Carlo simulation engine.
//!
//! A run derives traits per synth, executes `n_executions` trials on the synth's
//! own random stream, converts tallies to rates, and averages the rates over the
//! population. Synths are processed in parallel on a dedicated rayon pool;
//! results are collected in population order, so aggregation is reproducible.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use synthpop_core::config::{EngineConfig, SynthpopConfig};
use synthpop_core::errors::{ConfigError, SynthpopError, SynthpopResult};
use synthpop_core::models::{
    OutcomeCounts, Scenario, ScenarioCatalog, Scorecard, SimulationConfig, SimulationRun, Synth,
    SynthOutcome,
};
use synthpop_core::traits::Cancellable;
use synthpop_observability::{events, simulation_span};

use crate::aggregation::aggregate;
use crate::derivation::derive_checked;
use crate::outcome_model::OutcomeModel;
use crate::rng::synth_stream;

/// Trials between two cancellation checks inside one synth.
const CANCEL_CHECK_INTERVAL: u32 = 1024;

/// Inputs of one run. The population is passed in full; the engine never
/// reads storage.
#[derive(Debug, Clone, Copy)]
pub struct SimulationRequest<'a> {
    pub scorecard: &'a Scorecard,
    pub scenario_id: &'a str,
    pub synths: &'a [Synth],
    pub config: SimulationConfig,
}

/// A finished run (`completed` or `failed`) with its per-synth outcomes.
///
/// `outcomes` is empty when the run failed.
#[derive(Debug, Clone)]
pub struct SimulationExecution {
    pub run: SimulationRun,
    pub outcomes: Vec<SynthOutcome>,
}

struct PopulationOutcomes {
    outcomes: Vec<SynthOutcome>,
    excluded: Vec<String>,
}

pub struct SimulationEngine {
    catalog: Arc<ScenarioCatalog>,
    model: OutcomeModel,
    config: EngineConfig,
    pool: rayon::ThreadPool,
}

impl SimulationEngine {
    pub fn new(catalog: Arc<ScenarioCatalog>, config: &SynthpopConfig) -> SynthpopResult<Self> {
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|i| format!("synthpop-sim-{i}"));
        if let Some(threads) = config.simulation.worker_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build().map_err(|e| ConfigError::ValidationFailed {
            field: "simulation.worker_threads".to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            threads = pool.current_num_threads(),
            scenarios = catalog.len(),
            "simulation engine ready"
        );

        Ok(Self {
            catalog,
            model: OutcomeModel::new(&config.model),
            config: config.simulation.clone(),
            pool,
        })
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    pub fn model(&self) -> &OutcomeModel {
        &self.model
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fill unspecified run parameters from the engine defaults. A missing seed
    /// is drawn at random; the drawn value is recorded on the run.
    pub fn resolve_config(
        &self,
        n_executions: Option<u32>,
        sigma: Option<f64>,
        seed: Option<u64>,
    ) -> SimulationConfig {
        SimulationConfig {
            n_executions: n_executions.unwrap_or(self.config.default_n_executions),
            sigma: sigma.unwrap_or(self.config.default_sigma),
            seed: seed.unwrap_or_else(rand::random),
        }
    }

    /// Execute one run to a terminal state.
    ///
    /// Returns `Err` only for request validation failures, before any run
    /// exists. Every error after that point is recorded on the returned run
    /// as `failed` with a reason.
    pub fn run<C>(
        &self,
        request: SimulationRequest<'_>,
        token: &C,
    ) -> SynthpopResult<SimulationExecution>
    where
        C: Cancellable + ?Sized,
    {
        self.validate(&request)?;

        let synth_ids = request.synths.iter().map(|s| s.id.clone()).collect();
        let mut run = SimulationRun::new(
            request.scorecard.id.clone(),
            request.scenario_id,
            synth_ids,
            request.config,
        );
        let span = simulation_span!(run.id, run.scorecard_id, run.scenario_id, run.total_synths);
        let _guard = span.enter();

        let started = Instant::now();
        run.start()?;
        events::run_started(&run);

        match self.execute(&run.id, &request, token) {
            Ok(population) => {
                let aggregated = aggregate(&population.outcomes);
                run.complete(
                    aggregated,
                    population.excluded,
                    started.elapsed().as_secs_f64(),
                )?;
                if run.excluded_synths > 0 {
                    events::partial_degradation(&run.id, run.excluded_synths, run.total_synths);
                }
                events::run_completed(&run, &aggregated);
                Ok(SimulationExecution {
                    run,
                    outcomes: population.outcomes,
                })
            }
            Err(err) => {
                let reason = failure_reason(&err);
                run.fail(reason.clone(), started.elapsed().as_secs_f64())?;
                events::run_failed(&run, &reason);
                Ok(SimulationExecution {
                    run,
                    outcomes: Vec::new(),
                })
            }
        }
    }

    /// Execute several runs concurrently on the engine pool. Results keep the
    /// order of `requests`.
    pub fn run_many<C>(
        &self,
        requests: &[SimulationRequest<'_>],
        token: &C,
    ) -> Vec<SynthpopResult<SimulationExecution>>
    where
        C: Cancellable + ?Sized,
    {
        self.pool
            .install(|| requests.par_iter().map(|r| self.run(*r, token)).collect())
    }

    fn validate(&self, request: &SimulationRequest<'_>) -> SynthpopResult<()> {
        request
            .config
            .validate(self.config.min_n_executions, self.config.max_n_executions)?;
        if request.synths.is_empty() {
            return Err(SynthpopError::validation(
                "synth_ids",
                "synth population must not be empty",
            ));
        }
        let mut seen = HashSet::with_capacity(request.synths.len());
        for synth in request.synths {
            if !seen.insert(synth.id.as_str()) {
                return Err(SynthpopError::validation(
                    "synth_ids",
                    format!("duplicate synth id '{}'", synth.id),
                ));
            }
        }
        Ok(())
    }

    fn execute<C>(
        &self,
        run_id: &str,
        request: &SimulationRequest<'_>,
        token: &C,
    ) -> SynthpopResult<PopulationOutcomes>
    where
        C: Cancellable + ?Sized,
    {
        let scenario = self
            .catalog
            .get(request.scenario_id)
            .ok_or_else(|| SynthpopError::not_found("scenario", request.scenario_id))?;
        request.scorecard.validate()?;

        let results: Vec<SynthpopResult<SynthOutcome>> = self.pool.install(|| {
            request
                .synths
                .par_iter()
                .map(|synth| {
                    self.simulate_synth(
                        run_id,
                        synth,
                        request.scorecard,
                        scenario,
                        &request.config,
                        token,
                    )
                })
                .collect()
        });

        let mut outcomes = Vec::with_capacity(results.len());
        let mut excluded = Vec::new();
        for result in results {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(SynthpopError::InvalidObservable {
                    synth_id,
                    attribute,
                    value,
                }) => {
                    events::synth_excluded(run_id, &synth_id, &format!("{attribute}={value}"));
                    excluded.push(synth_id);
                }
                Err(err) => return Err(err),
            }
        }

        if outcomes.is_empty() {
            return Err(SynthpopError::ComputationFailure {
                run_id: run_id.to_string(),
                reason: format!(
                    "all {} synths were excluded for invalid observables",
                    excluded.len()
                ),
            });
        }
        if let Some(bad) = outcomes.iter().find(|o| !o.is_valid()) {
            return Err(SynthpopError::ComputationFailure {
                run_id: run_id.to_string(),
                reason: format!("non-finite outcome rates for synth {}", bad.synth_id),
            });
        }

        Ok(PopulationOutcomes { outcomes, excluded })
    }

    fn simulate_synth<C>(
        &self,
        run_id: &str,
        synth: &Synth,
        scorecard: &Scorecard,
        scenario: &Scenario,
        config: &SimulationConfig,
        token: &C,
    ) -> SynthpopResult<SynthOutcome>
    where
        C: Cancellable + ?Sized,
    {
        let traits = derive_checked(synth)?;
        let logits = self.model.logits(&traits, scorecard, scenario);
        let mut rng = synth_stream(config.seed, &synth.id);

        let mut counts = OutcomeCounts::default();
        for trial in 0..config.n_executions {
            if trial % CANCEL_CHECK_INTERVAL == 0 {
                token.check()?;
            }
            counts.record(OutcomeModel::sample_from_logits(
                logits,
                config.sigma,
                &mut rng,
            ));
        }

        Ok(SynthOutcome::from_counts(run_id, &synth.id, counts, traits))
    }
}

fn failure_reason(err: &SynthpopError) -> String {
    match err {
        SynthpopError::Cancelled => "cancelled".to_string(),
        SynthpopError::ComputationFailure { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}
