//! Compare 2..=5 completed simulations: summaries plus the regions whose
//! failure rate varies most between them.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use synthpop_core::config::ComparisonConfig;
use synthpop_core::errors::{SynthpopError, SynthpopResult};
use synthpop_core::models::{
    AffectedRegion, ComparisonResult, Region, SimulationFailedRate, SimulationRun,
    SimulationSummary,
};
use synthpop_core::traits::ISimulationStore;
use synthpop_observability::{comparison_span, events};

use crate::regions::RegionAnalyzer;

pub struct ComparisonService {
    store: Arc<dyn ISimulationStore>,
    regions: RegionAnalyzer,
    config: ComparisonConfig,
}

impl ComparisonService {
    pub fn new(
        store: Arc<dyn ISimulationStore>,
        regions: RegionAnalyzer,
        config: ComparisonConfig,
    ) -> Self {
        Self {
            store,
            regions,
            config,
        }
    }

    pub fn compare(&self, simulation_ids: &[String]) -> SynthpopResult<ComparisonResult> {
        let span = comparison_span!(simulation_ids.len());
        let _guard = span.enter();

        self.validate_ids(simulation_ids)?;
        let runs = simulation_ids
            .iter()
            .map(|id| self.completed_run(id))
            .collect::<SynthpopResult<Vec<_>>>()?;

        let simulations_summary = runs.iter().map(summarize).collect();
        let most_affected_regions = self.most_affected_regions(&runs)?;

        events::comparison_finished(runs.len(), most_affected_regions.len());
        Ok(ComparisonResult {
            simulations_summary,
            most_affected_regions,
        })
    }

    fn validate_ids(&self, ids: &[String]) -> SynthpopResult<()> {
        let (min, max) = (self.config.min_simulations, self.config.max_simulations);
        if ids.len() < min || ids.len() > max {
            return Err(SynthpopError::validation(
                "simulation_ids",
                format!("between {min} and {max} simulations required, got {}", ids.len()),
            ));
        }
        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id.as_str()) {
                return Err(SynthpopError::validation(
                    "simulation_ids",
                    format!("duplicate simulation id {id}"),
                ));
            }
        }
        Ok(())
    }

    fn completed_run(&self, id: &str) -> SynthpopResult<SimulationRun> {
        match self.store.get_run(id)? {
            Some(run) if run.is_completed() && run.aggregated_outcomes.is_some() => Ok(run),
            Some(run) => Err(SynthpopError::validation(
                "simulation_ids",
                format!("simulation {id} is {}, not completed", run.status),
            )),
            None => Err(SynthpopError::validation(
                "simulation_ids",
                format!("simulation {id} not found"),
            )),
        }
    }

    fn most_affected_regions(&self, runs: &[SimulationRun]) -> SynthpopResult<Vec<AffectedRegion>> {
        let mut per_run: Vec<Vec<Region>> = Vec::with_capacity(runs.len());
        for run in runs {
            let outcomes = self.store.get_outcomes(&run.id, None, 0)?;
            match self
                .regions
                .find_regions(run, &outcomes, self.config.region_min_failure_rate)
            {
                Ok(regions) => per_run.push(regions),
                Err(SynthpopError::InsufficientSamples {
                    required,
                    available,
                }) => {
                    tracing::warn!(
                        simulation_id = %run.id,
                        required,
                        available,
                        "too few outcomes for region matching, returning summaries only"
                    );
                    return Ok(Vec::new());
                }
                Err(err) => return Err(err),
            }
        }
        Ok(match_regions(runs, &per_run, self.config.max_regions))
    }
}

fn summarize(run: &SimulationRun) -> SimulationSummary {
    SimulationSummary {
        simulation_id: run.id.clone(),
        scorecard_id: run.scorecard_id.clone(),
        scenario_id: run.scenario_id.clone(),
        total_synths: run.total_synths,
        aggregated_outcomes: run.aggregated_outcomes.unwrap_or_default(),
    }
}

/// Regions whose `rule_text` appears in every run, by failed-rate spread desc
/// then `rule_text` asc, truncated to `max_regions`.
pub fn match_regions(
    runs: &[SimulationRun],
    per_run: &[Vec<Region>],
    max_regions: usize,
) -> Vec<AffectedRegion> {
    let Some((first, rest)) = per_run.split_first() else {
        return Vec::new();
    };
    let lookups: Vec<HashMap<&str, &Region>> = rest
        .iter()
        .map(|regions| regions.iter().map(|r| (r.rule_text.as_str(), r)).collect())
        .collect();

    let mut matched: Vec<AffectedRegion> = first
        .iter()
        .filter_map(|anchor| {
            let mut members = vec![anchor];
            for lookup in &lookups {
                members.push(lookup.get(anchor.rule_text.as_str()).copied()?);
            }
            let failed_rates: Vec<SimulationFailedRate> = runs
                .iter()
                .zip(&members)
                .map(|(run, region)| SimulationFailedRate {
                    simulation_id: run.id.clone(),
                    failed_rate: region.failed_rate,
                    synth_count: region.synth_count,
                })
                .collect();
            let max = failed_rates.iter().map(|r| r.failed_rate).fold(f64::MIN, f64::max);
            let min = failed_rates.iter().map(|r| r.failed_rate).fold(f64::MAX, f64::min);
            Some(AffectedRegion {
                rule_text: anchor.rule_text.clone(),
                rules: anchor.rules.clone(),
                failed_rate_spread: max - min,
                failed_rates,
            })
        })
        .collect();

    matched.sort_by(|a, b| {
        b.failed_rate_spread
            .total_cmp(&a.failed_rate_spread)
            .then_with(|| a.rule_text.cmp(&b.rule_text))
    });
    matched.truncate(max_regions);
    matched
}
