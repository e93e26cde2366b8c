//! Region analyzer: evaluate candidate rules against per-synth outcomes,
//! keep the failure-prone ones, rank them.

use std::cmp::Ordering;

use synthpop_core::config::RegionConfig;
use synthpop_core::errors::{SynthpopError, SynthpopResult};
use synthpop_core::models::{Region, SimulationRun, SynthOutcome};
use synthpop_observability::{events, region_span};
use synthpop_simulation::aggregation::aggregate;

use super::rules::{generate_candidates, Rule};

#[derive(Debug, Clone)]
pub struct RegionAnalyzer {
    config: RegionConfig,
}

impl RegionAnalyzer {
    pub fn new(config: RegionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    /// Failure-prone regions of a completed run, ranked.
    ///
    /// Errors: run not completed, `min_failure_rate` outside [0, 1], or fewer
    /// than `min_samples` outcomes.
    pub fn find_regions(
        &self,
        run: &SimulationRun,
        outcomes: &[SynthOutcome],
        min_failure_rate: f64,
    ) -> SynthpopResult<Vec<Region>> {
        let span = region_span!(run.id, min_failure_rate);
        let _guard = span.enter();

        if !min_failure_rate.is_finite() || !(0.0..=1.0).contains(&min_failure_rate) {
            return Err(SynthpopError::validation(
                "min_failure_rate",
                format!("must be within [0, 1], got {min_failure_rate}"),
            ));
        }
        let baseline = match (run.is_completed(), run.aggregated_outcomes) {
            (true, Some(aggregated)) => aggregated,
            _ => {
                return Err(SynthpopError::validation(
                    "simulation_id",
                    format!("simulation {} is {}, not completed", run.id, run.status),
                ))
            }
        };
        if outcomes.len() < self.config.min_samples {
            return Err(SynthpopError::InsufficientSamples {
                required: self.config.min_samples,
                available: outcomes.len(),
            });
        }

        let candidates = generate_candidates(outcomes);
        let candidate_count = candidates.len();
        let min_count = self.min_region_size(outcomes.len());

        let mut regions: Vec<Region> = candidates
            .iter()
            .filter_map(|rule| evaluate(rule, &run.id, outcomes, baseline.failed_rate))
            .filter(|region| {
                region.failed_rate >= min_failure_rate && region.synth_count >= min_count
            })
            .collect();
        rank(&mut regions);

        events::regions_found(&run.id, candidate_count, regions.len());
        Ok(regions)
    }

    /// `ceil(min_region_fraction · population)`, at least one synth.
    pub fn min_region_size(&self, population: usize) -> usize {
        let size = (self.config.min_region_fraction * population as f64).ceil();
        (size as usize).max(1)
    }
}

/// Subgroup statistics for one rule. `None` when no synth matches.
pub fn evaluate(
    rule: &Rule,
    simulation_id: &str,
    outcomes: &[SynthOutcome],
    simulation_failed_rate: f64,
) -> Option<Region> {
    let members: Vec<&SynthOutcome> = outcomes
        .iter()
        .filter(|o| rule.matches(&o.latent_traits))
        .collect();
    if members.is_empty() {
        return None;
    }
    let rates = aggregate(members.iter().copied());
    Some(Region {
        simulation_id: simulation_id.to_string(),
        rules: rule.conditions(),
        rule_text: rule.to_string(),
        synth_count: members.len(),
        synth_percentage: members.len() as f64 / outcomes.len() as f64 * 100.0,
        did_not_try_rate: rates.did_not_try_rate,
        failed_rate: rates.failed_rate,
        success_rate: rates.success_rate,
        failure_delta: rates.failed_rate - simulation_failed_rate,
    })
}

/// `failed_rate` desc, `synth_count` desc, fewer conditions, `rule_text` asc.
pub fn rank(regions: &mut [Region]) {
    regions.sort_by(compare_regions);
}

fn compare_regions(a: &Region, b: &Region) -> Ordering {
    b.failed_rate
        .total_cmp(&a.failed_rate)
        .then_with(|| b.synth_count.cmp(&a.synth_count))
        .then_with(|| a.rules.len().cmp(&b.rules.len()))
        .then_with(|| a.rule_text.cmp(&b.rule_text))
}
