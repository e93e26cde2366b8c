//! Region filtering and ranking hold for arbitrary outcome sets.

use proptest::prelude::*;
use synthpop_analysis::RegionAnalyzer;
use synthpop_core::config::RegionConfig;
use synthpop_core::models::{
    LatentTraits, OutcomeCounts, SimulationConfig, SimulationRun, SynthOutcome,
};
use synthpop_simulation::aggregation::aggregate;

fn outcome_strategy() -> impl Strategy<Value = (LatentTraits, u32, u32)> {
    (
        (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0),
        0u32..=10,
        0u32..=10,
    )
        .prop_map(|((c, t, f, e), failed, success)| {
            let traits = LatentTraits {
                capability_mean: c,
                trust_mean: t,
                friction_tolerance_mean: f,
                exploration_prob: e,
            };
            (traits, failed, success)
        })
}

fn build(rows: &[(LatentTraits, u32, u32)]) -> (SimulationRun, Vec<SynthOutcome>) {
    let outcomes: Vec<SynthOutcome> = rows
        .iter()
        .enumerate()
        .map(|(i, &(traits, failed, success))| {
            let counts = OutcomeCounts {
                did_not_try: 20 - failed - success,
                failed,
                success,
            };
            SynthOutcome::from_counts("prop", format!("s-{i}"), counts, traits)
        })
        .collect();
    let config = SimulationConfig {
        n_executions: 20,
        sigma: 0.0,
        seed: 0,
    };
    let mut run = SimulationRun::new("sc", "baseline", Vec::new(), config);
    run.id = "prop".to_string();
    run.start().unwrap();
    run.complete(aggregate(&outcomes), Vec::new(), 0.0).unwrap();
    (run, outcomes)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn regions_pass_filters_and_are_ranked(
        rows in prop::collection::vec(outcome_strategy(), 40..70),
        threshold in 0.0f64..=1.0,
    ) {
        let analyzer = RegionAnalyzer::new(RegionConfig::default());
        let (run, outcomes) = build(&rows);
        let regions = analyzer.find_regions(&run, &outcomes, threshold).unwrap();
        let min_size = analyzer.min_region_size(outcomes.len());

        for region in &regions {
            prop_assert!(region.failed_rate >= threshold);
            prop_assert!(region.synth_count >= min_size);
            prop_assert!(region.synth_count <= outcomes.len());
            prop_assert!(region.synth_percentage > 0.0 && region.synth_percentage <= 100.0);
        }
        for pair in regions.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.failed_rate >= b.failed_rate);
            if a.failed_rate == b.failed_rate && a.synth_count == b.synth_count {
                prop_assert!(a.rules.len() <= b.rules.len());
            }
        }
    }
}
