use std::sync::Arc;

use proptest::prelude::*;
use synthpop_core::config::ModelConfig;
use synthpop_core::models::{
    LatentTraits, Observables, Scenario, ScenarioCatalog, Scorecard, ScorecardDimension,
    SimulationConfig, SimulationStatus, Synth,
};
use synthpop_core::traits::CancellationToken;
use synthpop_core::SynthpopConfig;
use synthpop_simulation::derivation::derive;
use synthpop_simulation::{OutcomeModel, SimulationEngine, SimulationRequest};

fn arb_unit() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

fn arb_observables() -> impl Strategy<Value = Observables> {
    (arb_unit(), arb_unit(), arb_unit(), arb_unit(), arb_unit()).prop_map(
        |(dl, ste, ma, ta, de)| Observables {
            digital_literacy: dl,
            similar_tool_experience: ste,
            motor_ability: ma,
            time_availability: ta,
            domain_expertise: de,
        },
    )
}

fn arb_traits() -> impl Strategy<Value = LatentTraits> {
    arb_observables().prop_map(|o| derive(&o))
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (-1.0f64..=1.0, -1.0f64..=1.0, -1.0f64..=1.0, arb_unit()).prop_map(
        |(motivation, trust, friction, criticality)| Scenario {
            id: "prop".to_string(),
            name: "Prop".to_string(),
            description: String::new(),
            motivation_modifier: motivation,
            trust_modifier: trust,
            friction_modifier: friction,
            task_criticality: criticality,
        },
    )
}

fn arb_scorecard() -> impl Strategy<Value = Scorecard> {
    (arb_unit(), arb_unit(), arb_unit(), arb_unit())
        .prop_map(|(c, e, r, t)| Scorecard::new("prop", c, e, r, t))
}

fn arb_dimension() -> impl Strategy<Value = ScorecardDimension> {
    prop_oneof![
        Just(ScorecardDimension::Complexity),
        Just(ScorecardDimension::InitialEffort),
        Just(ScorecardDimension::PerceivedRisk),
        Just(ScorecardDimension::TimeToValue),
    ]
}

proptest! {
    #[test]
    fn derived_traits_stay_in_unit_interval(obs in arb_observables()) {
        let t = derive(&obs);
        for v in [t.capability_mean, t.trust_mean, t.friction_tolerance_mean, t.exploration_prob] {
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn raising_any_dimension_never_raises_probabilities(
        traits in arb_traits(),
        scenario in arb_scenario(),
        scorecard in arb_scorecard(),
        dimension in arb_dimension(),
        bump in 0.0f64..=1.0,
    ) {
        let model = OutcomeModel::new(&ModelConfig::default());
        let raised_value = (scorecard.get(dimension) + bump).min(1.0);
        let raised = scorecard.with_dimension(dimension, raised_value);

        let (t0, s0) = model.probabilities(&traits, &scorecard, &scenario);
        let (t1, s1) = model.probabilities(&traits, &raised, &scenario);
        prop_assert!(t1 <= t0);
        prop_assert!(s1 <= s0);
    }

    #[test]
    fn probabilities_are_strictly_inside_unit_interval(
        traits in arb_traits(),
        scenario in arb_scenario(),
        scorecard in arb_scorecard(),
    ) {
        let model = OutcomeModel::new(&ModelConfig::default());
        let d = model.distribution(&traits, &scorecard, &scenario);
        prop_assert!(d.p_try > 0.0 && d.p_try < 1.0);
        prop_assert!(d.p_success > 0.0 && d.p_success < 1.0);
        prop_assert!((d.did_not_try + d.failed + d.success - 1.0).abs() < 1e-12);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn any_seed_and_sigma_yield_simplex_rates(
        obs in arb_observables(),
        seed in any::<u64>(),
        sigma in 0.0f64..3.0,
        n_executions in 10u32..300,
    ) {
        let mut config = SynthpopConfig::default();
        config.simulation.worker_threads = Some(1);
        let engine = SimulationEngine::new(Arc::new(ScenarioCatalog::builtin()), &config).unwrap();
        let synths = vec![Synth::new("p-1", "Prop", obs)];
        let scorecard = Scorecard::new("prop", 0.5, 0.5, 0.5, 0.5);

        let exec = engine.run(
            SimulationRequest {
                scorecard: &scorecard,
                scenario_id: "crisis",
                synths: &synths,
                config: SimulationConfig { n_executions, sigma, seed },
            },
            &CancellationToken::new(),
        ).unwrap();

        prop_assert_eq!(exec.run.status, SimulationStatus::Completed);
        prop_assert!(exec.outcomes[0].is_valid());
    }
}
