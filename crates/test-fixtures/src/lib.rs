//! Test fixture loader for synth populations and helper builders shared by
//! tests and benches across the workspace.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use synthpop_core::models::{AggregatedOutcomes, Observables, OutcomeCounts, Scorecard, Synth};

/// 20 synths. Too small for region analysis.
pub const SMALL_POPULATION: &str = "populations/small_20.json";
/// 60 synths. Enough for region analysis.
pub const MEDIUM_POPULATION: &str = "populations/medium_60.json";
/// 6 synths; `corrupt-002` and `corrupt-005` carry out-of-range observables.
pub const CORRUPT_POPULATION: &str = "populations/corrupt_6.json";
/// Recorded baseline run over the small population, seed 42.
pub const GOLDEN_BASELINE: &str = "golden/baseline_seed42.json";

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

pub fn small_population() -> Vec<Synth> {
    load_fixture(SMALL_POPULATION)
}

pub fn medium_population() -> Vec<Synth> {
    load_fixture(MEDIUM_POPULATION)
}

pub fn corrupt_population() -> Vec<Synth> {
    load_fixture(CORRUPT_POPULATION)
}

/// A pinned simulation: its inputs plus the exact outcomes it must produce.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenRun {
    pub population: String,
    pub scorecard: GoldenScorecard,
    pub scenario_id: String,
    pub n_executions: u32,
    pub sigma: f64,
    pub seed: u64,
    /// `[did_not_try, failed, success]` per synth id.
    pub counts: BTreeMap<String, [u32; 3]>,
    pub aggregated_outcomes: AggregatedOutcomes,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GoldenScorecard {
    pub complexity: f64,
    pub initial_effort: f64,
    pub perceived_risk: f64,
    pub time_to_value: f64,
}

impl GoldenRun {
    pub fn synths(&self) -> Vec<Synth> {
        load_fixture(&self.population)
    }

    pub fn scorecard(&self) -> Scorecard {
        let s = self.scorecard;
        scorecard(s.complexity, s.initial_effort, s.perceived_risk, s.time_to_value)
    }

    pub fn counts_for(&self, synth_id: &str) -> Option<OutcomeCounts> {
        self.counts.get(synth_id).map(|&[did_not_try, failed, success]| OutcomeCounts {
            did_not_try,
            failed,
            success,
        })
    }
}

pub fn golden_baseline() -> GoldenRun {
    load_fixture(GOLDEN_BASELINE)
}

/// Deterministic population of any size, spread over the unit cube with a
/// golden-ratio sequence so every quartile of every observable is populated.
pub fn generated_population(n: usize) -> Vec<Synth> {
    const STEPS: [f64; 5] = [
        0.618_033_988_749_895,
        0.414_213_562_373_095,
        0.732_050_807_568_877,
        0.236_067_977_499_79,
        0.645_751_311_064_591,
    ];
    (0..n)
        .map(|i| {
            let k = (i + 1) as f64;
            let at = |d: usize| (k * STEPS[d]).fract();
            Synth::new(
                format!("gen-{:05}", i + 1),
                format!("Generated {}", i + 1),
                Observables {
                    digital_literacy: at(0),
                    similar_tool_experience: at(1),
                    motor_ability: at(2),
                    time_availability: at(3),
                    domain_expertise: at(4),
                },
            )
        })
        .collect()
}

pub fn scorecard(
    complexity: f64,
    initial_effort: f64,
    perceived_risk: f64,
    time_to_value: f64,
) -> Scorecard {
    Scorecard::new(
        "Fixture feature",
        complexity,
        initial_effort,
        perceived_risk,
        time_to_value,
    )
}

/// Mid-range scorecard used wherever the exact profile does not matter.
pub fn moderate_scorecard() -> Scorecard {
    scorecard(0.5, 0.4, 0.5, 0.3)
}
