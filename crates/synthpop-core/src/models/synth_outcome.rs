use serde::{Deserialize, Serialize};

use super::LatentTraits;
use crate::constants::RATE_EPSILON;

/// Result of one Monte Carlo trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    DidNotTry,
    Failed,
    Success,
}

/// Integer tallies of trial outcomes for one synth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub did_not_try: u32,
    pub failed: u32,
    pub success: u32,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::DidNotTry => self.did_not_try += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Success => self.success += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.did_not_try + self.failed + self.success
    }
}

/// Per-(simulation, synth) outcome rates. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthOutcome {
    pub simulation_id: String,
    pub synth_id: String,
    pub did_not_try_rate: f64,
    pub failed_rate: f64,
    pub success_rate: f64,
    /// Trait snapshot the rates were produced from.
    pub latent_traits: LatentTraits,
}

impl SynthOutcome {
    /// Convert counts to rates over the fixed trial denominator.
    pub fn from_counts(
        simulation_id: impl Into<String>,
        synth_id: impl Into<String>,
        counts: OutcomeCounts,
        latent_traits: LatentTraits,
    ) -> Self {
        let n = f64::from(counts.total().max(1));
        Self {
            simulation_id: simulation_id.into(),
            synth_id: synth_id.into(),
            did_not_try_rate: f64::from(counts.did_not_try) / n,
            failed_rate: f64::from(counts.failed) / n,
            success_rate: f64::from(counts.success) / n,
            latent_traits,
        }
    }

    pub fn rate_sum(&self) -> f64 {
        self.did_not_try_rate + self.failed_rate + self.success_rate
    }

    /// Rates form a probability simplex.
    pub fn is_valid(&self) -> bool {
        let rates = [self.did_not_try_rate, self.failed_rate, self.success_rate];
        rates.iter().all(|r| (0.0..=1.0).contains(r))
            && (self.rate_sum() - 1.0).abs() <= RATE_EPSILON
    }
}
