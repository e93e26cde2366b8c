//! Two-stage outcome model: does the synth try, and if so does it succeed.
//!
//! ```text
//! p_try     = σ(a1·exploration + a2·motivation − a3·complexity − a4·initial_effort
//!               + a5·criticality + ε)
//! p_success = σ(b1·capability + b2·trust + b3·trust_mod + b4·friction_tolerance
//!               − b5·perceived_risk − b6·friction_mod − b7·criticality
//!               − b8·time_to_value + ε)
//! ```
//!
//! `ε = sigma·z`, `z ~ N(0, 1)`, drawn independently per stage. All weights are
//! non-negative magnitudes; the signs above are fixed here.

use rand::Rng;
use rand_distr::StandardNormal;

use synthpop_core::config::{ModelConfig, SuccessWeights, TryWeights};
use synthpop_core::constants::{PROBABILITY_CEILING, PROBABILITY_FLOOR};
use synthpop_core::models::{LatentTraits, Outcome, Scenario, Scorecard};

/// Logistic function, clamped so the result is a usable probability at any input.
pub fn sigmoid(x: f64) -> f64 {
    if x.is_nan() {
        return 0.5;
    }
    (1.0 / (1.0 + (-x).exp())).clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING)
}

/// Noise-free logits of both stages for one (synth, scorecard, scenario).
///
/// Constant across the trials of a synth, so the engine computes it once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageLogits {
    pub try_logit: f64,
    pub success_logit: f64,
}

/// Expected 3-outcome distribution at zero noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeDistribution {
    pub p_try: f64,
    pub p_success: f64,
    pub did_not_try: f64,
    pub failed: f64,
    pub success: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutcomeModel {
    try_weights: TryWeights,
    success_weights: SuccessWeights,
}

impl OutcomeModel {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            try_weights: config.try_weights,
            success_weights: config.success_weights,
        }
    }

    pub fn logits(
        &self,
        traits: &LatentTraits,
        scorecard: &Scorecard,
        scenario: &Scenario,
    ) -> StageLogits {
        let a = &self.try_weights;
        let b = &self.success_weights;

        let try_logit = a.bias + a.exploration * traits.exploration_prob
            + a.motivation * scenario.motivation_modifier
            - a.complexity * scorecard.complexity
            - a.initial_effort * scorecard.initial_effort
            + a.task_criticality * scenario.task_criticality;

        let success_logit = b.bias + b.capability * traits.capability_mean
            + b.trust * traits.trust_mean
            + b.trust_modifier * scenario.trust_modifier
            + b.friction_tolerance * traits.friction_tolerance_mean
            - b.perceived_risk * scorecard.perceived_risk
            - b.friction_modifier * scenario.friction_modifier
            - b.task_criticality * scenario.task_criticality
            - b.time_to_value * scorecard.time_to_value;

        StageLogits {
            try_logit,
            success_logit,
        }
    }

    /// Noise-free `(p_try, p_success)`.
    pub fn probabilities(
        &self,
        traits: &LatentTraits,
        scorecard: &Scorecard,
        scenario: &Scenario,
    ) -> (f64, f64) {
        let logits = self.logits(traits, scorecard, scenario);
        (sigmoid(logits.try_logit), sigmoid(logits.success_logit))
    }

    pub fn distribution(
        &self,
        traits: &LatentTraits,
        scorecard: &Scorecard,
        scenario: &Scenario,
    ) -> OutcomeDistribution {
        let (p_try, p_success) = self.probabilities(traits, scorecard, scenario);
        OutcomeDistribution {
            p_try,
            p_success,
            did_not_try: 1.0 - p_try,
            failed: p_try * (1.0 - p_success),
            success: p_try * p_success,
        }
    }

    /// One stochastic trial.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        traits: &LatentTraits,
        scorecard: &Scorecard,
        scenario: &Scenario,
        sigma: f64,
        rng: &mut R,
    ) -> Outcome {
        let logits = self.logits(traits, scorecard, scenario);
        Self::sample_from_logits(logits, sigma, rng)
    }

    /// One trial from precomputed logits.
    ///
    /// Always consumes four variates in the order `z_try, z_success, u_try,
    /// u_success`, whichever branch is taken, so two runs on the same stream
    /// stay aligned trial by trial.
    pub fn sample_from_logits<R: Rng + ?Sized>(
        logits: StageLogits,
        sigma: f64,
        rng: &mut R,
    ) -> Outcome {
        let z_try: f64 = rng.sample(StandardNormal);
        let z_success: f64 = rng.sample(StandardNormal);
        let u_try: f64 = rng.gen();
        let u_success: f64 = rng.gen();

        let p_try = sigmoid(logits.try_logit + sigma * z_try);
        if u_try > p_try {
            return Outcome::DidNotTry;
        }
        let p_success = sigmoid(logits.success_logit + sigma * z_success);
        if u_success > p_success {
            Outcome::Failed
        } else {
            Outcome::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use synthpop_core::models::ScenarioCatalog;

    fn traits() -> LatentTraits {
        LatentTraits {
            capability_mean: 0.6,
            trust_mean: 0.5,
            friction_tolerance_mean: 0.4,
            exploration_prob: 0.7,
        }
    }

    fn baseline() -> Scenario {
        ScenarioCatalog::builtin().get("baseline").unwrap().clone()
    }

    #[test]
    fn sigmoid_is_clamped() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid(1e6), PROBABILITY_CEILING);
        assert_eq!(sigmoid(-1e6), PROBABILITY_FLOOR);
        assert_eq!(sigmoid(f64::INFINITY), PROBABILITY_CEILING);
        assert_eq!(sigmoid(f64::NEG_INFINITY), PROBABILITY_FLOOR);
    }

    #[test]
    fn distribution_sums_to_one() {
        let model = OutcomeModel::new(&ModelConfig::default());
        let sc = Scorecard::new("f", 0.3, 0.4, 0.5, 0.6);
        let d = model.distribution(&traits(), &sc, &baseline());
        assert!((d.did_not_try + d.failed + d.success - 1.0).abs() < 1e-12);
    }

    #[test]
    fn harder_scorecard_lowers_both_stages() {
        let model = OutcomeModel::new(&ModelConfig::default());
        let easy = Scorecard::new("easy", 0.1, 0.1, 0.1, 0.1);
        let hard = Scorecard::new("hard", 0.9, 0.9, 0.9, 0.9);
        let (t_easy, s_easy) = model.probabilities(&traits(), &easy, &baseline());
        let (t_hard, s_hard) = model.probabilities(&traits(), &hard, &baseline());
        assert!(t_hard < t_easy);
        assert!(s_hard < s_easy);
    }

    #[test]
    fn zero_sigma_matches_probabilities_in_frequency() {
        let model = OutcomeModel::new(&ModelConfig::default());
        let sc = Scorecard::new("f", 0.5, 0.5, 0.5, 0.5);
        let scenario = baseline();
        let d = model.distribution(&traits(), &sc, &scenario);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let n = 20_000;
        let mut successes = 0;
        for _ in 0..n {
            if model.sample(&traits(), &sc, &scenario, 0.0, &mut rng) == Outcome::Success {
                successes += 1;
            }
        }
        let observed = f64::from(successes) / f64::from(n);
        assert!((observed - d.success).abs() < 0.02, "{observed} vs {}", d.success);
    }

    #[test]
    fn every_trial_consumes_the_same_variates() {
        let logits_low = StageLogits {
            try_logit: -50.0,
            success_logit: 0.0,
        };
        let logits_high = StageLogits {
            try_logit: 50.0,
            success_logit: 50.0,
        };
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            OutcomeModel::sample_from_logits(logits_low, 0.1, &mut a);
            OutcomeModel::sample_from_logits(logits_high, 0.1, &mut b);
        }
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
