//! Perturbation plan: dimension × delta × direction.

use synthpop_core::errors::{SynthpopError, SynthpopResult};
use synthpop_core::models::{Direction, Scorecard, ScorecardDimension};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    pub dimension: ScorecardDimension,
    pub delta: f64,
    pub direction: Direction,
    pub baseline_value: f64,
    /// `baseline ± delta`, clamped to [0, 1].
    pub perturbed_value: f64,
}

impl Perturbation {
    pub fn new(
        scorecard: &Scorecard,
        dimension: ScorecardDimension,
        delta: f64,
        direction: Direction,
    ) -> Self {
        let baseline_value = scorecard.get(dimension);
        Self {
            dimension,
            delta,
            direction,
            baseline_value,
            perturbed_value: (baseline_value + direction.sign() * delta).clamp(0.0, 1.0),
        }
    }

    pub fn apply(&self, scorecard: &Scorecard) -> Scorecard {
        scorecard.with_dimension(self.dimension, self.perturbed_value)
    }
}

/// Deltas must be non-empty, unique, finite, and within (0, 1].
pub fn validate_deltas(deltas: &[f64]) -> SynthpopResult<()> {
    if deltas.is_empty() {
        return Err(SynthpopError::validation(
            "deltas",
            "at least one delta is required",
        ));
    }
    for (i, &delta) in deltas.iter().enumerate() {
        if !delta.is_finite() || delta <= 0.0 || delta > 1.0 {
            return Err(SynthpopError::validation(
                "deltas",
                format!("each delta must be within (0, 1], got {delta}"),
            ));
        }
        if deltas[..i].contains(&delta) {
            return Err(SynthpopError::validation(
                "deltas",
                format!("duplicate delta {delta}"),
            ));
        }
    }
    Ok(())
}

/// Every perturbation, grouped by dimension (declaration order), then delta,
/// then `+` before `−`.
pub fn plan(scorecard: &Scorecard, deltas: &[f64]) -> Vec<Perturbation> {
    ScorecardDimension::ALL
        .iter()
        .flat_map(move |&dimension| {
            deltas.iter().flat_map(move |&delta| {
                Direction::BOTH.iter().map(move |&direction| {
                    Perturbation::new(scorecard, dimension, delta, direction)
                })
            })
        })
        .collect()
}
