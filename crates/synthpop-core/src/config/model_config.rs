use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights of the try-stage logit. Signs are fixed by the model; every
/// weight here is a non-negative magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TryWeights {
    pub exploration: f64,
    pub motivation: f64,
    pub complexity: f64,
    pub initial_effort: f64,
    pub task_criticality: f64,
    /// Free intercept (either sign).
    pub bias: f64,
}

impl Default for TryWeights {
    fn default() -> Self {
        Self {
            exploration: defaults::DEFAULT_TRY_EXPLORATION,
            motivation: defaults::DEFAULT_TRY_MOTIVATION,
            complexity: defaults::DEFAULT_TRY_COMPLEXITY,
            initial_effort: defaults::DEFAULT_TRY_INITIAL_EFFORT,
            task_criticality: defaults::DEFAULT_TRY_TASK_CRITICALITY,
            bias: 0.0,
        }
    }
}

/// Weights of the success-stage logit. Non-negative magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessWeights {
    pub capability: f64,
    pub trust: f64,
    pub trust_modifier: f64,
    pub friction_tolerance: f64,
    pub perceived_risk: f64,
    pub friction_modifier: f64,
    pub task_criticality: f64,
    pub time_to_value: f64,
    /// Free intercept (either sign).
    pub bias: f64,
}

impl Default for SuccessWeights {
    fn default() -> Self {
        Self {
            capability: defaults::DEFAULT_SUCCESS_CAPABILITY,
            trust: defaults::DEFAULT_SUCCESS_TRUST,
            trust_modifier: defaults::DEFAULT_SUCCESS_TRUST_MODIFIER,
            friction_tolerance: defaults::DEFAULT_SUCCESS_FRICTION_TOLERANCE,
            perceived_risk: defaults::DEFAULT_SUCCESS_PERCEIVED_RISK,
            friction_modifier: defaults::DEFAULT_SUCCESS_FRICTION_MODIFIER,
            task_criticality: defaults::DEFAULT_SUCCESS_TASK_CRITICALITY,
            time_to_value: defaults::DEFAULT_SUCCESS_TIME_TO_VALUE,
            bias: 0.0,
        }
    }
}

/// `[model]` section: outcome model calibration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub try_weights: TryWeights,
    pub success_weights: SuccessWeights,
}

impl ModelConfig {
    /// Named magnitudes that must be finite and non-negative.
    pub fn magnitudes(&self) -> Vec<(&'static str, f64)> {
        let t = &self.try_weights;
        let s = &self.success_weights;
        vec![
            ("model.try_weights.exploration", t.exploration),
            ("model.try_weights.motivation", t.motivation),
            ("model.try_weights.complexity", t.complexity),
            ("model.try_weights.initial_effort", t.initial_effort),
            ("model.try_weights.task_criticality", t.task_criticality),
            ("model.success_weights.capability", s.capability),
            ("model.success_weights.trust", s.trust),
            ("model.success_weights.trust_modifier", s.trust_modifier),
            ("model.success_weights.friction_tolerance", s.friction_tolerance),
            ("model.success_weights.perceived_risk", s.perceived_risk),
            ("model.success_weights.friction_modifier", s.friction_modifier),
            ("model.success_weights.task_criticality", s.task_criticality),
            ("model.success_weights.time_to_value", s.time_to_value),
        ]
    }
}
