//! One-at-a-time sensitivity analysis of scorecard dimensions.
//!
//! Each dimension is moved up and down by every delta (clamped to [0, 1]) and
//! the population re-simulated with the baseline seed. Elasticities of the
//! success rate are averaged into a per-dimension index and ranked.

pub mod analyzer;
pub mod elasticity;
pub mod perturbation;

pub use analyzer::SensitivityAnalyzer;
