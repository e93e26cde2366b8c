//! # synthpop-analysis
//!
//! Post-simulation analyses over completed runs:
//!
//! - [`regions`]: rule induction over latent traits to find failure-prone subgroups.
//! - [`sensitivity`]: one-at-a-time scorecard perturbation ranked by elasticity.
//! - [`comparison`]: regions whose failure rates diverge most across 2..=5 runs.

pub mod comparison;
pub mod regions;
pub mod sensitivity;

pub use comparison::ComparisonService;
pub use regions::RegionAnalyzer;
pub use sensitivity::SensitivityAnalyzer;
