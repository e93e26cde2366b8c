//! Failure-region discovery.
//!
//! candidate generation ([`rules`]) → evaluation → filter → rank ([`analyzer`]).
//! Cut points come from per-attribute quartiles ([`quantiles`]).

pub mod analyzer;
pub mod quantiles;
pub mod rules;

pub use analyzer::RegionAnalyzer;
pub use rules::Rule;
