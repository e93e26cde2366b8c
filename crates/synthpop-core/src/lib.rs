//! # synthpop-core
//!
//! Foundation crate for the synthpop simulation engine.
//! Defines all models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SynthpopConfig;
pub use errors::{SynthpopError, SynthpopResult};
pub use models::{
    AggregatedOutcomes, LatentTraits, Observables, Scenario, ScenarioCatalog, Scorecard,
    ScorecardDimension, SimulationConfig, SimulationRun, SimulationStatus, Synth, SynthOutcome,
    TraitAttribute,
};
pub use traits::{Cancellable, CancellationToken};
