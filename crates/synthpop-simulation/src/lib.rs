//! # synthpop-simulation
//!
//! Monte Carlo estimation of adoption outcomes over a synth population.
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Observables → latent traits | [`derivation`] |
//! | Traits + scorecard + scenario → outcome | [`outcome_model`] |
//! | Per-synth seeded random stream | [`rng`] |
//! | Trials, tallies, lifecycle | [`engine`] |
//! | Population mean of per-synth rates | [`aggregation`] |
//!
//! Per-synth work runs on a bounded rayon pool. Every synth draws from its own
//! stream seeded by `(seed, synth_id)`, so results do not depend on scheduling.

pub mod aggregation;
pub mod derivation;
pub mod engine;
pub mod outcome_model;
pub mod rng;

pub use engine::{SimulationEngine, SimulationExecution, SimulationRequest};
pub use outcome_model::{OutcomeDistribution, OutcomeModel, StageLogits};
