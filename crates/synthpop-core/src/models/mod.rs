//! Domain models shared by the engine, analyzers, storage, and service layer.

pub mod comparison;
pub mod latent_traits;
pub mod region;
pub mod scenario;
pub mod scorecard;
pub mod sensitivity;
pub mod simulation_run;
pub mod synth;
pub mod synth_outcome;

pub use comparison::{AffectedRegion, ComparisonResult, SimulationFailedRate, SimulationSummary};
pub use latent_traits::{LatentTraits, TraitAttribute};
pub use region::{Region, RuleCondition, RuleOperator};
pub use scenario::{Scenario, ScenarioCatalog};
pub use scorecard::{Scorecard, ScorecardDimension};
pub use sensitivity::{DeltaOutcome, Direction, SensitivityReport, SensitivityResult};
pub use simulation_run::{AggregatedOutcomes, SimulationConfig, SimulationRun, SimulationStatus};
pub use synth::{Observables, Synth};
pub use synth_outcome::{Outcome, OutcomeCounts, SynthOutcome};
