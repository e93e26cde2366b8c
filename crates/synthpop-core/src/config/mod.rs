//! Configuration system for synthpop.
//! TOML-based, layered resolution: env > file > defaults.

pub mod analysis_config;
pub mod defaults;
pub mod engine_config;
pub mod model_config;
pub mod observability_config;
pub mod synthpop_config;

pub use analysis_config::{ComparisonConfig, RegionConfig, SensitivityConfig};
pub use engine_config::EngineConfig;
pub use model_config::{ModelConfig, SuccessWeights, TryWeights};
pub use observability_config::ObservabilityConfig;
pub use synthpop_config::SynthpopConfig;
