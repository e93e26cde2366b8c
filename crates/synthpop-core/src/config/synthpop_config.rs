//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ComparisonConfig, EngineConfig, ModelConfig, ObservabilityConfig, RegionConfig,
    SensitivityConfig,
};
use crate::errors::{ConfigError, SynthpopResult};
use crate::models::{Scenario, ScenarioCatalog};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SYNTHPOP_*`)
/// 2. TOML file passed to [`SynthpopConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SynthpopConfig {
    pub simulation: EngineConfig,
    pub model: ModelConfig,
    pub regions: RegionConfig,
    pub sensitivity: SensitivityConfig,
    pub comparison: ComparisonConfig,
    pub observability: ObservabilityConfig,
    /// Scenario catalog. Empty means the built-in catalog.
    pub scenarios: Vec<Scenario>,
}

impl SynthpopConfig {
    /// Load from an optional TOML file, then apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    })?;
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (no env overrides).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SYNTHPOP_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SYNTHPOP_WORKER_THREADS") {
            self.simulation.worker_threads = Some(parse_env("SYNTHPOP_WORKER_THREADS", &v)?);
        }
        if let Some(v) = lookup("SYNTHPOP_DEFAULT_N_EXECUTIONS") {
            self.simulation.default_n_executions = parse_env("SYNTHPOP_DEFAULT_N_EXECUTIONS", &v)?;
        }
        if let Some(v) = lookup("SYNTHPOP_DEFAULT_SIGMA") {
            self.simulation.default_sigma = parse_env("SYNTHPOP_DEFAULT_SIGMA", &v)?;
        }
        if let Some(v) = lookup("SYNTHPOP_MAX_CONCURRENT_RUNS") {
            self.sensitivity.max_concurrent_runs = parse_env("SYNTHPOP_MAX_CONCURRENT_RUNS", &v)?;
        }
        if let Some(v) = lookup("SYNTHPOP_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = lookup("SYNTHPOP_LOG_JSON") {
            self.observability.json = parse_env("SYNTHPOP_LOG_JSON", &v)?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if sim.min_n_executions < crate::constants::MIN_N_EXECUTIONS {
            return Err(invalid(
                "simulation.min_n_executions",
                format!("must be >= {}", crate::constants::MIN_N_EXECUTIONS),
            ));
        }
        if sim.max_n_executions < sim.min_n_executions {
            return Err(invalid(
                "simulation.max_n_executions",
                "must be >= simulation.min_n_executions",
            ));
        }
        if !(sim.min_n_executions..=sim.max_n_executions).contains(&sim.default_n_executions) {
            return Err(invalid(
                "simulation.default_n_executions",
                "must lie within [min_n_executions, max_n_executions]",
            ));
        }
        if !sim.default_sigma.is_finite() || sim.default_sigma < 0.0 {
            return Err(invalid("simulation.default_sigma", "must be finite and >= 0"));
        }
        if sim.worker_threads == Some(0) {
            return Err(invalid("simulation.worker_threads", "must be greater than 0"));
        }

        for (field, value) in self.model.magnitudes() {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, "weights are magnitudes and must be finite and >= 0"));
            }
        }
        if !self.model.try_weights.bias.is_finite() || !self.model.success_weights.bias.is_finite()
        {
            return Err(invalid("model.bias", "must be finite"));
        }

        if self.regions.min_samples == 0 {
            return Err(invalid("regions.min_samples", "must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.regions.min_region_fraction) {
            return Err(invalid("regions.min_region_fraction", "must be between 0.0 and 1.0"));
        }
        if !(0.0..=1.0).contains(&self.regions.default_min_failure_rate) {
            return Err(invalid(
                "regions.default_min_failure_rate",
                "must be between 0.0 and 1.0",
            ));
        }

        if self.sensitivity.default_deltas.is_empty() {
            return Err(invalid("sensitivity.default_deltas", "must not be empty"));
        }
        if self
            .sensitivity
            .default_deltas
            .iter()
            .any(|d| !d.is_finite() || *d <= 0.0 || *d > 1.0)
        {
            return Err(invalid("sensitivity.default_deltas", "each delta must be in (0, 1]"));
        }
        if self.sensitivity.max_concurrent_runs == 0 {
            return Err(invalid("sensitivity.max_concurrent_runs", "must be greater than 0"));
        }

        let cmp = &self.comparison;
        if cmp.min_simulations < 2 || cmp.max_simulations < cmp.min_simulations {
            return Err(invalid(
                "comparison",
                "require 2 <= min_simulations <= max_simulations",
            ));
        }
        if !(0.0..=1.0).contains(&cmp.region_min_failure_rate) {
            return Err(invalid(
                "comparison.region_min_failure_rate",
                "must be between 0.0 and 1.0",
            ));
        }

        self.scenario_catalog().map_err(|e| invalid("scenarios", e.to_string()))?;
        Ok(())
    }

    /// The configured scenario catalog, or the built-in one when none is configured.
    pub fn scenario_catalog(&self) -> SynthpopResult<ScenarioCatalog> {
        if self.scenarios.is_empty() {
            Ok(ScenarioCatalog::builtin())
        } else {
            ScenarioCatalog::new(self.scenarios.clone())
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.into(),
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::ParseError {
        path: format!("${key}"),
        message: format!("cannot parse '{raw}'"),
    })
}
