use serde::{Deserialize, Serialize};

use super::defaults;

/// `[simulation]` section: run bounds and worker pool sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Trials per synth when a request does not specify one.
    pub default_n_executions: u32,
    pub min_n_executions: u32,
    pub max_n_executions: u32,
    pub default_sigma: f64,
    /// Worker threads for per-synth parallelism. `None` = one per CPU core.
    pub worker_threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_n_executions: defaults::DEFAULT_N_EXECUTIONS,
            min_n_executions: defaults::DEFAULT_MIN_N_EXECUTIONS,
            max_n_executions: defaults::DEFAULT_MAX_N_EXECUTIONS,
            default_sigma: defaults::DEFAULT_SIGMA,
            worker_threads: None,
        }
    }
}
