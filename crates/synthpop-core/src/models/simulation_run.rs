use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{SynthpopError, SynthpopResult};

/// Monte Carlo parameters of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Trials per synth.
    pub n_executions: u32,
    /// Standard deviation of the Gaussian perturbation inside each sigmoid.
    pub sigma: f64,
    pub seed: u64,
}

impl SimulationConfig {
    /// Check bounds. `max_n_executions` comes from the engine config.
    pub fn validate(&self, min_n_executions: u32, max_n_executions: u32) -> SynthpopResult<()> {
        if self.n_executions < min_n_executions {
            return Err(SynthpopError::validation(
                "n_executions",
                format!("must be >= {min_n_executions}, got {}", self.n_executions),
            ));
        }
        if self.n_executions > max_n_executions {
            return Err(SynthpopError::validation(
                "n_executions",
                format!("must be <= {max_n_executions}, got {}", self.n_executions),
            ));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(SynthpopError::validation(
                "sigma",
                format!("must be finite and >= 0, got {}", self.sigma),
            ));
        }
        Ok(())
    }
}

/// Run lifecycle: `pending -> running -> completed | failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl SimulationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    fn can_transition_to(self, next: SimulationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Running)
                | (Self::Pending, Self::Failed)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Failed)
        )
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulationStatus {
    type Err = SynthpopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(SynthpopError::validation(
                "status",
                format!("unknown simulation status '{other}'"),
            )),
        }
    }
}

/// Population-level outcome rates (unweighted mean over synths).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedOutcomes {
    pub did_not_try_rate: f64,
    pub failed_rate: f64,
    pub success_rate: f64,
}

impl AggregatedOutcomes {
    pub fn total(&self) -> f64 {
        self.did_not_try_rate + self.failed_rate + self.success_rate
    }
}

/// A single simulation execution and its lifecycle metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub id: String,
    pub scorecard_id: String,
    pub scenario_id: String,
    pub synth_ids: Vec<String>,
    pub config: SimulationConfig,
    pub status: SimulationStatus,
    /// Present only once `completed`.
    pub aggregated_outcomes: Option<AggregatedOutcomes>,
    /// Size of the requested population.
    pub total_synths: usize,
    /// Synths dropped from aggregation because of corrupt observables.
    pub excluded_synths: usize,
    #[serde(default)]
    pub excluded_synth_ids: Vec<String>,
    pub failure_reason: Option<String>,
    pub execution_time_seconds: f64,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SimulationRun {
    /// A new run in `pending`.
    pub fn new(
        scorecard_id: impl Into<String>,
        scenario_id: impl Into<String>,
        synth_ids: Vec<String>,
        config: SimulationConfig,
    ) -> Self {
        let total_synths = synth_ids.len();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            scorecard_id: scorecard_id.into(),
            scenario_id: scenario_id.into(),
            synth_ids,
            config,
            status: SimulationStatus::Pending,
            aggregated_outcomes: None,
            total_synths,
            excluded_synths: 0,
            excluded_synth_ids: Vec::new(),
            failure_reason: None,
            execution_time_seconds: 0.0,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SimulationStatus::Completed
    }

    /// `pending -> running`.
    pub fn start(&mut self) -> SynthpopResult<()> {
        self.transition(SimulationStatus::Running)?;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// `running -> completed`, attaching the aggregated outcomes.
    pub fn complete(
        &mut self,
        aggregated: AggregatedOutcomes,
        excluded_synth_ids: Vec<String>,
        execution_time_seconds: f64,
    ) -> SynthpopResult<()> {
        self.transition(SimulationStatus::Completed)?;
        self.aggregated_outcomes = Some(aggregated);
        self.excluded_synths = excluded_synth_ids.len();
        self.excluded_synth_ids = excluded_synth_ids;
        self.execution_time_seconds = execution_time_seconds;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// `pending | running -> failed`. Never carries aggregated outcomes.
    pub fn fail(
        &mut self,
        reason: impl Into<String>,
        execution_time_seconds: f64,
    ) -> SynthpopResult<()> {
        self.transition(SimulationStatus::Failed)?;
        self.aggregated_outcomes = None;
        self.failure_reason = Some(reason.into());
        self.execution_time_seconds = execution_time_seconds;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, next: SimulationStatus) -> SynthpopResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(SynthpopError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }
}
