use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{SynthpopError, SynthpopResult};

/// A feature's difficulty/risk profile. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub complexity: f64,
    pub initial_effort: f64,
    pub perceived_risk: f64,
    pub time_to_value: f64,
    pub created_at: DateTime<Utc>,
}

impl Scorecard {
    /// Create a scorecard with a fresh id.
    pub fn new(
        name: impl Into<String>,
        complexity: f64,
        initial_effort: f64,
        perceived_risk: f64,
        time_to_value: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            complexity,
            initial_effort,
            perceived_risk,
            time_to_value,
            created_at: Utc::now(),
        }
    }

    pub fn get(&self, dimension: ScorecardDimension) -> f64 {
        match dimension {
            ScorecardDimension::Complexity => self.complexity,
            ScorecardDimension::InitialEffort => self.initial_effort,
            ScorecardDimension::PerceivedRisk => self.perceived_risk,
            ScorecardDimension::TimeToValue => self.time_to_value,
        }
    }

    /// Copy of this scorecard with one dimension replaced. The id is kept so
    /// perturbed runs still reference the scorecard they were derived from.
    pub fn with_dimension(&self, dimension: ScorecardDimension, value: f64) -> Self {
        let mut copy = self.clone();
        match dimension {
            ScorecardDimension::Complexity => copy.complexity = value,
            ScorecardDimension::InitialEffort => copy.initial_effort = value,
            ScorecardDimension::PerceivedRisk => copy.perceived_risk = value,
            ScorecardDimension::TimeToValue => copy.time_to_value = value,
        }
        copy
    }

    /// Every dimension must be finite and within [0, 1].
    pub fn validate(&self) -> SynthpopResult<()> {
        for dimension in ScorecardDimension::ALL {
            let value = self.get(dimension);
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SynthpopError::validation(
                    dimension.name(),
                    format!("must be within [0, 1], got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// The four scorecard dimensions, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorecardDimension {
    Complexity,
    InitialEffort,
    PerceivedRisk,
    TimeToValue,
}

impl ScorecardDimension {
    pub const ALL: [ScorecardDimension; 4] = [
        Self::Complexity,
        Self::InitialEffort,
        Self::PerceivedRisk,
        Self::TimeToValue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Complexity => "complexity",
            Self::InitialEffort => "initial_effort",
            Self::PerceivedRisk => "perceived_risk",
            Self::TimeToValue => "time_to_value",
        }
    }
}

impl fmt::Display for ScorecardDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
