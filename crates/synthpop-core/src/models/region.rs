use std::fmt;

use serde::{Deserialize, Serialize};

use super::{LatentTraits, TraitAttribute};

/// Comparison used by a rule condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOperator {
    LessOrEqual,
    Greater,
}

impl RuleOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
        }
    }

    pub fn matches(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::LessOrEqual => value <= threshold,
            Self::Greater => value > threshold,
        }
    }
}

/// `attribute operator threshold`, e.g. `trust_mean <= 0.4`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub attribute: TraitAttribute,
    pub operator: RuleOperator,
    pub threshold: f64,
}

impl RuleCondition {
    pub fn new(attribute: TraitAttribute, operator: RuleOperator, threshold: f64) -> Self {
        Self {
            attribute,
            operator,
            threshold,
        }
    }

    pub fn matches(&self, traits: &LatentTraits) -> bool {
        self.operator.matches(self.attribute.value_of(traits), self.threshold)
    }
}

impl fmt::Display for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.attribute,
            self.operator.symbol(),
            self.threshold
        )
    }
}

/// A rule-defined synth subgroup with its outcome rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub simulation_id: String,
    pub rules: Vec<RuleCondition>,
    pub rule_text: String,
    pub synth_count: usize,
    /// Percentage of the simulation's synths, in [0, 100].
    pub synth_percentage: f64,
    pub did_not_try_rate: f64,
    pub failed_rate: f64,
    pub success_rate: f64,
    /// `failed_rate - simulation failed_rate`.
    pub failure_delta: f64,
}
