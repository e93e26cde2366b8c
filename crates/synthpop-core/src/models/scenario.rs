use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{SynthpopError, SynthpopResult};

/// Usage-context modifiers applied on top of a scorecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Signed, roughly [-1, 1].
    pub motivation_modifier: f64,
    /// Signed, roughly [-1, 1].
    pub trust_modifier: f64,
    /// Signed, roughly [-1, 1]. Positive means more friction.
    pub friction_modifier: f64,
    /// [0, 1].
    pub task_criticality: f64,
}

impl Scenario {
    fn validate(&self) -> SynthpopResult<()> {
        let modifiers = [
            ("motivation_modifier", self.motivation_modifier),
            ("trust_modifier", self.trust_modifier),
            ("friction_modifier", self.friction_modifier),
        ];
        for (field, value) in modifiers {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(SynthpopError::validation(
                    format!("scenarios.{}.{field}", self.id),
                    format!("must be within [-1, 1], got {value}"),
                ));
            }
        }
        if !self.task_criticality.is_finite() || !(0.0..=1.0).contains(&self.task_criticality) {
            return Err(SynthpopError::validation(
                format!("scenarios.{}.task_criticality", self.id),
                format!("must be within [0, 1], got {}", self.task_criticality),
            ));
        }
        Ok(())
    }
}

/// Immutable lookup table of scenarios, loaded once and injected where needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range modifiers.
    pub fn new(scenarios: Vec<Scenario>) -> SynthpopResult<Self> {
        if scenarios.is_empty() {
            return Err(SynthpopError::validation(
                "scenarios",
                "catalog must contain at least one scenario",
            ));
        }
        let mut seen = HashSet::new();
        for scenario in &scenarios {
            if !seen.insert(scenario.id.as_str()) {
                return Err(SynthpopError::validation(
                    "scenarios",
                    format!("duplicate scenario id '{}'", scenario.id),
                ));
            }
            scenario.validate()?;
        }
        Ok(Self { scenarios })
    }

    /// The built-in catalog: baseline, crisis, first-use.
    pub fn builtin() -> Self {
        Self {
            scenarios: vec![
                Scenario {
                    id: "baseline".to_string(),
                    name: "Baseline".to_string(),
                    description: "Typical usage with no external pressure".to_string(),
                    motivation_modifier: 0.0,
                    trust_modifier: 0.0,
                    friction_modifier: 0.0,
                    task_criticality: 0.5,
                },
                Scenario {
                    id: "crisis".to_string(),
                    name: "Crisis".to_string(),
                    description: "Urgent, high-stakes task under time pressure".to_string(),
                    motivation_modifier: 0.2,
                    trust_modifier: -0.2,
                    friction_modifier: 0.3,
                    task_criticality: 0.9,
                },
                Scenario {
                    id: "first-use".to_string(),
                    name: "First use".to_string(),
                    description: "First contact with the feature, no prior setup".to_string(),
                    motivation_modifier: 0.1,
                    trust_modifier: -0.1,
                    friction_modifier: 0.2,
                    task_criticality: 0.3,
                },
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn list(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
