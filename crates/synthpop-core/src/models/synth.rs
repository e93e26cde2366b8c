use serde::{Deserialize, Serialize};

/// Raw observable attributes of a synth, each expected in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observables {
    pub digital_literacy: f64,
    pub similar_tool_experience: f64,
    pub motor_ability: f64,
    pub time_availability: f64,
    pub domain_expertise: f64,
}

impl Observables {
    /// Attribute names in declaration order.
    pub const NAMES: [&'static str; 5] = [
        "digital_literacy",
        "similar_tool_experience",
        "motor_ability",
        "time_availability",
        "domain_expertise",
    ];

    /// `(name, value)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            (Self::NAMES[0], self.digital_literacy),
            (Self::NAMES[1], self.similar_tool_experience),
            (Self::NAMES[2], self.motor_ability),
            (Self::NAMES[3], self.time_availability),
            (Self::NAMES[4], self.domain_expertise),
        ]
    }

    /// First attribute that is non-finite or outside [0, 1], if any.
    pub fn first_invalid(&self) -> Option<(&'static str, f64)> {
        self.entries()
            .into_iter()
            .find(|(_, v)| !v.is_finite() || !(0.0..=1.0).contains(v))
    }

    pub fn is_valid(&self) -> bool {
        self.first_invalid().is_none()
    }
}

/// A synthetic persona. Produced by an external generator, read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synth {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub observables: Observables,
}

impl Synth {
    pub fn new(id: impl Into<String>, name: impl Into<String>, observables: Observables) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            observables,
        }
    }
}
