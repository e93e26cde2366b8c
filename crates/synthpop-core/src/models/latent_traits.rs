use std::fmt;

use serde::{Deserialize, Serialize};

/// Behavioral traits derived from a synth's observables. Each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatentTraits {
    pub capability_mean: f64,
    pub trust_mean: f64,
    pub friction_tolerance_mean: f64,
    pub exploration_prob: f64,
}

impl LatentTraits {
    pub fn get(&self, attribute: TraitAttribute) -> f64 {
        attribute.value_of(self)
    }
}

/// The four latent-trait attributes, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitAttribute {
    CapabilityMean,
    TrustMean,
    FrictionToleranceMean,
    ExplorationProb,
}

impl TraitAttribute {
    pub const ALL: [TraitAttribute; 4] = [
        Self::CapabilityMean,
        Self::TrustMean,
        Self::FrictionToleranceMean,
        Self::ExplorationProb,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CapabilityMean => "capability_mean",
            Self::TrustMean => "trust_mean",
            Self::FrictionToleranceMean => "friction_tolerance_mean",
            Self::ExplorationProb => "exploration_prob",
        }
    }

    pub fn value_of(self, traits: &LatentTraits) -> f64 {
        match self {
            Self::CapabilityMean => traits.capability_mean,
            Self::TrustMean => traits.trust_mean,
            Self::FrictionToleranceMean => traits.friction_tolerance_mean,
            Self::ExplorationProb => traits.exploration_prob,
        }
    }
}

impl fmt::Display for TraitAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
