//! Observables → latent traits.
//!
//! ```text
//! capability_mean         = 0.40·DL + 0.35·STE + 0.15·MA + 0.10·DE
//! trust_mean              = 0.60·STE + 0.40·DL
//! friction_tolerance_mean = 0.40·TA + 0.35·DL + 0.25·STE
//! exploration_prob        = 0.50·DL + 0.30·(1 − STE) + 0.20·TA
//! ```
//!
//! Every weight row sums to 1, so [0, 1] inputs give [0, 1] outputs.

use synthpop_core::errors::{SynthpopError, SynthpopResult};
use synthpop_core::models::{LatentTraits, Observables, Synth};

/// Pure mapping. Outputs are clamped to absorb floating-point rounding.
pub fn derive(obs: &Observables) -> LatentTraits {
    let dl = obs.digital_literacy;
    let ste = obs.similar_tool_experience;
    let ma = obs.motor_ability;
    let ta = obs.time_availability;
    let de = obs.domain_expertise;

    LatentTraits {
        capability_mean: unit(0.40 * dl + 0.35 * ste + 0.15 * ma + 0.10 * de),
        trust_mean: unit(0.60 * ste + 0.40 * dl),
        friction_tolerance_mean: unit(0.40 * ta + 0.35 * dl + 0.25 * ste),
        exploration_prob: unit(0.50 * dl + 0.30 * (1.0 - ste) + 0.20 * ta),
    }
}

/// Validate the synth's observables, then derive.
pub fn derive_checked(synth: &Synth) -> SynthpopResult<LatentTraits> {
    if let Some((attribute, value)) = synth.observables.first_invalid() {
        return Err(SynthpopError::InvalidObservable {
            synth_id: synth.id.clone(),
            attribute: attribute.to_string(),
            value,
        });
    }
    Ok(derive(&synth.observables))
}

fn unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(dl: f64, ste: f64, ma: f64, ta: f64, de: f64) -> Observables {
        Observables {
            digital_literacy: dl,
            similar_tool_experience: ste,
            motor_ability: ma,
            time_availability: ta,
            domain_expertise: de,
        }
    }

    #[test]
    fn all_ones_saturates_except_exploration() {
        let t = derive(&obs(1.0, 1.0, 1.0, 1.0, 1.0));
        assert!((t.capability_mean - 1.0).abs() < 1e-12);
        assert!((t.trust_mean - 1.0).abs() < 1e-12);
        assert!((t.friction_tolerance_mean - 1.0).abs() < 1e-12);
        // 0.5 + 0.3·0 + 0.2
        assert!((t.exploration_prob - 0.7).abs() < 1e-12);
    }

    #[test]
    fn all_zeros_only_explores_from_inexperience() {
        let t = derive(&obs(0.0, 0.0, 0.0, 0.0, 0.0));
        assert_eq!(t.capability_mean, 0.0);
        assert_eq!(t.trust_mean, 0.0);
        assert_eq!(t.friction_tolerance_mean, 0.0);
        assert!((t.exploration_prob - 0.3).abs() < 1e-12);
    }

    #[test]
    fn matches_hand_computed_values() {
        let t = derive(&obs(0.5, 0.4, 0.8, 0.6, 0.2));
        assert!((t.capability_mean - (0.20 + 0.14 + 0.12 + 0.02)).abs() < 1e-12);
        assert!((t.trust_mean - (0.24 + 0.20)).abs() < 1e-12);
        assert!((t.friction_tolerance_mean - (0.24 + 0.175 + 0.10)).abs() < 1e-12);
        assert!((t.exploration_prob - (0.25 + 0.18 + 0.12)).abs() < 1e-12);
    }

    #[test]
    fn derive_checked_rejects_corrupt_observables() {
        let synth = Synth::new("s-1", "Corrupt", obs(0.5, f64::NAN, 0.5, 0.5, 0.5));
        match derive_checked(&synth).unwrap_err() {
            SynthpopError::InvalidObservable {
                synth_id,
                attribute,
                ..
            } => {
                assert_eq!(synth_id, "s-1");
                assert_eq!(attribute, "similar_tool_experience");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
