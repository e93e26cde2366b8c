//! Elasticity of the success rate and the per-dimension sensitivity index.

use synthpop_core::models::{DeltaOutcome, SensitivityResult};

/// `|Δs / s0| ÷ |Δv / v0|`.
///
/// A zero baseline value makes the denominator `|Δv|`; a zero baseline success
/// rate makes the numerator `|Δs|`. `None` when the value did not move.
pub fn elasticity(
    baseline_value: f64,
    perturbed_value: f64,
    baseline_success: f64,
    perturbed_success: f64,
) -> Option<f64> {
    let dv = perturbed_value - baseline_value;
    if dv == 0.0 {
        return None;
    }
    let ds = perturbed_success - baseline_success;

    let numerator = if baseline_success == 0.0 {
        ds.abs()
    } else {
        (ds / baseline_success).abs()
    };
    let denominator = if baseline_value == 0.0 {
        dv.abs()
    } else {
        (dv / baseline_value).abs()
    };
    Some(numerator / denominator)
}

/// Mean over deltas of the mean elasticity over the directions available at
/// that delta. Deltas with no available direction are skipped; 0 when none.
pub fn sensitivity_index(deltas: &[f64], outcomes: &[DeltaOutcome]) -> f64 {
    let per_delta: Vec<f64> = deltas
        .iter()
        .filter_map(|&delta| {
            let values: Vec<f64> = outcomes
                .iter()
                .filter(|o| o.delta == delta)
                .filter_map(|o| o.elasticity)
                .collect();
            (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
        })
        .collect();

    if per_delta.is_empty() {
        0.0
    } else {
        per_delta.iter().sum::<f64>() / per_delta.len() as f64
    }
}

/// Sort by descending index and assign ranks from 1. Ties keep their input
/// order.
pub fn rank(results: &mut [SensitivityResult]) {
    results.sort_by(|a, b| b.sensitivity_index.total_cmp(&a.sensitivity_index));
    for (i, result) in results.iter_mut().enumerate() {
        result.rank = i + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthpop_core::models::{AggregatedOutcomes, Direction, ScorecardDimension};

    fn outcome(delta: f64, direction: Direction, elasticity: Option<f64>) -> DeltaOutcome {
        DeltaOutcome {
            delta,
            direction,
            perturbed_value: 0.0,
            aggregated_outcomes: AggregatedOutcomes::default(),
            elasticity,
        }
    }

    #[test]
    fn relative_changes() {
        // success 0.5 → 0.45 (−10%), value 0.5 → 0.55 (+10%)
        let e = elasticity(0.5, 0.55, 0.5, 0.45).unwrap();
        assert!((e - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_baselines_fall_back_to_absolute_changes() {
        let e = elasticity(0.0, 0.1, 0.5, 0.4).unwrap();
        assert!((e - 0.2 / 0.1).abs() < 1e-9);

        let e = elasticity(0.5, 0.6, 0.0, 0.02).unwrap();
        assert!((e - 0.02 / 0.2).abs() < 1e-9);
    }

    #[test]
    fn unchanged_value_has_no_elasticity() {
        assert_eq!(elasticity(1.0, 1.0, 0.5, 0.5), None);
    }

    #[test]
    fn index_averages_available_directions_then_deltas() {
        let outcomes = vec![
            outcome(0.05, Direction::Increase, Some(1.0)),
            outcome(0.05, Direction::Decrease, Some(3.0)),
            outcome(0.10, Direction::Increase, None),
            outcome(0.10, Direction::Decrease, Some(4.0)),
        ];
        // (2.0 + 4.0) / 2
        assert!((sensitivity_index(&[0.05, 0.10], &outcomes) - 3.0).abs() < 1e-12);
        assert_eq!(sensitivity_index(&[0.2], &outcomes), 0.0);
    }

    #[test]
    fn ties_keep_declaration_order() {
        let mut results: Vec<SensitivityResult> = ScorecardDimension::ALL
            .iter()
            .zip([0.5, 1.0, 0.5, 0.0])
            .map(|(&dimension, index)| SensitivityResult {
                dimension,
                baseline_value: 0.5,
                deltas_tested: vec![0.1],
                outcomes_by_delta: vec![],
                sensitivity_index: index,
                rank: 0,
            })
            .collect();
        rank(&mut results);
        let order: Vec<_> = results.iter().map(|r| (r.dimension, r.rank)).collect();
        assert_eq!(
            order,
            vec![
                (ScorecardDimension::InitialEffort, 1),
                (ScorecardDimension::Complexity, 2),
                (ScorecardDimension::PerceivedRisk, 3),
                (ScorecardDimension::TimeToValue, 4),
            ]
        );
    }
}
