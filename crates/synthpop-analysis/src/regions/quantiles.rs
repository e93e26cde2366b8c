//! Quantile cut points for rule thresholds.

use synthpop_core::constants::{REGION_QUANTILES, REGION_THRESHOLD_DECIMALS};

/// Quantile of already-sorted data with linear interpolation between closest
/// ranks (`pos = q·(n − 1)`). `None` on empty input.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Rounded, deduplicated quartile cut points, ascending.
pub fn cut_points(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let mut cuts: Vec<f64> = REGION_QUANTILES
        .iter()
        .filter_map(|&q| quantile(&sorted, q))
        .map(|v| round_to(v, REGION_THRESHOLD_DECIMALS))
        .collect();
    cuts.dedup();
    cuts
}
