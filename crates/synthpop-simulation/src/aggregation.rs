//! Population aggregation of per-synth rates.

use synthpop_core::models::{AggregatedOutcomes, SynthOutcome};

/// Unweighted mean of per-synth rates.
///
/// Sums strictly in iteration order, so the same outcomes in the same order
/// give bit-identical results. Empty input yields all zeros.
pub fn aggregate<'a, I>(outcomes: I) -> AggregatedOutcomes
where
    I: IntoIterator<Item = &'a SynthOutcome>,
{
    let mut dnt = 0.0;
    let mut failed = 0.0;
    let mut success = 0.0;
    let mut n = 0usize;
    for o in outcomes {
        dnt += o.did_not_try_rate;
        failed += o.failed_rate;
        success += o.success_rate;
        n += 1;
    }
    if n == 0 {
        return AggregatedOutcomes::default();
    }
    let n = n as f64;
    AggregatedOutcomes {
        did_not_try_rate: dnt / n,
        failed_rate: failed / n,
        success_rate: success / n,
    }
}
