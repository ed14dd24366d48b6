//! Index binning: squeeze envelope steps into the half-columns available.
//!
//! Consecutive steps are split into `target` buckets by index; each bucket
//! keeps the lowest `lo` and highest `hi` it saw, so peaks survive the
//! reduction.

use crate::core::bounds::EnvelopeStep;

/// Reduce `steps` to at most `target` entries.
///
/// Short inputs pass through untouched. A bucket reports the x of its middle
/// step.
#[must_use]
pub fn bin_index(steps: &[EnvelopeStep], target: usize) -> Vec<EnvelopeStep> {
    let n = steps.len();
    if target == 0 {
        return Vec::new();
    }
    if n <= target {
        return steps.to_vec();
    }

    (0..target)
        .map(|i| {
            let start = i * n / target;
            let end = (i + 1) * n / target;
            let bucket = &steps[start..end];
            let (lo, hi) = bucket
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                    (lo.min(s.lo), hi.max(s.hi))
                });
            EnvelopeStep {
                x: bucket[bucket.len() / 2].x,
                lo,
                hi,
            }
        })
        .collect()
}
