//! Pure per-group aggregates: summaries, box statistics, histogram bins.
//!
//! Nothing here looks at more than one group at a time.

use crate::core::{constants::WHISKER_IQR, error::EmptySeriesError};

/// Central value and bounds of one group's trials.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

fn sorted(series: &[f64]) -> Vec<f64> {
    let mut s = series.to_vec();
    s.sort_by(f64::total_cmp);
    s
}

/// Median of an already sorted, non-empty slice.
fn median_sorted(s: &[f64]) -> f64 {
    let n = s.len();
    if n % 2 == 1 {
        s[n / 2]
    } else {
        0.5 * (s[n / 2 - 1] + s[n / 2])
    }
}

/// Linear-interpolated percentile (`p` in `0..=1`) of a sorted, non-empty slice.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentile_sorted(s: &[f64], p: f64) -> f64 {
    let pos = p * (s.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    s[lo] + (s[hi] - s[lo]) * (pos - lo as f64)
}

/// `{median, min, max}` of a series.
pub fn summarize(series: &[f64]) -> Result<Summary, EmptySeriesError> {
    if series.is_empty() {
        return Err(EmptySeriesError);
    }
    let s = sorted(series);
    Ok(Summary {
        median: median_sorted(&s),
        min: s[0],
        max: s[s.len() - 1],
    })
}

/// Everything a box-and-whisker glyph needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest sample within `1.5 × IQR` below `q1`.
    pub whisker_lo: f64,
    /// Highest sample within `1.5 × IQR` above `q3`.
    pub whisker_hi: f64,
    pub mean: f64,
}

#[allow(clippy::cast_precision_loss)]
pub fn box_stats(series: &[f64]) -> Result<BoxStats, EmptySeriesError> {
    if series.is_empty() {
        return Err(EmptySeriesError);
    }
    let s = sorted(series);
    let q1 = percentile_sorted(&s, 0.25);
    let q3 = percentile_sorted(&s, 0.75);
    let iqr = q3 - q1;
    let lo_fence = q1 - WHISKER_IQR * iqr;
    let hi_fence = q3 + WHISKER_IQR * iqr;

    // Clamp to the box so whiskers never point inwards.
    let whisker_lo = s
        .iter()
        .copied()
        .find(|v| *v >= lo_fence)
        .unwrap_or(q1)
        .min(q1);
    let whisker_hi = s
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= hi_fence)
        .unwrap_or(q3)
        .max(q3);

    Ok(BoxStats {
        q1,
        median: median_sorted(&s),
        q3,
        whisker_lo,
        whisker_hi,
        mean: s.iter().sum::<f64>() / s.len() as f64,
    })
}

/// Bin count and observed range of a continuous series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistogramBins {
    /// Span rounded half-to-even; `<= 0` means "do not draw".
    pub bin_count: i64,
    /// `None` until at least one sample has been seen.
    pub range: Option<(f64, f64)>,
}

impl HistogramBins {
    #[inline]
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.bin_count > 0 && self.range.is_some()
    }
}

/// One bin per unit of value range.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn histogram_bins(series: &[f64]) -> HistogramBins {
    let range = series.iter().fold(None, |acc: Option<(f64, f64)>, &v| {
        Some(match acc {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        })
    });
    let bin_count = range.map_or(0, |(lo, hi)| (hi - lo).round_ties_even() as i64);
    HistogramBins { bin_count, range }
}

/// Equal-width bucket counts ready to be drawn as a step outline.
#[derive(Clone, Debug, PartialEq)]
pub struct StepHistogram {
    /// `counts.len() + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl StepHistogram {
    /// Bucket `series` into `bins`; `None` when the bins are not drawable.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn from_bins(series: &[f64], bins: &HistogramBins) -> Option<Self> {
        if !bins.is_drawable() {
            return None;
        }
        let (lo, hi) = bins.range?;
        let n = usize::try_from(bins.bin_count).ok()?;
        let width = (hi - lo) / n as f64;

        let edges = (0..=n).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; n];
        for &v in series {
            // The upper edge belongs to the last bucket.
            let idx = (((v - lo) / width).floor() as usize).min(n - 1);
            counts[idx] += 1;
        }
        Some(Self { edges, counts })
    }

    #[inline]
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn summarize_odd_and_even() {
        let a = summarize(&[9.0, 5.0, 7.0]).unwrap();
        assert_eq!(
            a,
            Summary {
                median: 7.0,
                min: 5.0,
                max: 9.0
            }
        );
        let b = summarize(&[1.0, 2.0]).unwrap();
        assert_relative_eq!(b.median, 1.5);
        assert_relative_eq!(b.min, 1.0);
        assert_relative_eq!(b.max, 2.0);
    }

    #[test]
    fn summarize_rejects_empty() {
        assert_eq!(summarize(&[]), Err(EmptySeriesError));
    }

    #[test]
    fn summary_is_ordered() {
        let inputs: [&[f64]; 4] = [
            &[3.0],
            &[4.0, -1.0, 4.0, 10.0],
            &[60.0, 59.0, 61.0, 58.0, 62.0],
            &[0.1, 0.1, 0.1],
        ];
        for s in inputs {
            let a = summarize(s).unwrap();
            assert!(a.min <= a.median && a.median <= a.max, "{s:?}");
        }
    }

    #[test]
    fn box_stats_quartiles_interpolate() {
        let b = box_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(b.q1, 1.75);
        assert_relative_eq!(b.median, 2.5);
        assert_relative_eq!(b.q3, 3.25);
        assert_relative_eq!(b.mean, 2.5);
        assert_relative_eq!(b.whisker_lo, 1.0);
        assert_relative_eq!(b.whisker_hi, 4.0);
    }

    #[test]
    fn box_whiskers_exclude_outliers() {
        let b = box_stats(&[10.0, 11.0, 12.0, 13.0, 100.0]).unwrap();
        // q1 = 11, q3 = 13, fence = 16
        assert_relative_eq!(b.whisker_hi, 13.0);
        assert_relative_eq!(b.whisker_lo, 10.0);
    }

    #[test]
    fn box_stats_rejects_empty() {
        assert_eq!(box_stats(&[]), Err(EmptySeriesError));
    }

    #[test]
    fn bins_follow_rounded_span() {
        let b = histogram_bins(&[-10.2, -3.0, -0.1]);
        assert_eq!(b.bin_count, 10);
        assert_eq!(b.range, Some((-10.2, -0.1)));
        assert!(b.is_drawable());
    }

    #[test]
    fn bins_round_half_to_even() {
        assert_eq!(histogram_bins(&[0.0, 2.5]).bin_count, 2);
        assert_eq!(histogram_bins(&[0.0, 3.5]).bin_count, 4);
    }

    #[test]
    fn constant_series_is_not_drawable() {
        let b = histogram_bins(&[4.0, 4.0, 4.0]);
        assert!(b.bin_count <= 0);
        assert!(!b.is_drawable());
        assert!(StepHistogram::from_bins(&[4.0, 4.0, 4.0], &b).is_none());
    }

    #[test]
    fn near_constant_series_is_not_drawable() {
        let s = [1.0, 1.2, 1.4];
        assert!(StepHistogram::from_bins(&s, &histogram_bins(&s)).is_none());
    }

    #[test]
    fn empty_series_has_no_range() {
        let b = histogram_bins(&[]);
        assert_eq!(b.bin_count, 0);
        assert_eq!(b.range, None);
        assert!(!b.is_drawable());
    }

    #[test]
    fn step_histogram_counts_every_sample() {
        let s = [0.0, 0.5, 1.0, 1.5, 2.0, 3.0];
        let h = StepHistogram::from_bins(&s, &histogram_bins(&s)).unwrap();
        assert_eq!(h.edges.len(), 4);
        assert_relative_eq!(h.edges[3], 3.0);
        // [0,1) [1,2) [2,3]
        assert_eq!(h.counts, [2, 2, 2]);
        assert_eq!(h.counts.iter().sum::<usize>(), s.len());
        assert_eq!(h.max_count(), 2);
    }
}
