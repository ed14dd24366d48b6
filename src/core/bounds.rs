//! Geometry helpers: axis ranges + terminal size plumbing.

use std::ops::Range;

use terminal_size::{Height, Width, terminal_size};

use crate::core::constants::{
    BORDER_WIDTH, BRAILLE_HORIZONTAL_RESOLUTION as HR, LABEL_GUTTER, MIN_GRAPH_HEIGHT,
    MIN_GRAPH_WIDTH,
};

/// Vertical extent of a chart at one x position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeStep {
    pub x: f64,
    pub lo: f64,
    pub hi: f64,
}

/// Which axis we’re measuring.
#[derive(Clone, Copy, Debug)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[must_use]
    pub fn bounds(self, steps: &[EnvelopeStep]) -> (f64, f64) {
        match self {
            Self::X => extent(steps.iter().map(|s| s.x)),
            Self::Y => extent(steps.iter().flat_map(|s| [s.lo, s.hi])),
        }
    }
}

/// Inclusive bounds without any padding.
///
/// * If there are no finite values the fallback is `(0.0, 1.0)`.
/// * If *all* finite values are identical we expand by +-0.5 so the axis
///   still has a non-zero span.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.into_iter().filter(|v| v.is_finite()) {
        low = low.min(v);
        high = high.max(v);
    }

    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }
    if (high - low).abs() < f64::EPSILON {
        return (low - 0.5, high + 0.5);
    }
    (low, high)
}

/// Widen `(low, high)` by `margin` of its span on both sides.
#[must_use]
pub fn padded((low, high): (f64, f64), margin: f64) -> Range<f64> {
    let pad = (high - low) * margin;
    (low - pad)..(high + pad)
}

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Convert terminal dimensions to the preview's char grid, leaving space
/// for borders, y labels of `label_w` chars and the chrome rows.
#[inline]
#[must_use]
pub fn graph_dims((w, h): (Width, Height), label_w: usize) -> (usize, usize) {
    let x_chars = usize::from(w.0)
        .saturating_sub(BORDER_WIDTH + LABEL_GUTTER + label_w + 1)
        .max(MIN_GRAPH_WIDTH);
    let y_chars = usize::from(h.0).saturating_sub(6).max(MIN_GRAPH_HEIGHT);
    (x_chars, y_chars)
}

/// Number of envelope steps that fit into `x_chars` braille cells.
#[inline]
#[must_use]
pub fn step_capacity(x_chars: usize) -> usize {
    x_chars * HR
}

/// How wide will the y-axis labels be for *current* min/max?
#[inline]
#[must_use]
pub fn y_label_width((low, high): (f64, f64), decimals: usize) -> usize {
    let lo = format!("{low:.decimals$}").len();
    let hi = format!("{high:.decimals$}").len();
    lo.max(hi)
}
