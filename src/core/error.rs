//! Centralised error types used across the crate.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::core::color::ColorError;

/// Precise configuration faults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration missing field `{0}`")]
    MissingField(&'static str),
    #[error("image must be at least {min_w}×{min_h} pixels, got {width}×{height}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        min_w: u32,
        min_h: u32,
    },
    #[error("y_min {low} must be < y_max {high}")]
    InvalidRange { low: f64, high: f64 },
    #[error("unsupported output format `{0}` (use svg, pdf, png, jpg, jpeg or bmp)")]
    UnsupportedFormat(String),
}

/// A row (or argument) that does not have the shape the layout asks for.
#[derive(Debug, Error)]
#[error("{}{kind}", line_prefix(.line))]
pub struct FormatError {
    /// 1-based line number, `0` when the fault is not tied to a line.
    pub line: usize,
    pub kind: FormatErrorKind,
}

#[derive(Debug, PartialEq, Error)]
pub enum FormatErrorKind {
    #[error("expected at least {needed} fields, got {got}")]
    MissingField { needed: usize, got: usize },
    #[error("row declares {declared} samples but only {available} fields follow")]
    CountExceedsFields { declared: usize, available: usize },
    #[error("invalid {field} value '{text}'")]
    BadNumber { field: &'static str, text: String },
    #[error("{what}: expected {expected} entries, got {got}")]
    HeaderMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("input has no data rows")]
    EmptyInput,
    #[error("invalid display flag '{0}' (expected true/false, 1/0 or yes/no)")]
    BadFlag(String),
}

impl FormatError {
    #[inline]
    pub fn at(line: usize, kind: FormatErrorKind) -> Self {
        Self { line, kind }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn line_prefix(line: &usize) -> String {
    if *line == 0 {
        String::new()
    } else {
        format!("line {line}: ")
    }
}

/// Returned by the pure aggregation functions; mapped to
/// [`PlotError::EmptySeries`] once the group is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot aggregate an empty series")]
pub struct EmptySeriesError;

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("group {group} has no samples to aggregate")]
    EmptySeries { group: String },
    #[error("group {group} spans {bins} histogram bins (limit {limit})")]
    TooManyBins { group: String, bins: i64, limit: i64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error("rendering failed: {0}")]
    Render(String),
    #[error("display preview: {0}")]
    Preview(#[from] io::Error),
}

impl PlotError {
    /// Attach the group key to an aggregation failure.
    pub fn empty_series(group: impl fmt::Display) -> Self {
        Self::EmptySeries {
            group: group.to_string(),
        }
    }
}
