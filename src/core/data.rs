//! Field-level conversions: numbers via `lexical-core`, display flag tokens.

use crate::core::error::{FormatError, FormatErrorKind};

/// Numeric type a column is declared to carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleKind {
    #[default]
    Float,
    /// Integral samples (frame counters); `"5.0"` is rejected.
    Integer,
}

// --- Helpers ---
#[inline]
fn trim(mut b: &[u8]) -> &[u8] {
    while !b.is_empty() && b[0].is_ascii_whitespace() {
        b = &b[1..];
    }
    while !b.is_empty() && b[b.len() - 1].is_ascii_whitespace() {
        b = &b[..b.len() - 1];
    }
    b
}

#[inline]
fn bad_number(line: usize, field: &'static str, text: &str) -> FormatError {
    FormatError::at(
        line,
        FormatErrorKind::BadNumber {
            field,
            text: text.to_owned(),
        },
    )
}

/// Parse a finite float; `field` names the value in diagnostics.
pub fn parse_f64(text: &str, line: usize, field: &'static str) -> Result<f64, FormatError> {
    let val = lexical_core::parse::<f64>(trim(text.as_bytes()))
        .map_err(|_| bad_number(line, field, text))?;
    if val.is_finite() {
        Ok(val)
    } else {
        Err(bad_number(line, field, text))
    }
}

pub fn parse_i64(text: &str, line: usize, field: &'static str) -> Result<i64, FormatError> {
    lexical_core::parse::<i64>(trim(text.as_bytes())).map_err(|_| bad_number(line, field, text))
}

/// Non-negative integer such as a sample count or a per-group cap.
pub fn parse_count(text: &str, line: usize, field: &'static str) -> Result<usize, FormatError> {
    lexical_core::parse::<usize>(trim(text.as_bytes()))
        .map_err(|_| bad_number(line, field, text))
}

/// Parse one sample according to the column's declared kind.
#[allow(clippy::cast_precision_loss)]
pub fn parse_sample(
    text: &str,
    kind: SampleKind,
    line: usize,
    field: &'static str,
) -> Result<f64, FormatError> {
    match kind {
        SampleKind::Float => parse_f64(text, line, field),
        SampleKind::Integer => parse_i64(text, line, field).map(|v| v as f64),
    }
}

/// Strict display-flag parsing over a fixed token set; never evaluated.
pub fn parse_display_flag(text: &str) -> Result<bool, FormatError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(FormatError::at(
            0,
            FormatErrorKind::BadFlag(text.to_owned()),
        )),
    }
}
