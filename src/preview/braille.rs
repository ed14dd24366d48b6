//! Envelope steps to braille glyphs.
//!
//! 1. [`to_pixels`] maps each step's `[lo, hi]` to a span of pixel rows,
//!    one step per *half* column.
//! 2. [`encode_rows`] walks the grid cell by cell. The intersection of a
//!    contiguous span with a 4-pixel cell is always one of 11 patterns
//!    (empty, full, three top/bottom, three pairs, four single dots), so each
//!    half-column is a lookup into a precomputed mask table.

use crate::core::{bounds::EnvelopeStep, config::PreviewConfig, constants::BRAILLE_VERTICAL_RESOLUTION};

/// Pixel rows covered in one half-column; row 0 is the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelSpan {
    pub top: usize,
    pub bottom: usize,
}

#[derive(Debug, Default)]
pub struct BraillePlot {
    pub spans: Vec<PixelSpan>,
}

/// 0 empty (⠀), 1 full (⡇), 2 top-three (⠇), 3 bottom-three (⡆), 4 top-two (⠃),
/// 5 middle-two (⠆), 6 bottom-two (⡄), 7..=10 single dots top to bottom
const LEFT_MASKS: [u8; 11] = [
    0x00, 0x47, 0x07, 0x46, 0x03, 0x06, 0x44, 0x01, 0x02, 0x04, 0x40,
];
/// Same order for the right half-column (⢸ ⠸ ⢰ ⠘ ⠰ ⢠ ⠈ ⠐ ⠠ ⢀).
const RIGHT_MASKS: [u8; 11] = [
    0x00, 0xB8, 0x38, 0xB0, 0x18, 0x30, 0xA0, 0x08, 0x10, 0x20, 0x80,
];

const BRAILLE_BASE: u32 = 0x2800;

#[inline]
const fn pattern_id(top: usize, bottom: usize) -> usize {
    match (top, bottom) {
        (0, 3) => 1,
        (0, 2) => 2,
        (1, 3) => 3,
        (0, 1) => 4,
        (1, 2) => 5,
        (2, 3) => 6,
        (0, 0) => 7,
        (1, 1) => 8,
        (2, 2) => 9,
        (3, 3) => 10,
        _ => 0,
    }
}

/// Map steps into pixel space of a `y_chars`-row grid.
///
/// With `bridge` set, each span is stretched to touch its left neighbour so
/// line charts read as connected strokes.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn to_pixels(steps: &[EnvelopeStep], cfg: &PreviewConfig, bridge: bool) -> BraillePlot {
    let vert_px = (cfg.y_chars * BRAILLE_VERTICAL_RESOLUTION).max(1);
    let y_span = cfg.y_max - cfg.y_min;
    let map = |y: f64| -> usize {
        let r = ((y - cfg.y_min) / y_span).clamp(0.0, 1.0) * (vert_px - 1) as f64;
        (vert_px - 1) - r.round() as usize
    };

    let mut spans: Vec<PixelSpan> = steps
        .iter()
        .map(|s| {
            let (a, b) = (map(s.hi), map(s.lo));
            PixelSpan {
                top: a.min(b),
                bottom: a.max(b),
            }
        })
        .collect();

    if bridge && spans.len() > 1 {
        for i in (1..spans.len()).rev() {
            let prev = spans[i - 1];
            let curr = &mut spans[i];
            curr.top = curr.top.min(prev.top + 1);
            curr.bottom = curr.bottom.max(prev.bottom.saturating_sub(1));
        }
    }

    BraillePlot { spans }
}

fn cell_pattern(span: Option<&PixelSpan>, row_top: usize) -> usize {
    let row_bottom = row_top + BRAILLE_VERTICAL_RESOLUTION - 1;
    span.filter(|s| s.bottom >= row_top && s.top <= row_bottom)
        .map_or(0, |s| {
            pattern_id(
                s.top.max(row_top) - row_top,
                s.bottom.min(row_bottom) - row_top,
            )
        })
}

/// One string of `x_chars` braille glyphs per grid row.
#[must_use]
pub fn encode_rows(plot: &BraillePlot, x_chars: usize, y_chars: usize) -> Vec<String> {
    (0..y_chars)
        .map(|row| {
            let row_top = row * BRAILLE_VERTICAL_RESOLUTION;
            (0..x_chars)
                .map(|col| {
                    let left = cell_pattern(plot.spans.get(col * 2), row_top);
                    let right = cell_pattern(plot.spans.get(col * 2 + 1), row_top);
                    let mask = LEFT_MASKS[left] | RIGHT_MASKS[right];
                    char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or(' ')
                })
                .collect()
        })
        .collect()
}
