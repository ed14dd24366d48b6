//! Terminal stand-in for an interactive chart window.
//!
//! A [`Preview`] holds the value envelope of a chart as `(x, lo, hi)` steps.
//! [`show`] bins the steps to the terminal width, draws them as braille in a
//! framed box and blocks until the operator presses Enter (or stdin closes).

pub mod binner;
pub mod braille;
pub mod frame;

use std::io::{self, BufRead, Write};

use terminal_size::{Height, Width};
use tracing::debug;

use crate::{
    chart::{BoxGroup, HistogramSeries, LineSpec},
    core::{
        bounds::{Axis, EnvelopeStep, graph_dims, step_capacity, terminal_geometry, y_label_width},
        color::SeriesColor,
        config::{ChartConfig, PreviewConfig},
        constants::DECIMAL_PRECISION,
        error::PlotError,
    },
};

pub use binner::bin_index;
pub use braille::{BraillePlot, encode_rows, to_pixels};

/// Value envelope of one chart, ordered by x.
#[derive(Debug, Clone, Default)]
pub struct Preview {
    steps: Vec<EnvelopeStep>,
    connected: bool,
}

impl Preview {
    /// Per distinct x, the lowest and highest value across all lines.
    #[must_use]
    pub fn from_lines(lines: &[LineSpec]) -> Self {
        let mut points: Vec<(f64, f64)> = lines.iter().flat_map(|l| l.points.iter().copied()).collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut steps: Vec<EnvelopeStep> = Vec::new();
        for (x, y) in points {
            match steps.last_mut() {
                Some(s) if s.x.total_cmp(&x).is_eq() => {
                    s.lo = s.lo.min(y);
                    s.hi = s.hi.max(y);
                }
                _ => steps.push(EnvelopeStep { x, lo: y, hi: y }),
            }
        }
        Self {
            steps,
            connected: true,
        }
    }

    /// Whisker-to-whisker range per box slot.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_boxes(groups: &[BoxGroup]) -> Self {
        let steps = groups
            .iter()
            .enumerate()
            .filter_map(|(i, g)| {
                g.stats.map(|s| EnvelopeStep {
                    x: i as f64,
                    lo: s.whisker_lo,
                    hi: s.whisker_hi,
                })
            })
            .collect();
        Self {
            steps,
            connected: false,
        }
    }

    /// One bar from zero to the bin count per bin, ordered by bin centre.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_histograms(series: &[HistogramSeries]) -> Self {
        let mut steps: Vec<EnvelopeStep> = series
            .iter()
            .filter_map(|s| s.histogram.as_ref())
            .flat_map(|h| {
                h.edges.windows(2).zip(&h.counts).map(|(e, c)| EnvelopeStep {
                    x: 0.5 * (e[0] + e[1]),
                    lo: 0.0,
                    hi: *c as f64,
                })
            })
            .collect();
        steps.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self {
            steps,
            connected: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[EnvelopeStep] {
        &self.steps
    }

    /// Write the framed preview for a terminal of the given size.
    pub fn draw<W: Write>(
        &self,
        out: &mut W,
        chart: &ChartConfig,
        color: SeriesColor,
        term: (Width, Height),
    ) -> Result<(), PlotError> {
        let (y_min, y_max) = Axis::Y.bounds(&self.steps);
        let label_w = y_label_width((y_min, y_max), DECIMAL_PRECISION);
        let (x_chars, y_chars) = graph_dims(term, label_w);

        let cfg = PreviewConfig::builder(x_chars, y_chars)
            .title(chart.title.as_str())
            .subtitle_opt(chart.subtitle.as_deref())
            .y_range(y_min..=y_max)
            .color(color)
            .build()?;

        let binned = bin_index(&self.steps, step_capacity(x_chars));
        debug!(
            steps = self.steps.len(),
            binned = binned.len(),
            x_chars,
            y_chars,
            "preview binned"
        );
        let plot = to_pixels(&binned, &cfg, self.connected);
        let rows = encode_rows(&plot, cfg.x_chars, cfg.y_chars);
        frame::render(out, &cfg, &rows)?;
        Ok(())
    }
}

/// Draw `preview` on stdout and block until Enter or end of input.
pub fn show(preview: &Preview, chart: &ChartConfig) -> Result<(), PlotError> {
    let color = SeriesColor::cycle(0);
    {
        let mut term = io::stdout().lock();
        preview.draw(&mut term, chart, color, terminal_geometry())?;
        writeln!(term, "press Enter to close")?;
        term.flush()?;
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
