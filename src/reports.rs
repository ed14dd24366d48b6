//! One report per utility: reshaped series in, chart input plus labels out.
//!
//! Everything here is pure. Reading files, writing images and the display
//! preview live in the CLI handlers.

use std::path::Path;

use tracing::{debug, warn};

use crate::{
    chart::{self, BoxGroup, HistogramSeries, LineSpec},
    core::{
        aggregate::{StepHistogram, Summary, box_stats, histogram_bins, summarize},
        color::SeriesColor,
        config::ChartConfig,
        constants::MAX_HISTOGRAM_BINS,
        error::{ConfigError, PlotError},
        reshape::{ColumnarSeries, RaggedSeries, TypeTable},
    },
    preview::Preview,
};

/// Prepared series for one of the three chart kinds.
#[derive(Debug, Clone)]
pub enum ChartInput {
    Lines(Vec<LineSpec>),
    Boxes(Vec<BoxGroup>),
    Histograms(Vec<HistogramSeries>),
}

/// Fixed wording of one utility's chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub title: String,
    pub subtitle: Option<String>,
    pub x_label: String,
    pub y_label: String,
}

impl Labels {
    fn new(title: &str, x_label: impl Into<String>, y_label: &str) -> Self {
        Self {
            title: title.to_owned(),
            subtitle: None,
            x_label: x_label.into(),
            y_label: y_label.to_owned(),
        }
    }

    fn with_subtitle(mut self, subtitle: String) -> Self {
        self.subtitle = Some(subtitle);
        self
    }
}

/// A finished report, ready to render.
#[derive(Debug, Clone)]
pub struct Report {
    pub input: ChartInput,
    pub labels: Labels,
}

impl Report {
    /// Chart configuration at the requested image size.
    pub fn chart_config(&self, width: u32, height: u32) -> Result<ChartConfig, ConfigError> {
        let builder = ChartConfig::builder(self.labels.title.as_str())
            .x_label(self.labels.x_label.as_str())
            .y_label(self.labels.y_label.as_str())
            .size(width, height);
        match &self.labels.subtitle {
            Some(sub) => builder.subtitle(sub.as_str()).build(),
            None => builder.build(),
        }
    }

    /// Write the chart image to `output`.
    pub fn render(&self, output: &Path, config: &ChartConfig) -> Result<(), PlotError> {
        match &self.input {
            ChartInput::Lines(lines) => chart::plot_lines(lines, output, config),
            ChartInput::Boxes(groups) => chart::plot_boxes(groups, output, config),
            ChartInput::Histograms(series) => chart::plot_step_histograms(series, output, config),
        }
    }

    #[must_use]
    pub fn preview(&self) -> Preview {
        match &self.input {
            ChartInput::Lines(lines) => Preview::from_lines(lines),
            ChartInput::Boxes(groups) => Preview::from_boxes(groups),
            ChartInput::Histograms(series) => Preview::from_histograms(series),
        }
    }
}

/// Median, min and max frame rate over agent count.
///
/// Groups are plotted in ascending key order.
#[allow(clippy::cast_precision_loss)]
pub fn performance(series: &RaggedSeries, agent: &str, mode: &str) -> Result<Report, PlotError> {
    let mut summaries = series
        .iter()
        .map(|(key, samples)| {
            let s = summarize(samples).map_err(|_| PlotError::empty_series(key))?;
            debug!(key, median = s.median, min = s.min, max = s.max, "summarized");
            Ok((key, s))
        })
        .collect::<Result<Vec<_>, PlotError>>()?;
    summaries.sort_by_key(|(key, _)| *key);

    let line = |pick: fn(&Summary) -> f64| -> Vec<(f64, f64)> {
        summaries
            .iter()
            .map(|(key, s)| (*key as f64, pick(s)))
            .collect()
    };
    let lines = vec![
        LineSpec::new("median", SeriesColor::cycle(0), line(|s| s.median)),
        LineSpec::new("min", SeriesColor::cycle(1), line(|s| s.min)).dashed(),
        LineSpec::new("max", SeriesColor::cycle(2), line(|s| s.max)).dashed(),
    ];

    Ok(Report {
        input: ChartInput::Lines(lines),
        labels: Labels::new("FPS by agent count", format!("{agent} agents"), "FPS")
            .with_subtitle(format!("({agent} agents in {mode} mode)")),
    })
}

/// Frame-rate distribution per simulation mode.
///
/// Modes without samples keep their slot; at least one must have samples.
pub fn sim_modes(series: &ColumnarSeries) -> Result<Report, PlotError> {
    let labels = series.labels.clone().unwrap_or_default();
    let groups: Vec<BoxGroup> = series
        .series
        .iter()
        .enumerate()
        .map(|(g, samples)| {
            let label = labels
                .get(g)
                .cloned()
                .unwrap_or_else(|| format!("mode {g}"));
            let stats = box_stats(samples).ok();
            match &stats {
                Some(b) => debug!(mode = %label, samples = samples.len(), median = b.median, "box"),
                None => warn!(mode = %label, "no samples, slot left empty"),
            }
            BoxGroup::new(label, stats)
        })
        .collect();

    if groups.iter().all(|g| g.stats.is_none()) {
        return Err(PlotError::empty_series(labels.join(", ")));
    }

    Ok(Report {
        input: ChartInput::Boxes(groups),
        labels: Labels::new("FPS by simulation mode", "Modes", "FPS"),
    })
}

/// One line per group against the shared time column.
fn time_lines(series: &ColumnarSeries, table: &TypeTable) -> Result<Vec<LineSpec>, PlotError> {
    table.require(series.group_count())?;
    let x = series.x.as_deref().unwrap_or(&[]);
    Ok(series
        .series
        .iter()
        .enumerate()
        .map(|(g, ys)| {
            let label = table.get(g).map(|e| e.label.clone()).unwrap_or_default();
            let points = x.iter().copied().zip(ys.iter().copied()).collect();
            LineSpec::new(label, table.color_or_cycle(g), points)
        })
        .collect())
}

/// Root length per root type, colored by the type table.
pub fn root_length(series: &ColumnarSeries, table: &TypeTable) -> Result<Report, PlotError> {
    Ok(Report {
        input: ChartInput::Lines(time_lines(series, table)?),
        labels: Labels::new("Root length over time", "Time", "Length (m)"),
    })
}

/// Stored nutrients per nutrient type, default palette.
pub fn root_nutrients(series: &ColumnarSeries, table: &TypeTable) -> Result<Report, PlotError> {
    Ok(Report {
        input: ChartInput::Lines(time_lines(series, table)?),
        labels: Labels::new("Nutrients over time", "Time", "Stored nutrients"),
    })
}

/// Segment depth distribution per root type.
///
/// Groups with no samples or a value range under half a unit are skipped.
pub fn root_hist(
    series: &ColumnarSeries,
    table: &TypeTable,
    segment_length: &str,
) -> Result<Report, PlotError> {
    table.require(series.group_count())?;
    let hists = series
        .series
        .iter()
        .enumerate()
        .map(|(g, samples)| {
            let label = table.get(g).map(|e| e.label.clone()).unwrap_or_default();
            let bins = histogram_bins(samples);
            if bins.bin_count > MAX_HISTOGRAM_BINS {
                return Err(PlotError::TooManyBins {
                    group: label,
                    bins: bins.bin_count,
                    limit: MAX_HISTOGRAM_BINS,
                });
            }
            let histogram = StepHistogram::from_bins(samples, &bins);
            if histogram.is_none() {
                warn!(group = %label, samples = samples.len(), bins = bins.bin_count, "histogram skipped");
            } else {
                debug!(group = %label, samples = samples.len(), bins = bins.bin_count, "histogram");
            }
            Ok(HistogramSeries {
                label,
                color: table.color_or_cycle(g),
                histogram,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Report {
        input: ChartInput::Histograms(hists),
        labels: Labels::new("Root segments per depth", "Segments", "Root Depth (cm)")
            .with_subtitle(format!("(segment length={segment_length} cm)")),
    })
}
