//! Chart reports for root-growth simulation logs.
//!
//! Pipeline, one pass per invocation:
//!
//! 1. [`core::table`] splits a `;`-delimited file into rows,
//! 2. [`core::reshape`] turns rows into per-group series,
//! 3. [`core::aggregate`] computes summaries, box statistics or histograms,
//! 4. [`reports`] wires a utility's series to chart input and labels,
//! 5. [`chart`] writes the image with `plotters`,
//! 6. [`preview`] optionally shows the chart's envelope in the terminal.

pub mod chart;
pub mod cli;
pub mod core;
pub mod preview;
pub mod reports;

pub use chart::{BoxGroup, HistogramSeries, LineSpec, LineStyle, plot_boxes, plot_lines, plot_step_histograms};
pub use self::core::{
    aggregate::{BoxStats, HistogramBins, StepHistogram, Summary, box_stats, histogram_bins, summarize},
    color::{ColorError, SeriesColor},
    config::{ChartConfig, ChartConfigBuilder, PreviewConfig, PreviewConfigBuilder},
    error::{ConfigError, EmptySeriesError, FormatError, FormatErrorKind, PlotError},
    reshape::{
        ColumnLayout, ColumnarSeries, RaggedSeries, TypeTable, TypeTableShape, load_type_table,
        reshape_columnar, reshape_ragged,
    },
    table::{Row, TableReader},
};
pub use preview::Preview;
pub use reports::Report;
