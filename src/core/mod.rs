//! Aggregates the data-shaping layer: read → reshape → aggregate.

pub mod aggregate;
pub mod bounds;
pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod reshape;
pub mod table;

// re-export frequently-used items for convenience
pub use aggregate::{BoxStats, HistogramBins, StepHistogram, Summary, box_stats, histogram_bins, summarize};
pub use bounds::{Axis, EnvelopeStep};
pub use color::{ColorError, SeriesColor, colorize};
pub use config::{ChartConfig, ChartConfigBuilder, PreviewConfig, PreviewConfigBuilder};
pub use constants::{DECIMAL_PRECISION, FIELD_DELIMITER, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH};
pub use data::{SampleKind, parse_display_flag};
pub use error::{ConfigError, EmptySeriesError, FormatError, FormatErrorKind, PlotError};
pub use reshape::{
    ColumnLayout, ColumnarSeries, RaggedSeries, TypeEntry, TypeTable, TypeTableShape,
    load_type_table, reshape_columnar, reshape_ragged,
};
pub use table::{Row, TableReader};
