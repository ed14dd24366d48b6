//! A collection of constants.

/// Field delimiter of every simulation log and type table.
pub const FIELD_DELIMITER: u8 = b';';

/// Default image width in pixels
pub const DEFAULT_WIDTH: u32 = 1024;
/// Default image height in pixels
pub const DEFAULT_HEIGHT: u32 = 768;
/// Images smaller than this cannot hold axes, legend and caption
pub const MIN_IMAGE_WIDTH: u32 = 200;
/// Images smaller than this cannot hold axes, legend and caption
pub const MIN_IMAGE_HEIGHT: u32 = 150;

/// Histograms get one bin per unit of span; wider spans are refused.
pub const MAX_HISTOGRAM_BINS: i64 = 100_000;

/// Whiskers reach the furthest sample within this many IQRs of the box.
pub const WHISKER_IQR: f64 = 1.5;

/// The left and right border characters
pub const BORDER_WIDTH: usize = 2;
/// One character of space between y axis labels and the plotted data
pub const LABEL_GUTTER: usize = 1;

/// Preview must be at least 7 characters tall
pub const MIN_GRAPH_HEIGHT: usize = 7;
/// Preview must be at least 14 characters wide
pub const MIN_GRAPH_WIDTH: usize = 14;

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// Numbers are rounded to the first decimal place.
///
/// 14.832 becomes 14.8
pub const DECIMAL_PRECISION: usize = 1;
