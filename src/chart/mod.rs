//! Image output with `plotters`.
//!
//! Three fixed chart kinds, each a pure function of prepared series plus a
//! [`ChartConfig`](crate::core::config::ChartConfig):
//!
//! | Chart | Function |
//! |-------|----------|
//! | Multi-line (solid / dashed) | [`plot_lines`] |
//! | Grouped box plot | [`plot_boxes`] |
//! | Horizontal step histogram | [`plot_step_histograms`] |
//!
//! The backend follows the output extension: `.svg` is written with
//! `SVGBackend`, `.png`/`.jpg`/`.jpeg`/`.bmp` with `BitMapBackend`. A `.pdf`
//! is drawn to an in-memory SVG first and converted with `svg2pdf`.

pub mod boxplot;
pub mod histogram;
pub mod lines;

use std::{error::Error, path::Path};

use plotters::{coord::Shift, prelude::*};
use svg2pdf::{ConversionOptions, PageOptions, usvg};

use crate::core::{config::ChartConfig, error::ConfigError};

pub use boxplot::{BoxGroup, plot_boxes};
pub use histogram::{HistogramSeries, plot_step_histograms};
pub use lines::{LineSpec, LineStyle, plot_lines};

/// Relative padding added around the data on each axis.
pub(crate) const AXIS_MARGIN: f64 = 0.05;

/// Dash and gap length of dashed series, in pixels.
pub(crate) const DASH: u32 = 8;
pub(crate) const GAP: u32 = 5;

const TITLE_FONT: (&str, u32) = ("sans-serif", 30);
const SUBTITLE_FONT: (&str, u32) = ("sans-serif", 20);

/// Which plotters backend an output path asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Bitmap,
    Pdf,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "svg" => Ok(Self::Svg),
            "png" | "jpg" | "jpeg" | "bmp" => Ok(Self::Bitmap),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }
    }
}

/// Convert a rendered SVG document to PDF and write it to `output`.
pub(crate) fn write_pdf(svg: &str, output: &Path) -> Result<(), Box<dyn Error>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options)?;
    let pdf = svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| e.to_string())?;
    std::fs::write(output, pdf)?;
    Ok(())
}

/// White background, title on top; returns the area below the title.
pub(crate) fn titled_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
) -> Result<DrawingArea<DB, Shift>, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    Ok(root.titled(&config.title, TITLE_FONT)?)
}

/// Shared builder settings: margins, label areas, optional subtitle caption.
pub(crate) fn chart_builder<'a, 'b, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    config: &ChartConfig,
) -> ChartBuilder<'a, 'b, DB> {
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60);
    if let Some(sub) = &config.subtitle {
        builder.caption(sub, SUBTITLE_FONT);
    }
    builder
}

/// Series legend in the upper right corner.
pub(crate) fn draw_legend<'a, DB, CT>(
    chart: &mut ChartContext<'a, DB, CT>,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    CT: CoordTranslate,
{
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/fps.svg")).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("RootLength.PNG")).unwrap(),
            OutputFormat::Bitmap
        );
    }

    #[test]
    fn pdf_is_accepted() {
        assert_eq!(
            OutputFormat::from_path(Path::new("0RootLength.pdf")).unwrap(),
            OutputFormat::Pdf
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = OutputFormat::from_path(Path::new("0RootLength.eps")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "eps"));
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(OutputFormat::from_path(Path::new("chart")).is_err());
    }
}
