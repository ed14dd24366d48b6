//! Multi-line chart: one polyline per series, solid or dashed, with legend.

use std::{error::Error, path::Path};

use plotters::{prelude::*, series::DashedLineSeries};

use super::{
    AXIS_MARGIN, DASH, GAP, OutputFormat, chart_builder, draw_legend, titled_area, write_pdf,
};
use crate::core::{
    bounds::{extent, padded},
    color::SeriesColor,
    config::ChartConfig,
    error::PlotError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// One labelled polyline.
#[derive(Clone, Debug)]
pub struct LineSpec {
    pub label: String,
    pub color: SeriesColor,
    pub style: LineStyle,
    pub points: Vec<(f64, f64)>,
}

impl LineSpec {
    pub fn new(label: impl Into<String>, color: SeriesColor, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            color,
            style: LineStyle::Solid,
            points,
        }
    }

    #[must_use]
    pub fn dashed(mut self) -> Self {
        self.style = LineStyle::Dashed;
        self
    }
}

/// Draw every line on shared axes and write the image to `output`.
///
/// # Errors
///
/// `Config` for an unknown extension, `Render` when no line has points or
/// the backend fails.
pub fn plot_lines(lines: &[LineSpec], output: &Path, config: &ChartConfig) -> Result<(), PlotError> {
    let format = OutputFormat::from_path(output)?;
    if lines.iter().all(|l| l.points.is_empty()) {
        return Err(PlotError::Render("no line has any points".into()));
    }

    let size = (config.width, config.height);
    let drawn = match format {
        OutputFormat::Svg => plot_lines_impl(SVGBackend::new(output, size), lines, config),
        OutputFormat::Bitmap => plot_lines_impl(BitMapBackend::new(output, size), lines, config),
        OutputFormat::Pdf => {
            let mut svg = String::new();
            plot_lines_impl(SVGBackend::with_string(&mut svg, size), lines, config)
                .and_then(|()| write_pdf(&svg, output))
        }
    };
    drawn.map_err(|e| PlotError::Render(e.to_string()))
}

fn plot_lines_impl<DB: DrawingBackend>(
    backend: DB,
    lines: &[LineSpec],
    config: &ChartConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let points = || lines.iter().flat_map(|l| l.points.iter());
    let x_range = padded(extent(points().map(|p| p.0)), AXIS_MARGIN);
    let y_range = padded(extent(points().map(|p| p.1)), AXIS_MARGIN);

    let root = backend.into_drawing_area();
    let area = titled_area(&root, config)?;
    let mut chart = chart_builder(&area, config).build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.x_label).y_desc(&config.y_label);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for line in lines.iter().filter(|l| !l.points.is_empty()) {
        let color = line.color.to_rgb();
        let style = color.stroke_width(2);
        let anno = match line.style {
            LineStyle::Solid => {
                chart.draw_series(LineSeries::new(line.points.iter().copied(), style))?
            }
            LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(
                line.points.iter().copied(),
                DASH,
                GAP,
                style,
            ))?,
        };
        anno.label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    draw_legend(&mut chart)?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn config() -> ChartConfig {
        ChartConfig::builder("Root length over time")
            .x_label("Time")
            .y_label("Length (m)")
            .build()
            .unwrap()
    }

    #[test]
    fn writes_svg_with_dashed_and_solid_lines() {
        let tmp = NamedTempFile::new().unwrap();
        let out = tmp.path().with_extension("svg");
        let lines = [
            LineSpec::new("Min", SeriesColor::cycle(0), vec![(1.0, 50.0), (2.0, 40.0)]).dashed(),
            LineSpec::new("Median", SeriesColor::cycle(0), vec![(1.0, 60.0), (2.0, 45.0)]),
        ];
        plot_lines(&lines, &out, &config()).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<svg"));
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn writes_png() {
        let tmp = NamedTempFile::new().unwrap();
        let out = tmp.path().with_extension("png");
        let lines = [LineSpec::new(
            "Tap root",
            SeriesColor::cycle(2),
            vec![(0.0, 0.1), (1.0, 0.2), (2.0, 0.4)],
        )];
        plot_lines(&lines, &out, &config()).unwrap();
        assert!(out.exists());
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn single_point_still_renders() {
        let tmp = NamedTempFile::new().unwrap();
        let out = tmp.path().with_extension("svg");
        let lines = [LineSpec::new("Median", SeriesColor::cycle(0), vec![(10.0, 60.0)])];
        plot_lines(&lines, &out, &config()).unwrap();
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn rejects_all_empty() {
        let lines = [LineSpec::new("x", SeriesColor::cycle(0), Vec::new())];
        let err = plot_lines(&lines, Path::new("never.svg"), &config()).unwrap_err();
        assert!(matches!(err, PlotError::Render(_)));
    }

    #[test]
    fn writes_pdf() {
        let tmp = NamedTempFile::new().unwrap();
        let out = tmp.path().with_extension("pdf");
        let lines = [LineSpec::new("Nitrogen", SeriesColor::cycle(0), vec![(0.0, 10.0), (1.0, 12.5)])];
        plot_lines(&lines, &out, &config()).unwrap();
        let pdf = std::fs::read(&out).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn rejects_unknown_extension_before_drawing() {
        let lines = [LineSpec::new("x", SeriesColor::cycle(0), vec![(0.0, 1.0)])];
        let err = plot_lines(&lines, Path::new("never.eps"), &config()).unwrap_err();
        assert!(matches!(err, PlotError::Config(_)));
        assert!(!Path::new("never.eps").exists());
    }
}
