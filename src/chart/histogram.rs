//! Horizontal step histograms: value on the y axis, sample count on x.
//!
//! Every drawable group becomes one outline; groups whose histogram could not
//! be built are left out of the chart and the legend.

use std::{error::Error, path::Path};

use plotters::prelude::*;

use super::{
    AXIS_MARGIN, OutputFormat, chart_builder, draw_legend, titled_area, write_pdf,
};
use crate::core::{
    aggregate::StepHistogram,
    bounds::{extent, padded},
    color::SeriesColor,
    config::ChartConfig,
    error::PlotError,
};

/// One group's histogram, `None` when it is not drawable.
#[derive(Clone, Debug)]
pub struct HistogramSeries {
    pub label: String,
    pub color: SeriesColor,
    pub histogram: Option<StepHistogram>,
}

/// Outline of a horizontal step histogram, starting and ending on the
/// value axis.
#[allow(clippy::cast_precision_loss)]
fn step_outline(h: &StepHistogram) -> Vec<(f64, f64)> {
    let mut pts = Vec::with_capacity(h.counts.len() * 2 + 2);
    if let (Some(first), Some(last)) = (h.edges.first(), h.edges.last()) {
        pts.push((0.0, *first));
        for (count, edge) in h.counts.iter().zip(h.edges.windows(2)) {
            let c = *count as f64;
            pts.push((c, edge[0]));
            pts.push((c, edge[1]));
        }
        pts.push((0.0, *last));
    }
    pts
}

/// Overlay the drawable histograms and write the image to `output`.
///
/// A chart where every group was skipped still gets its frame and labels.
///
/// # Errors
///
/// `Config` for an unknown extension, `Render` when the backend fails.
pub fn plot_step_histograms(
    series: &[HistogramSeries],
    output: &Path,
    config: &ChartConfig,
) -> Result<(), PlotError> {
    let format = OutputFormat::from_path(output)?;
    let size = (config.width, config.height);
    let drawn = match format {
        OutputFormat::Svg => plot_hist_impl(SVGBackend::new(output, size), series, config),
        OutputFormat::Bitmap => plot_hist_impl(BitMapBackend::new(output, size), series, config),
        OutputFormat::Pdf => {
            let mut svg = String::new();
            plot_hist_impl(SVGBackend::with_string(&mut svg, size), series, config)
                .and_then(|()| write_pdf(&svg, output))
        }
    };
    drawn.map_err(|e| PlotError::Render(e.to_string()))
}

#[allow(clippy::cast_precision_loss)]
fn plot_hist_impl<DB: DrawingBackend>(
    backend: DB,
    series: &[HistogramSeries],
    config: &ChartConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let drawable: Vec<(&HistogramSeries, Vec<(f64, f64)>)> = series
        .iter()
        .filter_map(|s| s.histogram.as_ref().map(|h| (s, step_outline(h))))
        .collect();

    let max_count = drawable
        .iter()
        .filter_map(|(s, _)| s.histogram.as_ref())
        .map(StepHistogram::max_count)
        .max()
        .unwrap_or(1)
        .max(1) as f64;
    let x_range = 0.0..max_count * (1.0 + AXIS_MARGIN);
    let y_range = padded(
        extent(drawable.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1))),
        AXIS_MARGIN,
    );

    let root = backend.into_drawing_area();
    let area = titled_area(&root, config)?;
    let mut chart = chart_builder(&area, config).build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.x_label).y_desc(&config.y_label);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for (s, outline) in drawable {
        let color = s.color.to_rgb();
        chart
            .draw_series(LineSeries::new(outline, color.stroke_width(2)))?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    if series.iter().any(|s| s.histogram.is_some()) {
        draw_legend(&mut chart)?;
    }
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::histogram_bins;
    use tempfile::NamedTempFile;

    fn hist(samples: &[f64]) -> Option<StepHistogram> {
        StepHistogram::from_bins(samples, &histogram_bins(samples))
    }

    fn config() -> ChartConfig {
        ChartConfig::builder("Root segments per depth")
            .subtitle("(segment length=2 cm)")
            .x_label("Segments")
            .y_label("Root Depth (cm)")
            .build()
            .unwrap()
    }

    #[test]
    fn outline_closes_on_value_axis() {
        let h = StepHistogram {
            edges: vec![-3.0, -2.0, -1.0],
            counts: vec![4, 1],
        };
        assert_eq!(
            step_outline(&h),
            vec![
                (0.0, -3.0),
                (4.0, -3.0),
                (4.0, -2.0),
                (1.0, -2.0),
                (1.0, -1.0),
                (0.0, -1.0)
            ]
        );
    }

    #[test]
    fn writes_svg_skipping_undrawable_groups() {
        let tmp = NamedTempFile::new().unwrap();
        let out = tmp.path().with_extension("svg");
        let series = [
            HistogramSeries {
                label: "Tap root (Main)".into(),
                color: SeriesColor::cycle(0),
                histogram: hist(&[-0.5, -3.0, -7.5, -12.0]),
            },
            HistogramSeries {
                label: "Lateral (Side)".into(),
                color: SeriesColor::cycle(1),
                histogram: hist(&[-1.0, -1.0]),
            },
        ];
        assert!(series[1].histogram.is_none());
        plot_step_histograms(&series, &out, &config()).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("Tap root (Main)"));
        assert!(!svg.contains("Lateral (Side)"));
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn all_skipped_still_writes_frame() {
        let tmp = NamedTempFile::new().unwrap();
        let out = tmp.path().with_extension("png");
        let series = [HistogramSeries {
            label: "flat".into(),
            color: SeriesColor::cycle(0),
            histogram: None,
        }];
        plot_step_histograms(&series, &out, &config()).unwrap();
        assert!(out.exists());
        let _ = std::fs::remove_file(out);
    }
}
