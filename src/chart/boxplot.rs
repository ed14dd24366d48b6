//! Grouped box-and-whisker chart drawn from precomputed [`BoxStats`].
//!
//! Each glyph is an outlined box from `q1` to `q3`, a solid median bar, a
//! dashed mean bar and capped whiskers. Groups without statistics keep their
//! slot and label so the x axis always lists every group.

use std::{error::Error, path::Path};

use plotters::{prelude::*, series::DashedLineSeries};

use super::{AXIS_MARGIN, DASH, GAP, OutputFormat, chart_builder, titled_area, write_pdf};
use crate::core::{
    aggregate::BoxStats,
    bounds::{extent, padded},
    color::SeriesColor,
    config::ChartConfig,
    error::PlotError,
};

const BOX_HALF_WIDTH: f64 = 0.25;
const CAP_HALF_WIDTH: f64 = 0.125;

/// One x slot of the box plot.
#[derive(Clone, Debug)]
pub struct BoxGroup {
    pub label: String,
    pub stats: Option<BoxStats>,
}

impl BoxGroup {
    pub fn new(label: impl Into<String>, stats: Option<BoxStats>) -> Self {
        Self {
            label: label.into(),
            stats,
        }
    }
}

/// Draw one box per group, labelled on the x axis, and write to `output`.
///
/// # Errors
///
/// `Config` for an unknown extension, `Render` when no group has
/// statistics or the backend fails.
pub fn plot_boxes(groups: &[BoxGroup], output: &Path, config: &ChartConfig) -> Result<(), PlotError> {
    let format = OutputFormat::from_path(output)?;
    if groups.iter().all(|g| g.stats.is_none()) {
        return Err(PlotError::Render("no group has any samples".into()));
    }

    let size = (config.width, config.height);
    let drawn = match format {
        OutputFormat::Svg => plot_boxes_impl(SVGBackend::new(output, size), groups, config),
        OutputFormat::Bitmap => plot_boxes_impl(BitMapBackend::new(output, size), groups, config),
        OutputFormat::Pdf => {
            let mut svg = String::new();
            plot_boxes_impl(SVGBackend::with_string(&mut svg, size), groups, config)
                .and_then(|()| write_pdf(&svg, output))
        }
    };
    drawn.map_err(|e| PlotError::Render(e.to_string()))
}

/// Label of the slot nearest to `x`, empty between slots.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn slot_label(groups: &[BoxGroup], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 1e-6 {
        return String::new();
    }
    groups
        .get(idx as usize)
        .map(|g| g.label.clone())
        .unwrap_or_default()
}

#[allow(clippy::cast_precision_loss)]
fn plot_boxes_impl<DB: DrawingBackend>(
    backend: DB,
    groups: &[BoxGroup],
    config: &ChartConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let n = groups.len() as f64;
    let y_range = padded(
        extent(
            groups
                .iter()
                .filter_map(|g| g.stats)
                .flat_map(|s| [s.whisker_lo, s.whisker_hi, s.mean]),
        ),
        AXIS_MARGIN,
    );

    let root = backend.into_drawing_area();
    let area = titled_area(&root, config)?;
    let mut chart = chart_builder(&area, config)
        .build_cartesian_2d(-0.5..n - 0.5, y_range)?;

    let label_of = |x: &f64| slot_label(groups, *x);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .x_labels(groups.len() * 2 + 1)
        .x_label_formatter(&label_of)
        .disable_x_mesh();
    if !config.show_grid {
        mesh.disable_y_mesh();
    }
    mesh.draw()?;

    let median_color = SeriesColor::cycle(1).to_rgb();
    let mean_color = SeriesColor::cycle(2).to_rgb();

    for (i, stats) in groups
        .iter()
        .enumerate()
        .filter_map(|(i, g)| g.stats.map(|s| (i as f64, s)))
    {
        let (left, right) = (i - BOX_HALF_WIDTH, i + BOX_HALF_WIDTH);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, stats.q1), (right, stats.q3)],
            BLACK.stroke_width(1),
        )))?;

        let whisker = |from: f64, to: f64| PathElement::new(vec![(i, from), (i, to)], &BLACK);
        let cap = |y: f64| {
            PathElement::new(vec![(i - CAP_HALF_WIDTH, y), (i + CAP_HALF_WIDTH, y)], &BLACK)
        };
        chart.draw_series([
            whisker(stats.q1, stats.whisker_lo),
            whisker(stats.q3, stats.whisker_hi),
            cap(stats.whisker_lo),
            cap(stats.whisker_hi),
        ])?;

        chart.draw_series(std::iter::once(PathElement::new(
            vec![(left, stats.median), (right, stats.median)],
            median_color.stroke_width(2),
        )))?;
        chart.draw_series(DashedLineSeries::new(
            [(left, stats.mean), (right, stats.mean)],
            DASH,
            GAP,
            mean_color.stroke_width(2),
        ))?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::box_stats;
    use tempfile::NamedTempFile;

    fn config() -> ChartConfig {
        ChartConfig::builder("FPS by simulation mode")
            .x_label("Modes")
            .y_label("FPS")
            .build()
            .unwrap()
    }

    #[test]
    fn slot_labels_only_on_integers() {
        let groups = [BoxGroup::new("pause", None), BoxGroup::new("play", None)];
        assert_eq!(slot_label(&groups, 0.0), "pause");
        assert_eq!(slot_label(&groups, 1.0), "play");
        assert_eq!(slot_label(&groups, 0.5), "");
        assert_eq!(slot_label(&groups, 2.0), "");
        assert_eq!(slot_label(&groups, -1.0), "");
    }

    #[test]
    fn writes_svg_with_a_skipped_group() {
        let tmp = NamedTempFile::new().unwrap();
        let out = tmp.path().with_extension("svg");
        let groups = [
            BoxGroup::new("pause", box_stats(&[60.0, 61.0, 59.0]).ok()),
            BoxGroup::new("play", None),
            BoxGroup::new("fast forward", box_stats(&[30.0, 35.0, 33.0, 80.0]).ok()),
        ];
        plot_boxes(&groups, &out, &config()).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<svg"));
        for label in ["pause", "play", "fast forward"] {
            assert!(svg.contains(label), "missing x label {label}");
        }
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn writes_png() {
        let tmp = NamedTempFile::new().unwrap();
        let out = tmp.path().with_extension("png");
        let groups = [BoxGroup::new("pause", box_stats(&[1.0]).ok())];
        plot_boxes(&groups, &out, &config()).unwrap();
        assert!(out.exists());
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn rejects_groups_without_samples() {
        let groups = [BoxGroup::new("pause", None)];
        let err = plot_boxes(&groups, Path::new("never.svg"), &config()).unwrap_err();
        assert!(matches!(err, PlotError::Render(_)));
    }
}
