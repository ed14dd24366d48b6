use std::{path::Path, time::Instant};

use tracing::{debug, info};

use crate::{
    core::{
        FIELD_DELIMITER,
        color::{DEFAULT_CYCLE, NAMED_COLORS, SeriesColor, colorize},
        data::SampleKind,
        error::PlotError,
        reshape::{
            ColumnLayout, ColumnarSeries, TypeTable, TypeTableShape, load_type_table,
            reshape_columnar, reshape_ragged,
        },
        table::TableReader,
    },
    preview,
    reports::{self, Report},
};

use super::parse::{PerformanceArgs, RootHistArgs, SimModesArgs, TypeTableArgs};

/// Image size requested on the command line.
#[derive(Clone, Copy, Debug)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Save the chart, then block on the preview if asked to.
fn finish(report: &Report, output: &Path, display: bool, size: ImageSize) -> Result<(), PlotError> {
    let cfg = report.chart_config(size.width, size.height)?;

    let t_render = Instant::now();
    report.render(output, &cfg)?;
    debug!(elapsed_us = t_render.elapsed().as_micros(), "render");
    info!(output = %output.display(), "chart written");

    if display {
        preview::show(&report.preview(), &cfg)?;
    }
    Ok(())
}

fn open(path: &Path) -> Result<TableReader<std::io::BufReader<std::fs::File>>, PlotError> {
    info!(path = %path.display(), "reading");
    TableReader::open(path, FIELD_DELIMITER)
}

pub fn performance(a: &PerformanceArgs, size: ImageSize) -> Result<(), PlotError> {
    let display = a.io.display()?;

    let t_ingest = Instant::now();
    let series = reshape_ragged(open(&a.io.data)?)?;
    debug!(elapsed_us = t_ingest.elapsed().as_micros(), "ingest");
    info!(groups = series.len(), "ragged series loaded");

    let report = reports::performance(&series, &a.agent_type, &a.sim_mode)?;
    finish(&report, &a.io.output, display, size)
}

pub fn sim_modes(a: &SimModesArgs, size: ImageSize) -> Result<(), PlotError> {
    let display = a.io.display()?;

    let t_ingest = Instant::now();
    let series = reshape_columnar(
        open(&a.io.data)?,
        ColumnLayout::LabelledCapped,
        SampleKind::Integer,
    )?;
    debug!(elapsed_us = t_ingest.elapsed().as_micros(), "ingest");
    info!(modes = series.group_count(), "mode samples loaded");

    let report = reports::sim_modes(&series)?;
    finish(&report, &a.io.output, display, size)
}

/// Time-series utilities differ only in table shape and report.
fn time_series(
    a: &TypeTableArgs,
    shape: TypeTableShape,
    size: ImageSize,
    report: fn(&ColumnarSeries, &TypeTable) -> Result<Report, PlotError>,
) -> Result<(), PlotError> {
    let display = a.io.display()?;

    let t_ingest = Instant::now();
    let table = load_type_table(&a.type_table, shape)?;
    let series = reshape_columnar(
        open(&a.io.data)?,
        ColumnLayout::TimeSeries { groups: a.types },
        SampleKind::Float,
    )?;
    debug!(elapsed_us = t_ingest.elapsed().as_micros(), "ingest");
    info!(
        groups = series.group_count(),
        steps = series.x.as_ref().map_or(0, Vec::len),
        types = table.len(),
        "time series loaded"
    );

    finish(&report(&series, &table)?, &a.io.output, display, size)
}

pub fn root_length(a: &TypeTableArgs, size: ImageSize) -> Result<(), PlotError> {
    time_series(a, TypeTableShape::ColorLabel, size, reports::root_length)
}

pub fn root_nutrients(a: &TypeTableArgs, size: ImageSize) -> Result<(), PlotError> {
    time_series(a, TypeTableShape::LabelOnly, size, reports::root_nutrients)
}

pub fn root_hist(a: &RootHistArgs, size: ImageSize) -> Result<(), PlotError> {
    let display = a.table.io.display()?;

    let t_ingest = Instant::now();
    let table = load_type_table(&a.table.type_table, TypeTableShape::ColorLabel)?;
    let series = reshape_columnar(
        open(&a.table.io.data)?,
        ColumnLayout::Capped {
            groups: a.table.types,
        },
        SampleKind::Float,
    )?;
    debug!(elapsed_us = t_ingest.elapsed().as_micros(), "ingest");
    info!(
        groups = series.group_count(),
        samples = series.series.iter().map(Vec::len).sum::<usize>(),
        "segment depths loaded"
    );

    let report = reports::root_hist(&series, &table, &a.segment_length)?;
    finish(&report, &a.table.io.output, display, size)
}

/// Pretty-print the colour names a type table may use.
pub fn colors() {
    println!("\nType-table colors:");
    for (name, c) in NAMED_COLORS {
        println!("{}", colorize(c, name));
    }
    println!("\nDefault cycle (also as tab:<name>):");
    for (i, c) in DEFAULT_CYCLE.iter().enumerate() {
        println!("{}", colorize(*c, &format!("C{i}")));
    }
    println!(
        "{}  (#1f77b4 or any other #RRGGBB)\n",
        colorize(SeriesColor::cycle(0), "#1f77b4")
    );
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "sim-plots";
    println!(
        "
Example invocations
-------------------
• Agent performance : {bin} performance perf.csv fps.png false Boid Play
• Simulation modes  : {bin} sim-modes modes.csv modes.svg false
• Root length       : {bin} root-length length.csv length.png true 3 root_types.csv
• Nutrients         : {bin} root-nutrients nutrients.csv nutrients.png false 2 nutrient_types.csv
• Depth histogram   : {bin} root-hist hist.csv hist.png false 3 root_types.csv 2
• Bigger image      : {bin} --width 1920 --height 1080 sim-modes modes.csv modes.png false
• Debug mode        : {bin} --debug root-length length.csv length.png false 3 root_types.csv
"
    );
}
