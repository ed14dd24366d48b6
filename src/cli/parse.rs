use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::{
    constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH},
    data::parse_display_flag,
    error::FormatError,
};

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "sim-plots",
    version,
    about = "Charts from root-growth simulation logs"
)]
pub struct Cli {
    /// Image width in pixels
    #[arg(long, global = true, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, global = true, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Debug logging and stage timings
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Median/min/max FPS per agent count
    Performance(PerformanceArgs),
    /// FPS box plot per simulation mode
    SimModes(SimModesArgs),
    /// Root length per root type over time
    RootLength(TypeTableArgs),
    /// Stored nutrients per nutrient type over time
    RootNutrients(TypeTableArgs),
    /// Segment depth histogram per root type
    RootHist(RootHistArgs),
    /// Show accepted type-table color names
    Colors,
    /// Print example invocations
    Examples,
}

/// Input, output and display flag shared by every utility.
#[derive(Args, Debug)]
pub struct IoArgs {
    /// Data file written by the simulation
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Output image (.png, .svg, .jpg, .bmp)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Show a terminal preview after saving (true/false, 1/0, yes/no)
    #[arg(value_name = "DISPLAY")]
    pub display: String,
}

impl IoArgs {
    /// The display flag, parsed from its fixed token set.
    pub fn display(&self) -> Result<bool, FormatError> {
        parse_display_flag(&self.display)
    }
}

/// `sim-plots performance …`
#[derive(Args, Debug)]
pub struct PerformanceArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Agent type name, used in the axis label
    #[arg(value_name = "AGENT_TYPE")]
    pub agent_type: String,

    /// Simulation mode name, used in the subtitle
    #[arg(value_name = "SIM_MODE")]
    pub sim_mode: String,
}

/// `sim-plots sim-modes …`
#[derive(Args, Debug)]
pub struct SimModesArgs {
    #[command(flatten)]
    pub io: IoArgs,
}

/// `sim-plots root-length …` and `sim-plots root-nutrients …`
#[derive(Args, Debug)]
pub struct TypeTableArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Number of groups (columns after the time column)
    #[arg(value_name = "TYPES")]
    pub types: usize,

    /// Side file with one row per group
    #[arg(value_name = "TYPE_TABLE")]
    pub type_table: PathBuf,
}

/// `sim-plots root-hist …`
#[derive(Args, Debug)]
pub struct RootHistArgs {
    #[command(flatten)]
    pub table: TypeTableArgs,

    /// Segment length in cm, shown in the subtitle
    #[arg(value_name = "SEGMENT_LENGTH")]
    pub segment_length: String,
}
