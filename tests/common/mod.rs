use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use sim_plots::{PlotError, cli};
use tempfile::TempDir;

/// Write `content` to `dir/name` and return the path.
pub fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Run the CLI as if invoked with `args` (without the binary name).
pub fn run(args: &[&str]) -> Result<(), PlotError> {
    let argv = std::iter::once("sim-plots").chain(args.iter().copied());
    cli::run(cli::Cli::try_parse_from(argv).unwrap())
}

pub fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

pub const PERFORMANCE: &str = "\
100;;3;31.5;29.0;30.2
50;;4;58.1;60.3;59.7;61.0
10;;2;144.0;150.5
";

pub const SIM_MODES: &str = "\
pause;play;fast forward;
3;4;2
60;45;20
61;44;22
59;47;
;46;
";

pub const ROOT_LENGTH: &str = "\
0;0;0;0
1;0.12;0.02;0
2;0.25;0.05;0.01
3;0.41;0.09;0.02
";

pub const ROOT_TYPES: &str = "\
#8b4513;Tap root (Main)
#d2691e;First order (Lateral)
#f4a460;Second order (Lateral)
";

pub const NUTRIENTS: &str = "\
0;10;4
1;12.5;4.2
2;15;3.9
";

pub const NUTRIENT_TYPES: &str = "Nitrogen\nPhosphorus\n";

pub const ROOT_HIST: &str = "\
5;2;0
-0.5;-1.0;
-2.0;-1.3;
-4.5;;
-8.0;;
-12.0;;
";
