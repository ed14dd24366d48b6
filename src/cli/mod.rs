mod handlers;
pub mod parse;

pub use handlers::ImageSize;
pub use parse::Cli;

use tracing_subscriber::{EnvFilter, fmt};

use crate::core::error::PlotError;

/// Install the stderr subscriber; `RUST_LOG` wins over the default level.
pub fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the parsed command line.
pub fn run(cli: Cli) -> Result<(), PlotError> {
    init_logging(cli.debug);
    let size = ImageSize {
        width: cli.width,
        height: cli.height,
    };
    match cli.cmd {
        parse::Command::Performance(a) => handlers::performance(&a, size),
        parse::Command::SimModes(a) => handlers::sim_modes(&a, size),
        parse::Command::RootLength(a) => handlers::root_length(&a, size),
        parse::Command::RootNutrients(a) => handlers::root_nutrients(&a, size),
        parse::Command::RootHist(a) => handlers::root_hist(&a, size),
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}
