use anyhow::Result;
use clap::Parser;
use fontgrid::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Routes log::info!() etc. from the library crates to the debug log file.
    // When RUST_LOG is set, also mirrors to stderr.
    fontgrid::debug::init_log_bridge(cli.log_level.map(Into::into));

    log::info!("Starting fontgrid");
    let result = cli::run(cli);
    if let Err(ref e) = result {
        fontgrid::debug_error!("CLI", "{e:#}");
    }
    result
}
