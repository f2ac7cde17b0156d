//! Command-line interface for fontgrid.
//!
//! `fontgrid key` prints the fingerprint a configuration hashes to without
//! touching any font files. `fontgrid inspect` builds the grid through a
//! [`SharedGridSet`] and prints its fallback chains and cell metrics.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use fontgrid_config::Config;
use fontgrid_fonts::{BuiltinFaces, DerivedConfig, DesiredSize, Key, Library, SharedGridSet};

use crate::inspect::{GridSummary, KeySummary};

/// fontgrid - inspect shared font grids
#[derive(Parser, Debug)]
#[command(name = "fontgrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level written to the debug log (overrides RUST_LOG and DEBUG_LEVEL)
    #[arg(long, value_enum, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a grid and print its faces and metrics
    Inspect {
        /// Config file (default: ~/.config/fontgrid/config.yaml)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Font size in points (default: font_size from the config)
        #[arg(long, value_name = "PT")]
        size: Option<f32>,

        /// Directory holding the built-in faces (default: <config dir>/fonts)
        #[arg(long, value_name = "DIR")]
        builtin_dir: Option<PathBuf>,
    },
    /// Print the key a configuration hashes to
    Key {
        /// Config file (default: ~/.config/fontgrid/config.yaml)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Font size in points (default: font_size from the config)
        #[arg(long, value_name = "PT")]
        size: Option<f32>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Run the parsed command, writing its report to stdout.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Key { config, size } => {
            let (config, size) = load_config(config.as_deref(), size)?;
            print!("{}", describe_key(&config, size));
        }
        Commands::Inspect {
            config,
            size,
            builtin_dir,
        } => {
            let (config, size) = load_config(config.as_deref(), size)?;
            let builtin_dir = builtin_dir.unwrap_or_else(|| Config::config_dir().join("fonts"));
            let builtin = BuiltinFaces::load_dir(&builtin_dir).with_context(|| {
                format!("Failed to load built-in faces from {}", builtin_dir.display())
            })?;
            let set = SharedGridSet::new(Library::new(builtin));
            print!("{}", inspect_grid(&set, &config, size)?);
        }
    }
    Ok(())
}

/// Load the config at `path` (or the default location) and derive the font
/// settings, with `size` overriding the configured point size.
pub fn load_config(path: Option<&Path>, size: Option<f32>) -> Result<(DerivedConfig, DesiredSize)> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    let points = size.unwrap_or(config.font_size);
    if !(points.is_finite() && points > 0.0) {
        bail!("Font size must be a positive number, got {points}");
    }
    crate::debug_info!("CLI", "Using {} families at {:.1}pt", config.font_family.len(), points);

    Ok((DerivedConfig::from_config(&config), DesiredSize::new(points)))
}

/// Report for `fontgrid key`.
pub fn describe_key(config: &DerivedConfig, size: DesiredSize) -> String {
    KeySummary(&Key::new(config, size)).to_string()
}

/// Report for `fontgrid inspect`. The grid is released before returning.
pub fn inspect_grid(
    set: &SharedGridSet,
    config: &DerivedConfig,
    size: DesiredSize,
) -> Result<String> {
    let (key, grid) = set.acquire(config, size).context("Failed to build font grid")?;
    let report = format!("{}{}", KeySummary(&key), GridSummary(&grid));
    set.release(&key);
    crate::debug_log!("CLI", "Released grid {} ({} grids remain)", grid.id(), set.count());
    Ok(report)
}
