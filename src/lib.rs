//! fontgrid: process-wide shared font grids for terminal surfaces.
//!
//! Terminal surfaces that use the same font configuration at the same size
//! share one [`Grid`] through a [`SharedGridSet`]. This crate re-exports the
//! workspace crates and adds the `fontgrid` inspector binary's pieces.
//!
//! ```rust,no_run
//! use fontgrid::{BuiltinFaces, Config, DerivedConfig, DesiredSize, Library, SharedGridSet};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = DerivedConfig::from_config(&Config::load()?);
//! let builtin = BuiltinFaces::load_dir(Config::config_dir().join("fonts"))?;
//! let set = SharedGridSet::new(Library::new(builtin));
//!
//! let (key, grid) = set.acquire(&config, DesiredSize::new(13.0))?;
//! println!("cell {}x{}", grid.metrics().cell_width, grid.metrics().cell_height);
//! set.release(&key);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod debug;
pub mod inspect;

pub use fontgrid_config::{
    Config, ConfigError, FontRange, FontStyleSetting, FontVariation, MetricModifier,
    SyntheticStyle, ThinStrokesMode,
};
pub use fontgrid_fonts::{
    BuiltinFaces, Collection, DerivedConfig, Descriptor, DesiredSize, Discover, FontError,
    FontdbDiscovery, Grid, Key, Library, MetricKey, Metrics, SharedGridSet, Style,
};
