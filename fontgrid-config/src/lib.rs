//! Configuration types consumed by fontgrid's font resolution.
//!
//! This crate provides:
//!
//! - The font section of the terminal configuration (`Config`)
//! - Per-style family lists, style overrides and variation axes
//! - Codepoint range overrides (`FontRange`)
//! - Metric modifiers (`MetricModifier`) parsed from `"20%"` / `"-2"` text
//! - YAML loading, saving and validation

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{
    FontRange, FontStyleSetting, FontVariation, MetricModifier, ModifierParseError,
    ModifierTarget, SyntheticStyle, ThinStrokesMode, VariationParseError,
};
