//! Font configuration management.
//!
//! # Sub-modules
//!
//! - [`config_struct`]: Core `Config` struct and its `Default` impl
//! - [`persistence`]: `impl Config` methods for load/save/path-resolution
//! - [`validation`]: `impl Config` semantic checks run after loading

pub mod config_struct;
pub mod persistence;
pub mod validation;

pub use config_struct::Config;
