//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field.

mod font;

pub use font::{bool_true, font_family, font_size};
