//! Typed error types for fontgrid-fonts.

use std::path::PathBuf;
use thiserror::Error;

use crate::style::Style;

/// Errors produced while loading faces or assembling a collection.
///
/// A discovery miss is not an error; it only leaves a gap that later
/// assembly steps fill.
#[derive(Debug, Error)]
pub enum FontError {
    /// The bytes could not be parsed as a font face.
    #[error("invalid font data for '{name}'")]
    InvalidFontData {
        /// Family or face name the data was loaded for.
        name: String,
    },

    /// A font file could not be read.
    #[error("failed to read font file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The discovery backend failed (as opposed to finding nothing).
    #[error("font discovery failed: {0}")]
    Discovery(String),

    /// A built-in face failed to load; the embedded data is corrupt.
    #[error("built-in {name} face failed to load: {source}")]
    BuiltinFace {
        name: &'static str,
        #[source]
        source: Box<FontError>,
    },

    /// No regular face could be loaded to derive cell metrics from.
    #[error("no loadable regular face in collection")]
    NoPrimaryFace,

    /// A face index does not refer to an entry in the collection.
    #[error("no face at index {index} for style {style}")]
    MissingFace { style: Style, index: usize },
}
