//! Shared font grids for fontgrid.
//!
//! This crate provides:
//! - Cell metrics computed from face metrics, adjustable by metric modifiers
//! - A canonical [`Key`] fingerprint for a font configuration at a size
//! - Collection assembly with discovered, synthesized, built-in and emoji
//!   fallback layers
//! - [`SharedGridSet`], a thread-safe reference-counted `Key -> Grid`
//!   registry so surfaces with the same configuration share one grid
//!
//! # Architecture
//!
//! A surface calls [`SharedGridSet::acquire`] with a [`DerivedConfig`] and a
//! [`DesiredSize`]. On a miss the set runs [`collection::assemble`]:
//! 1. Discovery for every descriptor of every style (deferred loading)
//! 2. Synthesized stand-ins for styles discovery could not fill
//! 3. The four built-in faces, loaded eagerly
//! 4. The platform emoji face or the two bundled emoji faces
//!
//! Surfaces call [`SharedGridSet::release`] when done; the last release
//! removes the grid.

pub mod codepoint_map;
pub mod collection;
pub mod derived_config;
pub mod discovery;
pub mod error;
pub mod face;
pub mod grid;
pub mod key;
pub mod library;
pub mod metrics;
pub mod shared_grid_set;
pub mod style;

// Re-export main types for convenience
pub use codepoint_map::CodepointMap;
pub use collection::{Collection, Entry, FaceIndex, Layer, Slot, Synthesis};
pub use derived_config::DerivedConfig;
pub use discovery::{Candidates, DeferredFace, Descriptor, Discover, FaceSource, FontdbDiscovery};
pub use error::FontError;
pub use face::{
    BuiltinFaces, DEFAULT_DPI, DesiredSize, Face, FaceData, FaceLoader, LoadFlags, LoadOptions,
    SwashLoader,
};
pub use grid::Grid;
pub use key::Key;
pub use library::Library;
pub use metrics::{FaceMetrics, MetricKey, Metrics, ModifierSet};
pub use shared_grid_set::SharedGridSet;
pub use style::{Style, StyleStatus};
