//! Loaded font faces and the loader seam.
//!
//! A [`FaceLoader`] turns raw font bytes plus [`LoadOptions`] into a
//! [`Face`] with its pixel metrics. [`SwashLoader`] is the production
//! implementation; tests substitute their own.

mod builtin;
mod swash_loader;

pub use builtin::BuiltinFaces;
pub use swash_loader::SwashLoader;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use fontgrid_config::{FontVariation, ThinStrokesMode};
use swash::FontRef;

use crate::error::FontError;
use crate::metrics::FaceMetrics;

/// DPI used when the caller does not supply one.
pub const DEFAULT_DPI: u16 = if cfg!(target_os = "macos") { 72 } else { 96 };

/// Requested font size.
#[derive(Debug, Clone, Copy)]
pub struct DesiredSize {
    pub points: f32,
    pub xdpi: u16,
    pub ydpi: u16,
}

impl DesiredSize {
    /// A size at the platform default DPI.
    pub fn new(points: f32) -> Self {
        Self::with_dpi(points, DEFAULT_DPI, DEFAULT_DPI)
    }

    pub fn with_dpi(points: f32, xdpi: u16, ydpi: u16) -> Self {
        Self { points, xdpi, ydpi }
    }

    /// Size in pixels (em height).
    pub fn pixels(&self) -> f32 {
        self.points * f32::from(self.ydpi) / 72.0
    }
}

// Points compare by bit pattern so sizes can participate in keys.
impl PartialEq for DesiredSize {
    fn eq(&self, other: &Self) -> bool {
        self.points.to_bits() == other.points.to_bits()
            && self.xdpi == other.xdpi
            && self.ydpi == other.ydpi
    }
}

impl Eq for DesiredSize {}

impl Hash for DesiredSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.points.to_bits().hash(state);
        self.xdpi.hash(state);
        self.ydpi.hash(state);
    }
}

/// Platform rasterizer flags passed through to face loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadFlags {
    pub hinting: bool,
    pub antialias: bool,
    pub thin_strokes: ThinStrokesMode,
}

impl Default for LoadFlags {
    fn default() -> Self {
        Self {
            hinting: true,
            antialias: true,
            thin_strokes: ThinStrokesMode::default(),
        }
    }
}

/// Everything a loader needs besides the bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    pub size: DesiredSize,
    pub variations: Vec<FontVariation>,
    pub flags: LoadFlags,
}

impl LoadOptions {
    pub fn new(size: DesiredSize, flags: LoadFlags) -> Self {
        Self {
            size,
            variations: Vec::new(),
            flags,
        }
    }

    /// The same options with `variations` applied.
    pub fn with_variations(&self, variations: &[FontVariation]) -> Self {
        Self {
            variations: variations.to_vec(),
            ..self.clone()
        }
    }
}

/// Shared, immutable font bytes plus the face index inside them.
#[derive(Clone)]
pub struct FaceData {
    data: Arc<dyn AsRef<[u8]> + Send + Sync>,
    index: u32,
}

impl fmt::Debug for FaceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceData")
            .field("data_len", &self.bytes().len())
            .field("index", &self.index)
            .finish()
    }
}

impl FaceData {
    pub fn new(data: Vec<u8>) -> Self {
        Self::shared(Arc::new(data), 0)
    }

    /// Wrap embedded font data without copying it.
    pub fn from_static(data: &'static [u8]) -> Self {
        Self::shared(Arc::new(data), 0)
    }

    /// Wrap already-shared bytes, selecting face `index` (for collections).
    pub fn shared(data: Arc<dyn AsRef<[u8]> + Send + Sync>, index: u32) -> Self {
        Self { data, index }
    }

    pub fn bytes(&self) -> &[u8] {
        (*self.data).as_ref()
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Parse the face header. `None` if the bytes are not a font.
    pub fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(self.bytes(), self.index as usize)
    }
}

/// A face ready for glyph lookups.
#[derive(Debug, Clone)]
pub struct Face {
    name: String,
    data: FaceData,
    metrics: FaceMetrics,
    color: bool,
    options: LoadOptions,
}

impl Face {
    pub fn new(
        name: impl Into<String>,
        data: FaceData,
        metrics: FaceMetrics,
        color: bool,
        options: LoadOptions,
    ) -> Self {
        Self {
            name: name.into(),
            data,
            metrics,
            color,
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &FaceData {
        &self.data
    }

    /// Raw metrics in pixels at the loaded size.
    pub fn metrics(&self) -> FaceMetrics {
        self.metrics
    }

    /// Whether the face carries color glyph tables.
    pub fn is_color(&self) -> bool {
        self.color
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }
}

/// Loads faces from bytes.
pub trait FaceLoader: Send + Sync {
    /// Load `data` as a face called `name` with `options`.
    fn load(&self, name: &str, data: FaceData, options: &LoadOptions) -> Result<Face, FontError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_scale_with_dpi() {
        assert_eq!(DesiredSize::with_dpi(12.0, 72, 72).pixels(), 12.0);
        assert_eq!(DesiredSize::with_dpi(12.0, 96, 96).pixels(), 16.0);
        assert_eq!(DesiredSize::with_dpi(12.0, 96, 144).pixels(), 24.0);
    }

    #[test]
    fn test_size_equality_includes_dpi() {
        let a = DesiredSize::with_dpi(12.0, 96, 96);
        assert_eq!(a, DesiredSize::with_dpi(12.0, 96, 96));
        assert_ne!(a, DesiredSize::with_dpi(12.0, 72, 96));
        assert_ne!(a, DesiredSize::with_dpi(12.5, 96, 96));
    }

    #[test]
    fn test_garbage_bytes_have_no_font_ref() {
        let data = FaceData::new(vec![0u8; 16]);
        assert!(data.font_ref().is_none());
        assert_eq!(data.bytes().len(), 16);
    }

    #[test]
    fn test_static_data_is_not_copied() {
        static BYTES: [u8; 4] = [1, 2, 3, 4];
        let data = FaceData::from_static(&BYTES);
        assert_eq!(data.bytes().as_ptr(), BYTES.as_ptr());
    }
}
