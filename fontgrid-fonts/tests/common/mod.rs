//! Shared fakes for fontgrid-fonts integration tests.
//!
//! Fake font bytes are four copies of the face's cell width; a leading
//! `0xFF` marks the bytes as corrupt. A fifth byte marks a color face.
//!
//! ```ignore
//! mod common;
//! use common::{FakeDiscovery, FakeLoader, fake_library};
//! ```

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fontgrid_fonts::{
    BuiltinFaces, Candidates, DeferredFace, Descriptor, Discover, Face, FaceData, FaceLoader,
    FaceMetrics, FaceSource, FontError, Library, LoadOptions, SharedGridSet,
};
use parking_lot::Mutex;

/// Cell width of the built-in regular face.
pub const BUILTIN_WIDTH: u8 = 10;
/// Cell width of the bundled emoji faces.
pub const EMOJI_WIDTH: u8 = 20;

pub fn fake_font(width: u8) -> Vec<u8> {
    vec![width; 4]
}

pub fn fake_color_font(width: u8) -> Vec<u8> {
    vec![width; 5]
}

pub fn corrupt_font() -> Vec<u8> {
    vec![0xFF; 4]
}

/// Loader that reads the fake byte format and records every load.
#[derive(Default)]
pub struct FakeLoader {
    loads: Mutex<Vec<String>>,
}

impl FakeLoader {
    pub fn loaded(&self) -> Vec<String> {
        self.loads.lock().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.lock().len()
    }
}

impl FaceLoader for FakeLoader {
    fn load(&self, name: &str, data: FaceData, options: &LoadOptions) -> Result<Face, FontError> {
        let bytes = data.bytes();
        if bytes.is_empty() || bytes[0] == 0xFF {
            return Err(FontError::InvalidFontData {
                name: name.to_string(),
            });
        }
        let metrics = FaceMetrics {
            cell_width: f64::from(bytes[0]),
            ascent: 12.0,
            descent: -4.0,
            line_gap: 0.0,
            ..FaceMetrics::default()
        };
        let color = bytes.len() > 4;
        self.loads.lock().push(name.to_string());
        Ok(Face::new(name, data, metrics, color, options.clone()))
    }
}

/// One face known to [`FakeDiscovery`].
#[derive(Debug, Clone)]
pub struct FakeFace {
    pub family: String,
    pub style_name: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub bytes: Vec<u8>,
}

impl FakeFace {
    pub fn new(family: &str, width: u8) -> Self {
        Self {
            family: family.to_string(),
            style_name: None,
            bold: false,
            italic: false,
            bytes: fake_font(width),
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn named(mut self, style: &str) -> Self {
        self.style_name = Some(style.to_string());
        self
    }

    pub fn with_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.bytes = bytes;
        self
    }

    fn name(&self) -> String {
        let mut name = self.family.clone();
        if let Some(style) = &self.style_name {
            name.push(' ');
            name.push_str(style);
        }
        if self.bold {
            name.push_str(" Bold");
        }
        if self.italic {
            name.push_str(" Italic");
        }
        name
    }
}

/// In-memory discovery with the same matching rules as the fontdb backend.
#[derive(Default)]
pub struct FakeDiscovery {
    faces: Vec<FakeFace>,
    fail: bool,
    queries: Mutex<Vec<Descriptor>>,
}

impl FakeDiscovery {
    pub fn new(faces: Vec<FakeFace>) -> Self {
        Self {
            faces,
            ..Self::default()
        }
    }

    /// Discovery whose backend always errors.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<Descriptor> {
        self.queries.lock().clone()
    }
}

impl Discover for FakeDiscovery {
    fn discover(&self, descriptor: &Descriptor) -> Result<Candidates<'_>, FontError> {
        self.queries.lock().push(descriptor.clone());
        if self.fail {
            return Err(FontError::Discovery("backend unavailable".to_string()));
        }

        let mut matches: Vec<&FakeFace> = self
            .faces
            .iter()
            .filter(|f| f.family.eq_ignore_ascii_case(&descriptor.family))
            .filter(|f| match &descriptor.style {
                Some(style) => f.style_name.as_deref() == Some(style.as_str()),
                None => (!descriptor.bold || f.bold) && (!descriptor.italic || f.italic),
            })
            .collect();
        matches.sort_by_key(|f| (f.bold != descriptor.bold, f.italic != descriptor.italic));

        let variations = descriptor.variations.clone();
        Ok(Box::new(matches.into_iter().map(move |f| DeferredFace {
            name: f.name(),
            source: FaceSource::Memory(Arc::new(f.bytes.clone())),
            index: 0,
            variations: variations.clone(),
        })))
    }
}

pub fn builtin_faces() -> BuiltinFaces {
    BuiltinFaces::new(
        [
            FaceData::new(fake_font(BUILTIN_WIDTH)),
            FaceData::new(fake_font(BUILTIN_WIDTH + 1)),
            FaceData::new(fake_font(BUILTIN_WIDTH + 2)),
            FaceData::new(fake_font(BUILTIN_WIDTH + 3)),
        ],
        FaceData::new(fake_color_font(EMOJI_WIDTH)),
        FaceData::new(fake_font(EMOJI_WIDTH + 1)),
    )
}

/// A library over the fake built-ins with bundled emoji.
pub fn fake_library(loader: Arc<FakeLoader>) -> Library {
    Library::with_loader(builtin_faces(), loader).with_system_emoji(None)
}

/// A registry over `discovery` that counts how often the discovery handle
/// is created.
pub fn grid_set(
    loader: Arc<FakeLoader>,
    discovery: Arc<FakeDiscovery>,
) -> (SharedGridSet, Arc<AtomicUsize>) {
    let inits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&inits);
    let set = SharedGridSet::with_discovery(fake_library(loader), move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(Arc::clone(&discovery) as Arc<dyn Discover>)
    });
    (set, inits)
}
