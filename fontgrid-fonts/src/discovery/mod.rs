//! Font discovery: turning a [`Descriptor`] into candidate faces.

mod system;

pub use system::FontdbDiscovery;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Arc;

use fontgrid_config::FontVariation;

use crate::error::FontError;
use crate::face::{Face, FaceData, FaceLoader, LoadOptions};

/// One query submitted to discovery.
///
/// An explicit `style` name and the `bold`/`italic` flags are mutually
/// exclusive; a descriptor with a pinned style never sets the flags.
#[derive(Debug, Clone, Default)]
pub struct Descriptor {
    pub family: String,
    pub style: Option<String>,
    /// Point size.
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub variations: Vec<FontVariation>,
}

impl Descriptor {
    pub fn family(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..Self::default()
        }
    }

    /// The same query with bold/italic search flags cleared.
    pub fn without_style_flags(&self) -> Self {
        Self {
            bold: false,
            italic: false,
            ..self.clone()
        }
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.style == other.style
            && self.size.to_bits() == other.size.to_bits()
            && self.bold == other.bold
            && self.italic == other.italic
            && self.variations == other.variations
    }
}

impl Eq for Descriptor {}

impl Hash for Descriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.style.hash(state);
        self.size.to_bits().hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.variations.hash(state);
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        if let Some(style) = &self.style {
            write!(f, " [{style}]")?;
        }
        if self.bold {
            f.write_str(" bold")?;
        }
        if self.italic {
            f.write_str(" italic")?;
        }
        write!(f, " {}pt", self.size)?;
        for v in &self.variations {
            write!(f, " {v}")?;
        }
        Ok(())
    }
}

/// Where a discovered face's bytes live.
#[derive(Clone)]
pub enum FaceSource {
    Memory(Arc<dyn AsRef<[u8]> + Send + Sync>),
    File(PathBuf),
}

impl fmt::Debug for FaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceSource::Memory(data) => write!(f, "Memory({} bytes)", (**data).as_ref().len()),
            FaceSource::File(path) => write!(f, "File({path:?})"),
        }
    }
}

/// A discovered face that has not been loaded yet.
#[derive(Debug, Clone)]
pub struct DeferredFace {
    pub name: String,
    pub source: FaceSource,
    pub index: u32,
    /// Variations from the descriptor that found this face.
    pub variations: Vec<FontVariation>,
}

impl DeferredFace {
    /// Read the bytes and load the face.
    pub fn load(&self, loader: &dyn FaceLoader, options: &LoadOptions) -> Result<Face, FontError> {
        let data = match &self.source {
            FaceSource::Memory(data) => FaceData::shared(Arc::clone(data), self.index),
            FaceSource::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| FontError::Io {
                    path: path.clone(),
                    source,
                })?;
                FaceData::shared(Arc::new(bytes), self.index)
            }
        };
        loader.load(&self.name, data, &options.with_variations(&self.variations))
    }
}

/// Candidate faces for one descriptor, best match first.
pub type Candidates<'a> = Box<dyn Iterator<Item = DeferredFace> + 'a>;

/// A font discovery backend.
///
/// Finding nothing is an empty iterator, not an error. Errors are reserved
/// for backend failures.
pub trait Discover: Send + Sync {
    fn discover(&self, descriptor: &Descriptor) -> Result<Candidates<'_>, FontError>;
}
