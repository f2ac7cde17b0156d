//! Style-complete face collections and the algorithm that assembles them.
//!
//! Each style holds an ordered fallback chain. Entries are appended in
//! layer order: discovered faces, then synthesized stand-ins, then the
//! built-in faces, then emoji. Codepoint resolution walks a chain front to
//! back and takes the first face that covers the codepoint.

use std::fmt;
use std::sync::Arc;

use crate::discovery::{DeferredFace, Descriptor, Discover};
use crate::error::FontError;
use crate::face::{Face, FaceData, FaceLoader, LoadOptions};
use crate::key::Key;
use crate::library::Library;
use crate::metrics::{Metrics, ModifierSet};
use crate::style::Style;

/// Position of an entry within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceIndex {
    pub style: Style,
    pub index: usize,
}

impl FaceIndex {
    pub fn new(style: Style, index: usize) -> Self {
        Self { style, index }
    }
}

/// Fallback layer an entry belongs to, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Discovered,
    Synthesized,
    Builtin,
    Emoji,
}

/// How a synthetic entry derives from its base face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Synthesis {
    Bold,
    Italic,
    BoldItalic,
}

#[derive(Debug, Clone)]
pub enum Slot {
    /// Found by discovery, not loaded yet.
    Deferred(DeferredFace),
    Loaded(Arc<Face>),
    /// Uses another entry's face unchanged.
    Alias(FaceIndex),
    /// Uses another entry's face with faux bold and/or slant.
    Synthetic { base: FaceIndex, synthesis: Synthesis },
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub slot: Slot,
    pub layer: Layer,
}

/// Faces for the four styles plus the cell metrics derived from them.
pub struct Collection {
    faces: [Vec<Entry>; 4],
    loader: Arc<dyn FaceLoader>,
    options: LoadOptions,
    metrics: Metrics,
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("faces", &self.faces)
            .field("options", &self.options)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Collection {
    pub fn new(loader: Arc<dyn FaceLoader>, options: LoadOptions) -> Self {
        Self {
            faces: Default::default(),
            loader,
            options,
            metrics: Metrics::default(),
        }
    }

    /// Append an entry to `style`'s chain.
    pub fn add(&mut self, style: Style, entry: Entry) -> FaceIndex {
        let chain = &mut self.faces[style.index()];
        debug_assert!(
            chain.last().is_none_or(|last| last.layer <= entry.layer),
            "fallback layers out of order for {style}"
        );
        chain.push(entry);
        FaceIndex::new(style, chain.len() - 1)
    }

    pub fn faces(&self, style: Style) -> &[Entry] {
        &self.faces[style.index()]
    }

    pub fn get(&self, index: FaceIndex) -> Option<&Entry> {
        self.faces[index.style.index()].get(index.index)
    }

    /// Total number of entries across all styles.
    pub fn len(&self) -> usize {
        self.faces.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Cell metrics of the primary face with modifiers applied.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// The face for `index`, loading a deferred entry in place. Aliases and
    /// synthetic entries resolve to their base face.
    pub fn load_face(&mut self, index: FaceIndex) -> Result<Arc<Face>, FontError> {
        let entry = self.get(index).ok_or(FontError::MissingFace {
            style: index.style,
            index: index.index,
        })?;

        match &entry.slot {
            Slot::Loaded(face) => Ok(Arc::clone(face)),
            Slot::Alias(base) | Slot::Synthetic { base, .. } => {
                let base = *base;
                debug_assert_ne!(base, index, "entry aliases itself");
                self.load_face(base)
            }
            Slot::Deferred(deferred) => {
                let face = Arc::new(deferred.load(self.loader.as_ref(), &self.options)?);
                log::debug!("Loaded deferred face '{}' for {}", face.name(), index.style);
                self.faces[index.style.index()][index.index].slot = Slot::Loaded(Arc::clone(&face));
                Ok(face)
            }
        }
    }

    /// Derive cell metrics from the first loadable regular face.
    fn update_metrics(&mut self, modifiers: &ModifierSet) -> Result<(), FontError> {
        for i in 0..self.faces(Style::Regular).len() {
            match self.load_face(FaceIndex::new(Style::Regular, i)) {
                Ok(face) => {
                    let mut metrics = Metrics::calc(face.metrics());
                    metrics.apply(modifiers);
                    log::info!(
                        "Cell metrics from '{}': {}x{} (baseline {})",
                        face.name(),
                        metrics.cell_width,
                        metrics.cell_height,
                        metrics.cell_baseline
                    );
                    self.metrics = metrics;
                    return Ok(());
                }
                Err(e) => log::warn!("Skipping unloadable regular face {}: {}", i, e),
            }
        }
        Err(FontError::NoPrimaryFace)
    }
}

/// Build a style-complete collection for `key`.
///
/// Discovery misses only leave gaps; discovery backend errors and corrupt
/// built-in faces abort the build.
pub fn assemble(
    key: &Key,
    library: &Library,
    discovery: Option<&dyn Discover>,
) -> Result<Collection, FontError> {
    let options = LoadOptions::new(key.size(), key.load_flags());
    let mut collection = Collection::new(Arc::clone(library.loader()), options);

    match discovery {
        Some(discovery) => add_discovered(&mut collection, key, discovery)?,
        None => log::info!("Font discovery unavailable, using built-in faces only"),
    }
    complete_styles(&mut collection, key);
    add_builtins(&mut collection, library)?;
    add_emoji(&mut collection, key, library, discovery)?;
    collection.update_metrics(key.metric_modifiers())?;

    Ok(collection)
}

fn first_candidate(
    discovery: &dyn Discover,
    descriptor: &Descriptor,
) -> Result<Option<DeferredFace>, FontError> {
    Ok(discovery.discover(descriptor)?.next())
}

fn add_discovered(
    collection: &mut Collection,
    key: &Key,
    discovery: &dyn Discover,
) -> Result<(), FontError> {
    for style in Style::ALL {
        for descriptor in key.descriptors_for_style(style) {
            let mut found = first_candidate(discovery, descriptor)?;

            // Some variable fonts only expose weight and slant through axes.
            if found.is_none()
                && !descriptor.variations.is_empty()
                && (descriptor.bold || descriptor.italic)
            {
                log::debug!("Retrying '{}' without bold/italic flags", descriptor);
                found = first_candidate(discovery, &descriptor.without_style_flags())?;
            }

            match found {
                Some(face) => {
                    log::info!("Found {} face '{}' for '{}'", style, face.name, descriptor);
                    collection.add(
                        style,
                        Entry {
                            slot: Slot::Deferred(face),
                            layer: Layer::Discovered,
                        },
                    );
                }
                None => log::warn!("No {} face found for '{}'", style, descriptor),
            }
        }
    }
    Ok(())
}

/// Fill every empty style from one that has a discovered face.
fn complete_styles(collection: &mut Collection, key: &Key) {
    if collection.faces(Style::Regular).is_empty() {
        log::info!("No regular face discovered, styles fall back to built-in faces");
        return;
    }
    let regular = FaceIndex::new(Style::Regular, 0);
    let styles = key.styles();
    let synthetic = key.synthetic();

    let fill = |collection: &mut Collection,
                style: Style,
                base: FaceIndex,
                synthesis: Synthesis,
                allowed: bool| {
        let slot = if !styles.is_enabled(style) {
            log::debug!("{} is disabled, aliasing regular", style);
            Slot::Alias(regular)
        } else if allowed {
            log::info!("Synthesizing {} from {} face", style, base.style);
            Slot::Synthetic { base, synthesis }
        } else {
            log::info!("Synthetic {} disabled, aliasing {} face", style, base.style);
            Slot::Alias(base)
        };
        collection.add(
            style,
            Entry {
                slot,
                layer: Layer::Synthesized,
            },
        );
    };

    if collection.faces(Style::Bold).is_empty() {
        fill(collection, Style::Bold, regular, Synthesis::Bold, synthetic.bold);
    }
    if collection.faces(Style::Italic).is_empty() {
        fill(collection, Style::Italic, regular, Synthesis::Italic, synthetic.italic);
    }
    if collection.faces(Style::BoldItalic).is_empty() {
        let discovered = |collection: &Collection, style: Style| {
            collection
                .faces(style)
                .first()
                .is_some_and(|e| e.layer == Layer::Discovered)
        };
        let (base, synthesis) = if discovered(collection, Style::Italic) {
            (FaceIndex::new(Style::Italic, 0), Synthesis::Bold)
        } else if discovered(collection, Style::Bold) {
            (FaceIndex::new(Style::Bold, 0), Synthesis::Italic)
        } else {
            (regular, Synthesis::BoldItalic)
        };
        fill(
            collection,
            Style::BoldItalic,
            base,
            synthesis,
            synthetic.bold_italic,
        );
    }
}

fn add_builtins(collection: &mut Collection, library: &Library) -> Result<(), FontError> {
    for style in Style::ALL {
        let data = library.builtin().style(style);
        let face = load_builtin(library, style.name(), data, &collection.options)?;
        collection.add(
            style,
            Entry {
                slot: Slot::Loaded(face),
                layer: Layer::Builtin,
            },
        );
    }
    Ok(())
}

fn load_builtin(
    library: &Library,
    name: &'static str,
    data: &FaceData,
    options: &LoadOptions,
) -> Result<Arc<Face>, FontError> {
    library
        .loader()
        .load(&format!("builtin {name}"), data.clone(), options)
        .map(Arc::new)
        .map_err(|source| FontError::BuiltinFace {
            name,
            source: Box::new(source),
        })
}

fn add_emoji(
    collection: &mut Collection,
    key: &Key,
    library: &Library,
    discovery: Option<&dyn Discover>,
) -> Result<(), FontError> {
    if let (Some(family), Some(discovery)) = (library.system_emoji(), discovery) {
        let descriptor = Descriptor {
            size: key.size().points,
            ..Descriptor::family(family)
        };
        if let Some(face) = first_candidate(discovery, &descriptor)? {
            log::info!("Using system emoji face '{}'", face.name);
            collection.add(
                Style::Regular,
                Entry {
                    slot: Slot::Deferred(face),
                    layer: Layer::Emoji,
                },
            );
            return Ok(());
        }
        log::warn!("System emoji font '{}' not found, using bundled emoji", family);
    }

    let builtin = library.builtin();
    for (name, data) in [("emoji", builtin.emoji()), ("emoji-text", builtin.emoji_text())] {
        let face = load_builtin(library, name, data, &collection.options)?;
        collection.add(
            Style::Regular,
            Entry {
                slot: Slot::Loaded(face),
                layer: Layer::Emoji,
            },
        );
    }
    Ok(())
}
