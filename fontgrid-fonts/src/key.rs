//! Canonical fingerprint of a font configuration at a size.

use std::hash::{DefaultHasher, Hash, Hasher};

use fontgrid_config::{FontStyleSetting, SyntheticStyle};

use crate::codepoint_map::CodepointMap;
use crate::derived_config::DerivedConfig;
use crate::discovery::Descriptor;
use crate::face::{DesiredSize, LoadFlags};
use crate::metrics::{MetricKey, ModifierSet};
use crate::style::{Style, StyleStatus};

/// Identifies one font configuration at one size.
///
/// Owns all of its data. The 64-bit hash is computed once at construction
/// and is what [`Hash`] writes; equality compares the hash first and then
/// the fields, so colliding hashes never alias two configurations.
#[derive(Debug, Clone)]
pub struct Key {
    /// Descriptors for all styles, grouped by style in canonical order.
    descriptors: Vec<Descriptor>,
    /// Cumulative end offset of each style's group in `descriptors`.
    style_offsets: [usize; 4],
    codepoint_map: CodepointMap,
    metric_modifiers: ModifierSet,
    size: DesiredSize,
    load_flags: LoadFlags,
    styles: StyleStatus,
    synthetic: SyntheticStyle,
    hash: u64,
}

impl Key {
    pub fn new(config: &DerivedConfig, size: DesiredSize) -> Self {
        let styles = config.style_status();
        let mut descriptors = Vec::new();
        let mut style_offsets = [0usize; 4];

        for style in Style::ALL {
            // A disabled style renders with regular; it gets no descriptors.
            if styles.is_enabled(style) {
                let (pinned, bold, italic) = match config.style_setting(style) {
                    FontStyleSetting::Named(name) => (Some(name.clone()), false, false),
                    _ => (None, style.is_bold(), style.is_italic()),
                };
                for family in config.families(style) {
                    descriptors.push(Descriptor {
                        family: family.clone(),
                        style: pinned.clone(),
                        size: size.points,
                        bold,
                        italic,
                        variations: config.variations(style).to_vec(),
                    });
                }
            }
            style_offsets[style.index()] = descriptors.len();
        }

        let mut codepoint_map = CodepointMap::new();
        for range in &config.codepoint_map {
            codepoint_map.push(
                range.start,
                range.end,
                Descriptor {
                    size: size.points,
                    ..Descriptor::family(range.font_family.clone())
                },
            );
        }

        let mut key = Self {
            descriptors,
            style_offsets,
            codepoint_map,
            metric_modifiers: config.metric_modifiers(),
            size,
            load_flags: config.load_flags,
            styles,
            synthetic: config.synthetic,
            hash: 0,
        };
        key.hash = key.compute_hash();
        key
    }

    /// The descriptors for `style`, in configured priority order.
    pub fn descriptors_for_style(&self, style: Style) -> &[Descriptor] {
        let end = self.style_offsets[style.index()];
        let start = match style.index() {
            0 => 0,
            i => self.style_offsets[i - 1],
        };
        debug_assert!(start <= end, "style offsets out of order");
        &self.descriptors[start..end]
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn codepoint_map(&self) -> &CodepointMap {
        &self.codepoint_map
    }

    pub fn metric_modifiers(&self) -> &ModifierSet {
        &self.metric_modifiers
    }

    pub fn size(&self) -> DesiredSize {
        self.size
    }

    pub fn load_flags(&self) -> LoadFlags {
        self.load_flags
    }

    pub fn styles(&self) -> StyleStatus {
        self.styles
    }

    pub fn synthetic(&self) -> SyntheticStyle {
        self.synthetic
    }

    /// The precomputed 64-bit fingerprint.
    pub fn hash_value(&self) -> u64 {
        self.hash
    }

    fn compute_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.size.points.to_bits().hash(&mut hasher);
        self.size.xdpi.hash(&mut hasher);
        self.size.ydpi.hash(&mut hasher);

        // Order-sensitive: family order decides which face discovery picks.
        self.descriptors.len().hash(&mut hasher);
        for descriptor in &self.descriptors {
            descriptor.hash(&mut hasher);
        }
        self.style_offsets.hash(&mut hasher);
        self.codepoint_map.hash(&mut hasher);
        self.metric_modifiers.len().hash(&mut hasher);
        self.load_flags.hash(&mut hasher);
        self.styles.hash(&mut hasher);
        self.synthetic.hash(&mut hasher);

        if !self.metric_modifiers.is_empty() {
            for key in MetricKey::ALL {
                if let Some(modifier) = self.metric_modifiers.get(key) {
                    key.hash(&mut hasher);
                    modifier.hash(&mut hasher);
                }
            }
        }
        hasher.finish()
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.size == other.size
            && self.style_offsets == other.style_offsets
            && self.descriptors == other.descriptors
            && self.codepoint_map == other.codepoint_map
            && self.metric_modifiers == other.metric_modifiers
            && self.load_flags == other.load_flags
            && self.styles == other.styles
            && self.synthetic == other.synthetic
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}
