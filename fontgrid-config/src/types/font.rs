//! Font family, style, variation and codepoint-range configuration types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Font Types
// ============================================================================

/// Font mapping for a specific Unicode range
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontRange {
    /// Start of Unicode range (inclusive), e.g., 0x4E00 for CJK
    pub start: u32,
    /// End of Unicode range (inclusive), e.g., 0x9FFF for CJK
    pub end: u32,
    /// Font family name to use for this range
    pub font_family: String,
}

impl FontRange {
    /// Whether `codepoint` falls inside this range.
    pub fn contains(&self, codepoint: u32) -> bool {
        codepoint >= self.start && codepoint <= self.end
    }
}

/// Thin strokes / font smoothing mode
///
/// Controls font stroke weight adjustment for improved rendering,
/// particularly on high-DPI/Retina displays. Passed through to the
/// rasterizer as part of the face load flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThinStrokesMode {
    /// Never apply thin strokes
    Never,
    /// Apply thin strokes only on Retina/HiDPI displays (default)
    #[default]
    RetinaOnly,
    /// Apply thin strokes only on dark backgrounds
    DarkBackgroundsOnly,
    /// Apply thin strokes only on Retina displays with dark backgrounds
    RetinaDarkBackgroundsOnly,
    /// Always apply thin strokes
    Always,
}

/// Explicit style selection for one of the four canonical styles.
///
/// In YAML this is either `false` (disable the style), `default`, or a
/// named style such as `"SemiBold"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "StyleRepr", into = "StyleRepr")]
pub enum FontStyleSetting {
    /// Search using bold/italic flags implied by the style slot.
    #[default]
    Default,
    /// The style is disabled; text in this style renders with regular.
    Disabled,
    /// Pin a specific named style (e.g. "Medium", "Light Italic").
    Named(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StyleRepr {
    Flag(bool),
    Name(String),
}

impl From<StyleRepr> for FontStyleSetting {
    fn from(repr: StyleRepr) -> Self {
        match repr {
            StyleRepr::Flag(false) => FontStyleSetting::Disabled,
            StyleRepr::Flag(true) => FontStyleSetting::Default,
            StyleRepr::Name(name) => match name.trim() {
                "" | "default" => FontStyleSetting::Default,
                "false" => FontStyleSetting::Disabled,
                other => FontStyleSetting::Named(other.to_string()),
            },
        }
    }
}

impl From<FontStyleSetting> for StyleRepr {
    fn from(setting: FontStyleSetting) -> Self {
        match setting {
            FontStyleSetting::Default => StyleRepr::Name("default".to_string()),
            FontStyleSetting::Disabled => StyleRepr::Flag(false),
            FontStyleSetting::Named(name) => StyleRepr::Name(name),
        }
    }
}

/// Which styles may be synthesized when no real face exists for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyntheticStyle {
    #[serde(default = "crate::defaults::bool_true")]
    pub bold: bool,
    #[serde(default = "crate::defaults::bool_true")]
    pub italic: bool,
    #[serde(default = "crate::defaults::bool_true")]
    pub bold_italic: bool,
}

impl Default for SyntheticStyle {
    fn default() -> Self {
        Self {
            bold: true,
            italic: true,
            bold_italic: true,
        }
    }
}

impl SyntheticStyle {
    /// Disallow synthesis for every style.
    pub fn none() -> Self {
        Self {
            bold: false,
            italic: false,
            bold_italic: false,
        }
    }
}

// ============================================================================
// Variation axes
// ============================================================================

/// Error returned when a `tag=value` variation setting is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid font variation '{0}': expected 4-character tag and number, e.g. 'wght=700'")]
pub struct VariationParseError(String);

/// A single variation-axis setting such as `wght=700`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FontVariation {
    /// OpenType axis tag.
    pub tag: [u8; 4],
    /// Axis value in user units.
    pub value: f32,
}

impl FontVariation {
    pub fn new(tag: [u8; 4], value: f32) -> Self {
        Self { tag, value }
    }

    /// The axis tag as text.
    pub fn tag_str(&self) -> &str {
        std::str::from_utf8(&self.tag).unwrap_or("????")
    }
}

// Values compare by bit pattern so the type can key hash maps.
impl PartialEq for FontVariation {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.value.to_bits() == other.value.to_bits()
    }
}

impl Eq for FontVariation {}

impl Hash for FontVariation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        self.value.to_bits().hash(state);
    }
}

impl FromStr for FontVariation {
    type Err = VariationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VariationParseError(s.to_string());
        let (tag, value) = s.split_once('=').ok_or_else(err)?;
        let tag = tag.trim();
        if tag.len() != 4 || !tag.is_ascii() {
            return Err(err());
        }
        let value: f32 = value.trim().parse().map_err(|_| err())?;
        if !value.is_finite() {
            return Err(err());
        }
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(tag.as_bytes());
        Ok(FontVariation { tag: bytes, value })
    }
}

impl TryFrom<String> for FontVariation {
    type Error = VariationParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FontVariation> for String {
    fn from(v: FontVariation) -> Self {
        v.to_string()
    }
}

impl fmt::Display for FontVariation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag_str(), self.value)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Accept either a single family name or a list of names.
pub(crate) fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.trim().is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}
