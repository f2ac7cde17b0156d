//! Core `Config` struct and its `Default` impl.
//!
//! Only the settings that influence font resolution live here: family lists,
//! per-style overrides and variation axes, codepoint overrides, synthetic
//! style policy, metric adjustments and rasterizer load flags.

use serde::{Deserialize, Serialize};

use crate::types::{
    FontRange, FontStyleSetting, FontVariation, MetricModifier, SyntheticStyle, ThinStrokesMode,
};

/// Font configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Families & styles
    // ========================================================================
    /// Font size in points
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: f32,

    /// Regular font families in priority order
    #[serde(
        default = "crate::defaults::font_family",
        deserialize_with = "crate::types::string_or_list"
    )]
    pub font_family: Vec<String>,

    /// Bold font families (empty = use `font_family` with bold search flags)
    #[serde(default, deserialize_with = "crate::types::string_or_list")]
    pub font_family_bold: Vec<String>,

    /// Italic font families (empty = use `font_family` with italic search flags)
    #[serde(default, deserialize_with = "crate::types::string_or_list")]
    pub font_family_italic: Vec<String>,

    /// Bold italic font families (empty = use `font_family`)
    #[serde(default, deserialize_with = "crate::types::string_or_list")]
    pub font_family_bold_italic: Vec<String>,

    /// Named style for the regular slot (`false` is ignored for regular)
    #[serde(default)]
    pub font_style: FontStyleSetting,

    /// Named style for bold, or `false` to disable bold
    #[serde(default)]
    pub font_style_bold: FontStyleSetting,

    /// Named style for italic, or `false` to disable italic
    #[serde(default)]
    pub font_style_italic: FontStyleSetting,

    /// Named style for bold italic, or `false` to disable bold italic
    #[serde(default)]
    pub font_style_bold_italic: FontStyleSetting,

    /// Variation axes for regular faces, e.g. `["wght=450"]`
    #[serde(default)]
    pub font_variation: Vec<FontVariation>,

    #[serde(default)]
    pub font_variation_bold: Vec<FontVariation>,

    #[serde(default)]
    pub font_variation_italic: Vec<FontVariation>,

    #[serde(default)]
    pub font_variation_bold_italic: Vec<FontVariation>,

    /// Custom font mappings for specific Unicode ranges.
    /// Later entries take precedence over earlier overlapping ones.
    #[serde(default)]
    pub font_codepoint_map: Vec<FontRange>,

    /// Which styles may be synthesized when no real face exists
    #[serde(default)]
    pub font_synthetic_style: SyntheticStyle,

    // ========================================================================
    // Metric adjustments
    // ========================================================================
    #[serde(default)]
    pub adjust_cell_width: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_cell_height: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_font_baseline: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_underline_position: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_underline_thickness: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_strikethrough_position: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_strikethrough_thickness: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_overline_position: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_overline_thickness: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_box_thickness: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_cursor_thickness: Option<MetricModifier>,
    #[serde(default)]
    pub adjust_cursor_height: Option<MetricModifier>,

    // ========================================================================
    // Rasterizer load flags
    // ========================================================================
    /// Enable hinting for font rendering
    #[serde(default = "crate::defaults::bool_true")]
    pub font_hinting: bool,

    /// Enable anti-aliasing for font rendering
    #[serde(default = "crate::defaults::bool_true")]
    pub font_antialias: bool,

    /// Thin strokes / font smoothing mode
    #[serde(default)]
    pub font_thin_strokes: ThinStrokesMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_size: crate::defaults::font_size(),
            font_family: crate::defaults::font_family(),
            font_family_bold: Vec::new(),
            font_family_italic: Vec::new(),
            font_family_bold_italic: Vec::new(),
            font_style: FontStyleSetting::Default,
            font_style_bold: FontStyleSetting::Default,
            font_style_italic: FontStyleSetting::Default,
            font_style_bold_italic: FontStyleSetting::Default,
            font_variation: Vec::new(),
            font_variation_bold: Vec::new(),
            font_variation_italic: Vec::new(),
            font_variation_bold_italic: Vec::new(),
            font_codepoint_map: Vec::new(),
            font_synthetic_style: SyntheticStyle::default(),
            adjust_cell_width: None,
            adjust_cell_height: None,
            adjust_font_baseline: None,
            adjust_underline_position: None,
            adjust_underline_thickness: None,
            adjust_strikethrough_position: None,
            adjust_strikethrough_thickness: None,
            adjust_overline_position: None,
            adjust_overline_thickness: None,
            adjust_box_thickness: None,
            adjust_cursor_thickness: None,
            adjust_cursor_height: None,
            font_hinting: true,
            font_antialias: true,
            font_thin_strokes: ThinStrokesMode::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size in points
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Replace the regular family list with a single family
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = vec![family.into()];
        self
    }

    /// Replace the regular family list
    pub fn with_font_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.font_family = families.into_iter().map(Into::into).collect();
        self
    }
}
