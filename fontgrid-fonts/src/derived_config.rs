//! The subset of [`Config`] that affects font resolution, detached from the
//! live configuration.

use fontgrid_config::{
    Config, FontRange, FontStyleSetting, FontVariation, MetricModifier, SyntheticStyle,
};

use crate::face::LoadFlags;
use crate::metrics::{MetricKey, ModifierSet};
use crate::style::{Style, StyleStatus};

/// Owned, immutable snapshot of the font settings.
///
/// Per-style arrays are indexed by [`Style::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedConfig {
    /// Default point size.
    pub font_size: f32,
    /// Family lists in priority order. Empty non-regular lists inherit the
    /// regular list.
    pub families: [Vec<String>; 4],
    pub styles: [FontStyleSetting; 4],
    pub variations: [Vec<FontVariation>; 4],
    pub codepoint_map: Vec<FontRange>,
    pub synthetic: SyntheticStyle,
    /// Indexed by position in [`MetricKey::ALL`].
    pub adjustments: [Option<MetricModifier>; 12],
    pub load_flags: LoadFlags,
}

impl DerivedConfig {
    pub fn from_config(config: &Config) -> Self {
        let regular = config.font_family.clone();
        let inherit = |list: &Vec<String>| {
            if list.is_empty() {
                regular.clone()
            } else {
                list.clone()
            }
        };

        // Regular can never be disabled.
        let regular_style = match &config.font_style {
            FontStyleSetting::Disabled => FontStyleSetting::Default,
            other => other.clone(),
        };

        let adjustments = MetricKey::ALL.map(|key| match key {
            MetricKey::CellWidth => config.adjust_cell_width,
            MetricKey::CellHeight => config.adjust_cell_height,
            MetricKey::CellBaseline => config.adjust_font_baseline,
            MetricKey::UnderlinePosition => config.adjust_underline_position,
            MetricKey::UnderlineThickness => config.adjust_underline_thickness,
            MetricKey::StrikethroughPosition => config.adjust_strikethrough_position,
            MetricKey::StrikethroughThickness => config.adjust_strikethrough_thickness,
            MetricKey::OverlinePosition => config.adjust_overline_position,
            MetricKey::OverlineThickness => config.adjust_overline_thickness,
            MetricKey::BoxThickness => config.adjust_box_thickness,
            MetricKey::CursorThickness => config.adjust_cursor_thickness,
            MetricKey::CursorHeight => config.adjust_cursor_height,
        });

        Self {
            font_size: config.font_size,
            families: [
                regular.clone(),
                inherit(&config.font_family_bold),
                inherit(&config.font_family_italic),
                inherit(&config.font_family_bold_italic),
            ],
            styles: [
                regular_style,
                config.font_style_bold.clone(),
                config.font_style_italic.clone(),
                config.font_style_bold_italic.clone(),
            ],
            variations: [
                config.font_variation.clone(),
                config.font_variation_bold.clone(),
                config.font_variation_italic.clone(),
                config.font_variation_bold_italic.clone(),
            ],
            codepoint_map: config.font_codepoint_map.clone(),
            synthetic: config.font_synthetic_style,
            adjustments,
            load_flags: LoadFlags {
                hinting: config.font_hinting,
                antialias: config.font_antialias,
                thin_strokes: config.font_thin_strokes,
            },
        }
    }

    pub fn families(&self, style: Style) -> &[String] {
        &self.families[style.index()]
    }

    pub fn style_setting(&self, style: Style) -> &FontStyleSetting {
        &self.styles[style.index()]
    }

    pub fn variations(&self, style: Style) -> &[FontVariation] {
        &self.variations[style.index()]
    }

    pub fn adjustment(&self, key: MetricKey) -> Option<MetricModifier> {
        self.adjustments[key as usize]
    }

    /// Which styles are enabled.
    pub fn style_status(&self) -> StyleStatus {
        let mut status = StyleStatus::default();
        for style in Style::ALL {
            status.set(
                style,
                *self.style_setting(style) != FontStyleSetting::Disabled,
            );
        }
        status
    }

    /// The configured adjustments as a sparse set.
    pub fn metric_modifiers(&self) -> ModifierSet {
        MetricKey::ALL
            .into_iter()
            .filter_map(|key| self.adjustment(key).map(|m| (key, m)))
            .collect()
    }
}

impl Default for DerivedConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
