//! Semantic validation for `Config`.

use super::config_struct::Config;
use crate::error::ConfigError;

/// Highest valid Unicode scalar value.
const MAX_CODEPOINT: u32 = 0x10FFFF;

impl Config {
    /// Check field values that serde cannot express as types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "font_size must be a positive number, got {}",
                self.font_size
            )));
        }

        for (i, range) in self.font_codepoint_map.iter().enumerate() {
            if range.start > range.end {
                return Err(ConfigError::Validation(format!(
                    "font_codepoint_map[{i}]: start U+{:04X} is after end U+{:04X}",
                    range.start, range.end
                )));
            }
            if range.end > MAX_CODEPOINT {
                return Err(ConfigError::Validation(format!(
                    "font_codepoint_map[{i}]: end U+{:04X} is beyond U+10FFFF",
                    range.end
                )));
            }
            if range.font_family.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "font_codepoint_map[{i}]: font_family is empty"
                )));
            }
        }

        for family in self.all_families() {
            if family.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "font family names must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn all_families(&self) -> impl Iterator<Item = &String> {
        self.font_family
            .iter()
            .chain(&self.font_family_bold)
            .chain(&self.font_family_italic)
            .chain(&self.font_family_bold_italic)
    }
}
