//! The four canonical font styles.

use std::fmt;

/// One of regular, bold, italic, bold-italic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Style {
    Regular = 0,
    Bold = 1,
    Italic = 2,
    BoldItalic = 3,
}

impl Style {
    /// All styles in canonical order.
    pub const ALL: [Style; 4] = [Style::Regular, Style::Bold, Style::Italic, Style::BoldItalic];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_bold(self) -> bool {
        matches!(self, Style::Bold | Style::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Style::Italic | Style::BoldItalic)
    }

    pub fn name(self) -> &'static str {
        match self {
            Style::Regular => "regular",
            Style::Bold => "bold",
            Style::Italic => "italic",
            Style::BoldItalic => "bold-italic",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-style enablement. Regular is always enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleStatus([bool; 4]);

impl Default for StyleStatus {
    fn default() -> Self {
        Self([true; 4])
    }
}

impl StyleStatus {
    pub fn is_enabled(&self, style: Style) -> bool {
        style == Style::Regular || self.0[style.index()]
    }

    pub fn set(&mut self, style: Style, enabled: bool) {
        if style != Style::Regular {
            self.0[style.index()] = enabled;
        }
    }
}
