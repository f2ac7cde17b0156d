//! Built-in fallback faces supplied by the application.

use std::fs;
use std::path::Path;

use super::FaceData;
use crate::error::FontError;
use crate::style::Style;

/// The six embedded faces that back every collection: one per canonical
/// style, a color emoji face and a text-presentation emoji face.
///
/// Applications usually build this from `include_bytes!` data with
/// [`BuiltinFaces::from_static`].
#[derive(Debug, Clone)]
pub struct BuiltinFaces {
    styles: [FaceData; 4],
    emoji: FaceData,
    emoji_text: FaceData,
}

impl BuiltinFaces {
    /// File names read by [`BuiltinFaces::load_dir`], in style order
    /// followed by the two emoji faces.
    pub const FILE_NAMES: [&'static str; 6] = [
        "regular.ttf",
        "bold.ttf",
        "italic.ttf",
        "bold_italic.ttf",
        "emoji.ttf",
        "emoji_text.ttf",
    ];

    pub fn new(styles: [FaceData; 4], emoji: FaceData, emoji_text: FaceData) -> Self {
        Self {
            styles,
            emoji,
            emoji_text,
        }
    }

    pub fn from_static(
        regular: &'static [u8],
        bold: &'static [u8],
        italic: &'static [u8],
        bold_italic: &'static [u8],
        emoji: &'static [u8],
        emoji_text: &'static [u8],
    ) -> Self {
        Self::new(
            [
                FaceData::from_static(regular),
                FaceData::from_static(bold),
                FaceData::from_static(italic),
                FaceData::from_static(bold_italic),
            ],
            FaceData::from_static(emoji),
            FaceData::from_static(emoji_text),
        )
    }

    /// Read the six faces from `dir` using [`Self::FILE_NAMES`].
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, FontError> {
        let dir = dir.as_ref();
        let read = |file: &str| {
            let path = dir.join(file);
            fs::read(&path)
                .map(FaceData::new)
                .map_err(|source| FontError::Io { path, source })
        };
        let [regular, bold, italic, bold_italic, emoji, emoji_text] = Self::FILE_NAMES;
        log::info!("Loading built-in faces from {:?}", dir);
        Ok(Self::new(
            [read(regular)?, read(bold)?, read(italic)?, read(bold_italic)?],
            read(emoji)?,
            read(emoji_text)?,
        ))
    }

    pub fn style(&self, style: Style) -> &FaceData {
        &self.styles[style.index()]
    }

    pub fn emoji(&self) -> &FaceData {
        &self.emoji
    }

    pub fn emoji_text(&self) -> &FaceData {
        &self.emoji_text
    }
}
