//! Face loading backed by swash.

use swash::FontRef;

use super::{Face, FaceData, FaceLoader, LoadOptions};
use crate::error::FontError;
use crate::metrics::FaceMetrics;

/// Tables whose presence marks a color (emoji) face.
const COLOR_TABLES: [[u8; 4]; 4] = [*b"COLR", *b"CBDT", *b"sbix", *b"SVG "];

/// Loads faces by parsing them with swash and scaling design-unit metrics
/// to the requested pixel size.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwashLoader;

impl FaceLoader for SwashLoader {
    fn load(&self, name: &str, data: FaceData, options: &LoadOptions) -> Result<Face, FontError> {
        let font = data.font_ref().ok_or_else(|| FontError::InvalidFontData {
            name: name.to_string(),
        })?;

        let coords = normalized_coords(&font, options);
        let metrics = face_metrics(&font, &coords, options.size.pixels());
        let color = COLOR_TABLES
            .iter()
            .any(|tag| font.table(u32::from_be_bytes(*tag)).is_some());

        log::debug!(
            "Loaded face '{}' at {:.1}px (cell width {:.2}, color: {})",
            name,
            options.size.pixels(),
            metrics.cell_width,
            color
        );

        Ok(Face::new(name, data, metrics, color, options.clone()))
    }
}

/// Map configured variation settings onto the font's axes, in axis order.
fn normalized_coords(font: &FontRef<'_>, options: &LoadOptions) -> Vec<i16> {
    if options.variations.is_empty() {
        return Vec::new();
    }
    font.variations()
        .map(|axis| {
            options
                .variations
                .iter()
                .rev()
                .find(|v| u32::from_be_bytes(v.tag) == axis.tag())
                .map(|v| axis.normalize(v.value))
                .unwrap_or_default()
        })
        .collect()
}

fn face_metrics(font: &FontRef<'_>, coords: &[i16], px: f32) -> FaceMetrics {
    let design = font.metrics(coords);
    let scale = if design.units_per_em == 0 {
        0.0
    } else {
        f64::from(px) / f64::from(design.units_per_em)
    };
    let scaled = |v: f32| f64::from(v) * scale;

    // The cell must fit the widest printable ASCII glyph.
    let charmap = font.charmap();
    let glyphs = font.glyph_metrics(coords);
    let max_advance = (' '..='~')
        .map(|c| charmap.map(c))
        .filter(|id| *id != 0)
        .map(|id| glyphs.advance_width(id))
        .fold(0.0f32, f32::max);
    let cell_width = if max_advance > 0.0 {
        scaled(max_advance)
    } else {
        scaled(design.max_width)
    };

    // swash reports descent as a positive distance below the baseline.
    let stroke = (design.stroke_size > 0.0).then(|| scaled(design.stroke_size));
    FaceMetrics {
        cell_width,
        ascent: scaled(design.ascent),
        descent: -scaled(design.descent),
        line_gap: scaled(design.leading),
        underline_position: (design.underline_offset != 0.0)
            .then(|| scaled(design.underline_offset)),
        underline_thickness: stroke,
        strikethrough_position: (design.strikeout_offset != 0.0)
            .then(|| scaled(design.strikeout_offset)),
        strikethrough_thickness: stroke,
        cap_height: (design.cap_height > 0.0).then(|| scaled(design.cap_height)),
        ex_height: (design.x_height > 0.0).then(|| scaled(design.x_height)),
    }
}
