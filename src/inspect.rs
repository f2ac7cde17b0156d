//! Human-readable summaries of keys and grids.

use std::fmt;

use fontgrid_fonts::{Grid, Key, Layer, Metrics, Slot, Style, Synthesis};

/// Key hash, size, per-style descriptors, codepoint overrides and modifiers.
pub struct KeySummary<'a>(pub &'a Key);

impl fmt::Display for KeySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.0;
        let size = key.size();
        writeln!(f, "key: {:016x}", key.hash_value())?;
        writeln!(
            f,
            "size: {:.1}pt @ {}x{} dpi ({:.1}px)",
            size.points,
            size.xdpi,
            size.ydpi,
            size.pixels()
        )?;

        let styles = key.styles();
        for style in Style::ALL {
            if !styles.is_enabled(style) {
                writeln!(f, "{style}: (disabled)")?;
                continue;
            }
            writeln!(f, "{style}:")?;
            for descriptor in key.descriptors_for_style(style) {
                writeln!(f, "  {descriptor}")?;
            }
        }

        let codepoint_map = key.codepoint_map();
        if !codepoint_map.is_empty() {
            writeln!(f, "codepoint map:")?;
            for range in codepoint_map.ranges() {
                writeln!(
                    f,
                    "  U+{:04X}..U+{:04X} -> {}",
                    range.start, range.end, range.descriptor.family
                )?;
            }
        }

        let modifiers = key.metric_modifiers();
        if !modifiers.is_empty() {
            writeln!(f, "modifiers:")?;
            for (metric, modifier) in modifiers.iter() {
                writeln!(f, "  {metric} = {modifier}")?;
            }
        }
        Ok(())
    }
}

/// Grid id, per-style fallback chains and cell metrics.
pub struct GridSummary<'a>(pub &'a Grid);

impl fmt::Display for GridSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.0;
        writeln!(f, "grid: {}", grid.id())?;

        let collection = grid.collection();
        for style in Style::ALL {
            writeln!(f, "{style}:")?;
            for (i, entry) in collection.faces(style).iter().enumerate() {
                writeln!(
                    f,
                    "  {i}. [{}] {}",
                    layer_name(entry.layer),
                    SlotSummary(&entry.slot)
                )?;
            }
        }
        write!(f, "{}", MetricsSummary(&grid.metrics()))
    }
}

struct SlotSummary<'a>(&'a Slot);

impl fmt::Display for SlotSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Slot::Deferred(face) => write!(f, "{} (deferred)", face.name),
            Slot::Loaded(face) if face.is_color() => write!(f, "{} (color)", face.name()),
            Slot::Loaded(face) => write!(f, "{}", face.name()),
            Slot::Alias(base) => write!(f, "same as {} #{}", base.style, base.index),
            Slot::Synthetic { base, synthesis } => {
                let how = match synthesis {
                    Synthesis::Bold => "bold",
                    Synthesis::Italic => "italic",
                    Synthesis::BoldItalic => "bold-italic",
                };
                write!(f, "synthetic {how} from {} #{}", base.style, base.index)
            }
        }
    }
}

fn layer_name(layer: Layer) -> &'static str {
    match layer {
        Layer::Discovered => "discovered",
        Layer::Synthesized => "synthesized",
        Layer::Builtin => "builtin",
        Layer::Emoji => "emoji",
    }
}

struct MetricsSummary<'a>(&'a Metrics);

impl fmt::Display for MetricsSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        writeln!(f, "metrics:")?;
        writeln!(f, "  cell: {}x{}", m.cell_width, m.cell_height)?;
        writeln!(f, "  baseline: {}", m.cell_baseline)?;
        writeln!(
            f,
            "  underline: {} ({}px)",
            m.underline_position, m.underline_thickness
        )?;
        writeln!(
            f,
            "  strikethrough: {} ({}px)",
            m.strikethrough_position, m.strikethrough_thickness
        )?;
        writeln!(
            f,
            "  overline: {} ({}px)",
            m.overline_position, m.overline_thickness
        )?;
        writeln!(f, "  box: {}px", m.box_thickness)?;
        writeln!(
            f,
            "  cursor: {}px x {}",
            m.cursor_thickness, m.cursor_height
        )
    }
}
