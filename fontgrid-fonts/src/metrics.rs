//! Cell geometry derived from face metrics, and the modifier engine that
//! adjusts it.
//!
//! Vertical positions (`underline_position`, `strikethrough_position`,
//! `overline_position`) are measured in pixels from the top of the cell.
//! `cell_baseline` is measured from the bottom of the cell.

use std::collections::BTreeMap;
use std::fmt;

use fontgrid_config::{MetricModifier, ModifierTarget};

/// Raw face metrics in pixels at the requested size.
///
/// `descent` is negative below the baseline. Optional fields fall back to
/// estimates in [`Metrics::calc`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FaceMetrics {
    /// Advance width of the widest ASCII glyph.
    pub cell_width: f64,
    pub ascent: f64,
    pub descent: f64,
    pub line_gap: f64,
    /// Top of the underline relative to the baseline, positive upwards.
    pub underline_position: Option<f64>,
    pub underline_thickness: Option<f64>,
    /// Top of the strikethrough relative to the baseline, positive upwards.
    pub strikethrough_position: Option<f64>,
    pub strikethrough_thickness: Option<f64>,
    pub cap_height: Option<f64>,
    pub ex_height: Option<f64>,
}

/// Integer cell geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub cell_width: u32,
    pub cell_height: u32,
    pub cell_baseline: u32,
    pub underline_position: u32,
    pub underline_thickness: u32,
    pub strikethrough_position: u32,
    pub strikethrough_thickness: u32,
    pub overline_position: i32,
    pub overline_thickness: u32,
    pub box_thickness: u32,
    pub cursor_thickness: u32,
    pub cursor_height: u32,
    /// Cell width before the first width modifier was applied.
    pub original_cell_width: Option<u32>,
    /// Cell height before the first height modifier was applied.
    pub original_cell_height: Option<u32>,
}

impl Metrics {
    /// Compute cell geometry from raw face metrics.
    pub fn calc(face: FaceMetrics) -> Self {
        let cell_width = face.cell_width.ceil();
        let face_height = face.ascent - face.descent + face.line_gap;
        let cell_height = face_height.ceil();

        // Split the line gap evenly above and below the glyph box.
        let half_gap = face.line_gap / 2.0;
        let baseline = (half_gap - face.descent).round();
        let top_to_baseline = cell_height - baseline;

        let cap_height = face.cap_height.unwrap_or(face.ascent * 0.75);
        let ex_height = face.ex_height.unwrap_or(cap_height * 0.75);

        let underline_thickness = face
            .underline_thickness
            .unwrap_or(ex_height * 0.15)
            .ceil()
            .max(1.0);
        let strikethrough_thickness = face
            .strikethrough_thickness
            .unwrap_or(underline_thickness)
            .ceil()
            .max(1.0);

        let underline_position = (top_to_baseline
            - face.underline_position.unwrap_or(-underline_thickness))
        .round();
        let strikethrough_position = (top_to_baseline
            - face
                .strikethrough_position
                .unwrap_or((ex_height + strikethrough_thickness) * 0.5))
        .round();

        let cell_height = to_u32(cell_height);
        let mut metrics = Self {
            cell_width: to_u32(cell_width),
            cell_height,
            cell_baseline: to_u32(baseline),
            underline_position: to_u32(underline_position),
            underline_thickness: to_u32(underline_thickness),
            strikethrough_position: to_u32(strikethrough_position),
            strikethrough_thickness: to_u32(strikethrough_thickness),
            overline_position: 0,
            overline_thickness: to_u32(underline_thickness),
            box_thickness: to_u32(underline_thickness),
            cursor_thickness: 1,
            cursor_height: cell_height,
            original_cell_width: None,
            original_cell_height: None,
        };
        metrics.clamp();
        metrics
    }

    /// Apply every modifier in `modifiers`, in canonical key order.
    pub fn apply(&mut self, modifiers: &ModifierSet) {
        for (key, modifier) in modifiers.iter() {
            match key {
                MetricKey::CellWidth => {
                    let original = self.cell_width;
                    self.cell_width = modifier.apply(original).max(1);
                    self.original_cell_width.get_or_insert(original);
                }
                MetricKey::CellHeight => {
                    let original = self.cell_height;
                    let new = modifier.apply(original).max(1);
                    self.original_cell_height.get_or_insert(original);
                    self.cell_height = new;

                    // Keep text vertically centered in the resized cell.
                    let diff = i64::from(new) - i64::from(original);
                    let diff_bottom = diff / 2;
                    let diff_top = diff - diff_bottom;
                    self.cell_baseline = shift(self.cell_baseline, diff_bottom);
                    self.underline_position = shift(self.underline_position, diff_top);
                    self.strikethrough_position = shift(self.strikethrough_position, diff_top);
                    self.overline_position = shift(self.overline_position, diff_top);
                }
                MetricKey::CellBaseline => {
                    self.cell_baseline = modifier.apply(self.cell_baseline);
                }
                MetricKey::UnderlinePosition => {
                    self.underline_position = modifier.apply(self.underline_position);
                }
                MetricKey::UnderlineThickness => {
                    self.underline_thickness = modifier.apply(self.underline_thickness);
                }
                MetricKey::StrikethroughPosition => {
                    self.strikethrough_position = modifier.apply(self.strikethrough_position);
                }
                MetricKey::StrikethroughThickness => {
                    self.strikethrough_thickness = modifier.apply(self.strikethrough_thickness);
                }
                MetricKey::OverlinePosition => {
                    self.overline_position = modifier.apply(self.overline_position);
                }
                MetricKey::OverlineThickness => {
                    self.overline_thickness = modifier.apply(self.overline_thickness);
                }
                MetricKey::BoxThickness => {
                    self.box_thickness = modifier.apply(self.box_thickness);
                }
                MetricKey::CursorThickness => {
                    self.cursor_thickness = modifier.apply(self.cursor_thickness);
                }
                MetricKey::CursorHeight => {
                    self.cursor_height = modifier.apply(self.cursor_height);
                }
            }
        }
        self.clamp();
    }

    /// Enforce minimums: no dimension or stroke may be zero.
    fn clamp(&mut self) {
        for field in [
            &mut self.cell_width,
            &mut self.cell_height,
            &mut self.underline_thickness,
            &mut self.strikethrough_thickness,
            &mut self.overline_thickness,
            &mut self.box_thickness,
            &mut self.cursor_thickness,
            &mut self.cursor_height,
        ] {
            *field = (*field).max(1);
        }
    }
}

fn to_u32(value: f64) -> u32 {
    // `as` saturates and maps NaN to 0.
    value as u32
}

fn shift<T: ModifierTarget>(value: T, by: i64) -> T {
    T::from_i64_saturating(value.to_i64().saturating_add(by))
}

// ============================================================================
// Modifier set
// ============================================================================

/// A metric that can be adjusted. Declaration order is the canonical order
/// used when applying and hashing modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricKey {
    CellWidth,
    CellHeight,
    CellBaseline,
    UnderlinePosition,
    UnderlineThickness,
    StrikethroughPosition,
    StrikethroughThickness,
    OverlinePosition,
    OverlineThickness,
    BoxThickness,
    CursorThickness,
    CursorHeight,
}

impl MetricKey {
    pub const ALL: [MetricKey; 12] = [
        MetricKey::CellWidth,
        MetricKey::CellHeight,
        MetricKey::CellBaseline,
        MetricKey::UnderlinePosition,
        MetricKey::UnderlineThickness,
        MetricKey::StrikethroughPosition,
        MetricKey::StrikethroughThickness,
        MetricKey::OverlinePosition,
        MetricKey::OverlineThickness,
        MetricKey::BoxThickness,
        MetricKey::CursorThickness,
        MetricKey::CursorHeight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricKey::CellWidth => "cell_width",
            MetricKey::CellHeight => "cell_height",
            MetricKey::CellBaseline => "cell_baseline",
            MetricKey::UnderlinePosition => "underline_position",
            MetricKey::UnderlineThickness => "underline_thickness",
            MetricKey::StrikethroughPosition => "strikethrough_position",
            MetricKey::StrikethroughThickness => "strikethrough_thickness",
            MetricKey::OverlinePosition => "overline_position",
            MetricKey::OverlineThickness => "overline_thickness",
            MetricKey::BoxThickness => "box_thickness",
            MetricKey::CursorThickness => "cursor_thickness",
            MetricKey::CursorHeight => "cursor_height",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sparse map of metric to modifier. Absent keys are unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(BTreeMap<MetricKey, MetricModifier>);

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the modifier for `key`, returning the previous one.
    pub fn insert(&mut self, key: MetricKey, modifier: MetricModifier) -> Option<MetricModifier> {
        self.0.insert(key, modifier)
    }

    pub fn get(&self, key: MetricKey) -> Option<MetricModifier> {
        self.0.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, MetricModifier)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(MetricKey, MetricModifier)> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = (MetricKey, MetricModifier)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
