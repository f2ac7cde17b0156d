//! Configuration types and enums.
//!
//! - `font`: family/style settings, variation axes, codepoint ranges
//! - `modifier`: metric modifiers (`20%`, `-2`)

pub mod font;
pub mod modifier;

pub use font::{
    FontRange, FontStyleSetting, FontVariation, SyntheticStyle, ThinStrokesMode,
    VariationParseError,
};
pub(crate) use font::string_or_list;
pub use modifier::{MetricModifier, ModifierParseError, ModifierTarget};
