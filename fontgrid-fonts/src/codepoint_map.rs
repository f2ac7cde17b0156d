//! Codepoint range overrides.

use crate::discovery::Descriptor;

/// An inclusive codepoint range paired with the descriptor to use for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
    pub descriptor: Descriptor,
}

/// Ordered codepoint overrides. Later entries take precedence over earlier
/// overlapping ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodepointMap {
    ranges: Vec<CodepointRange>,
}

impl CodepointMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, start: u32, end: u32, descriptor: Descriptor) {
        debug_assert!(start <= end, "inverted codepoint range");
        self.ranges.push(CodepointRange {
            start,
            end,
            descriptor,
        });
    }

    /// The descriptor for `codepoint`, if any range covers it.
    pub fn get(&self, codepoint: u32) -> Option<&Descriptor> {
        self.ranges
            .iter()
            .rev()
            .find(|r| r.start <= codepoint && codepoint <= r.end)
            .map(|r| &r.descriptor)
    }

    pub fn ranges(&self) -> &[CodepointRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
