//! Glyph existence queries.
//!
//! The checker never loads or subsets fonts itself. It only needs to know
//! whether the font selected for a text run can draw a given code point, so
//! that a formula shown with unmapped characters can be refused before the
//! bytes reach the content stream.

mod truetype;

pub use truetype::TrueTypeGlyphs;

use std::collections::BTreeSet;

/// Handle to a font registered with a [`crate::document::TaggedDocument`].
pub type FontId = usize;

/// Answers whether a font has a glyph for a code point.
pub trait GlyphLookup: std::fmt::Debug {
    /// Font name used in diagnostics.
    fn name(&self) -> &str;

    /// Whether the font maps `ch` to a glyph.
    fn has_glyph(&self, ch: char) -> bool;

    /// Characters of `text` the font cannot draw, in order of appearance.
    fn missing_glyphs(&self, text: &str) -> Vec<char> {
        text.chars().filter(|&c| !self.has_glyph(c)).collect()
    }
}

/// A font described by an explicit set of covered code points.
///
/// Useful for standard 14 fonts, whose coverage is fixed, and in tests.
#[derive(Debug, Clone)]
pub struct GlyphCoverage {
    name: String,
    chars: BTreeSet<char>,
}

impl GlyphCoverage {
    /// Create coverage for the given characters.
    pub fn new(name: impl Into<String>, chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            name: name.into(),
            chars: chars.into_iter().collect(),
        }
    }

    /// Printable ASCII only, roughly what a non-symbolic standard font offers.
    pub fn ascii(name: impl Into<String>) -> Self {
        Self::new(name, (0x20u8..0x7F).map(char::from))
    }

    /// Number of covered code points.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check if nothing is covered.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl GlyphLookup for GlyphCoverage {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_coverage() {
        let font = GlyphCoverage::ascii("Helvetica");
        assert_eq!(font.len(), 95);
        assert!(font.has_glyph('a'));
        assert!(!font.has_glyph('\u{2211}'));
    }

    #[test]
    fn test_missing_glyphs_in_order() {
        let font = GlyphCoverage::new("Tiny", ['x', '+', '1']);
        assert_eq!(font.missing_glyphs("x\u{221A}+\u{03C0}"), vec!['\u{221A}', '\u{03C0}']);
        assert!(font.missing_glyphs("x+1").is_empty());
    }
}
