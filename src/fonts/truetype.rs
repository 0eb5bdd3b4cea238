//! TrueType/OpenType glyph coverage.
//!
//! This module wraps the `ttf-parser` crate and reads the Unicode cmap
//! subtables of an embedded font program once, at registration time.

use super::GlyphLookup;
use crate::error::{Error, Result};
use std::collections::HashSet;
use ttf_parser::Face;

/// Glyph coverage extracted from a TrueType/OpenType font program.
#[derive(Debug, Clone)]
pub struct TrueTypeGlyphs {
    name: String,
    covered: HashSet<u32>,
}

impl TrueTypeGlyphs {
    /// Parse a font program and collect the code points its cmap maps.
    pub fn parse(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Font("Font file is empty or invalid".into()));
        }

        let face = Face::parse(data, 0).map_err(|e| Error::Font(e.to_string()))?;

        let mut covered = HashSet::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    if subtable.glyph_index(cp).is_some_and(|g| g.0 != 0) {
                        covered.insert(cp);
                    }
                });
            }
        }

        let name = name.into();
        log::debug!("Font '{}' maps {} code points", name, covered.len());

        Ok(Self { name, covered })
    }

    /// Number of mapped code points.
    pub fn len(&self) -> usize {
        self.covered.len()
    }

    /// Check if the font maps nothing.
    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }
}

impl GlyphLookup for TrueTypeGlyphs {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.covered.contains(&(ch as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_font_rejected() {
        let err = TrueTypeGlyphs::parse("Empty", &[]).unwrap_err();
        assert!(matches!(err, Error::Font(_)));
    }

    #[test]
    fn test_parse_font_program() {
        let data = include_bytes!("../../tests/fixtures/glyphs.ttf");
        let font = TrueTypeGlyphs::parse("Fixture", data).unwrap();

        assert_eq!(font.len(), 3);
        assert!(font.has_glyph('A'));
        assert!(font.has_glyph('B'));
        assert!(font.has_glyph('\u{2211}'));
        assert!(!font.has_glyph('C'));
        assert_eq!(font.missing_glyphs("AB\u{2211}C"), vec!['C']);
    }

    #[test]
    fn test_garbage_font_rejected() {
        let err = TrueTypeGlyphs::parse("Garbage", b"not a font at all").unwrap_err();
        assert!(matches!(err, Error::Font(_)));
    }
}
