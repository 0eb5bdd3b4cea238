//! PDF text strings (ISO 32000-2:2020, Section 7.9.2.2).
//!
//! A text string may be serialized as PDFDocEncoding, UTF-16BE (with the
//! FE FF byte order marker) or, from PDF 2.0 on, UTF-8 (with EF BB BF).
//! PDFDocEncoding is a single-byte repertoire, so encoding into it can lose
//! characters. That loss is a deliberate, logged omission, never an error;
//! [`TextString`] keeps the attempted value next to the serialized bytes so
//! checks can reason about what the producer asked for.

use serde::{Deserialize, Serialize};

const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Serialized form of a text string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    /// Single-byte PDFDocEncoding
    PdfDoc,
    /// Big-endian UTF-16, optionally preceded by the FE FF marker
    Utf16Be {
        /// Whether the byte order marker is written
        bom: bool,
    },
    /// UTF-8 with the EF BB BF marker (PDF 2.0)
    Utf8,
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::Utf16Be { bom: true }
    }
}

/// A human-readable string together with its serialized bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextString {
    value: String,
    encoding: TextEncoding,
    bytes: Vec<u8>,
}

impl TextString {
    /// Encode `value` with the given encoding.
    pub fn new(value: impl Into<String>, encoding: TextEncoding) -> Self {
        let value = value.into();
        let bytes = encode_text_string(&value, encoding);
        Self {
            value,
            encoding,
            bytes,
        }
    }

    /// Wrap bytes read from a document. The value is the decoded text.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let encoding = detect_encoding(&bytes);
        Self {
            value: decode_text_string(&bytes),
            encoding,
            bytes,
        }
    }

    /// The value the producer attempted to write.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The encoding used for serialization.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// The serialized bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The value a reader recovers from the serialized bytes.
    pub fn serialized_value(&self) -> String {
        match self.encoding {
            // Without a marker a reader cannot tell UTF-16 from PDFDoc, but we can.
            TextEncoding::Utf16Be { bom: false } => decode_utf16be(&self.bytes),
            _ => decode_text_string(&self.bytes),
        }
    }

    /// Whether encoding dropped characters.
    pub fn is_lossy(&self) -> bool {
        self.serialized_value() != self.value
    }

    /// Check if the string is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<&str> for TextString {
    fn from(value: &str) -> Self {
        TextString::new(value, TextEncoding::default())
    }
}

impl From<String> for TextString {
    fn from(value: String) -> Self {
        TextString::new(value, TextEncoding::default())
    }
}

/// Serialize `value` as a text string.
pub fn encode_text_string(value: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::PdfDoc => encode_pdfdoc(value),
        TextEncoding::Utf16Be { bom } => {
            let mut result = if bom { UTF16BE_BOM.to_vec() } else { Vec::new() };
            for unit in value.encode_utf16() {
                result.extend_from_slice(&unit.to_be_bytes());
            }
            result
        },
        TextEncoding::Utf8 => {
            let mut result = UTF8_BOM.to_vec();
            result.extend_from_slice(value.as_bytes());
            result
        },
    }
}

/// Decode a text string, honouring the byte order markers.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&UTF16BE_BOM) {
        decode_utf16be(rest)
    } else if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        bytes.iter().filter_map(|&b| pdfdoc_decode(b)).collect()
    }
}

fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    if bytes.starts_with(&UTF16BE_BOM) {
        TextEncoding::Utf16Be { bom: true }
    } else if bytes.starts_with(&UTF8_BOM) {
        TextEncoding::Utf8
    } else {
        TextEncoding::PdfDoc
    }
}

fn decode_utf16be(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

fn encode_pdfdoc(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for ch in value.chars() {
        match pdfdoc_encode(ch) {
            Some(b) => out.push(b),
            None => log::warn!(
                "U+{:04X} is not representable in PDFDocEncoding and was omitted",
                ch as u32
            ),
        }
    }
    out
}

/// Decode a byte using PDFDocEncoding (ISO 32000-2:2020, Annex D.2).
///
/// Returns `None` for the few undefined codes.
fn pdfdoc_decode(code: u8) -> Option<char> {
    let ch = match code {
        0x18 => '\u{02D8}', // BREVE
        0x19 => '\u{02C7}', // CARON
        0x1A => '\u{02C6}', // MODIFIER LETTER CIRCUMFLEX ACCENT
        0x1B => '\u{02D9}', // DOT ABOVE
        0x1C => '\u{02DD}', // DOUBLE ACUTE ACCENT
        0x1D => '\u{02DB}', // OGONEK
        0x1E => '\u{02DA}', // RING ABOVE
        0x1F => '\u{02DC}', // SMALL TILDE
        0x7F | 0x9F | 0xAD => return None,
        0x00..=0x7E => code as char,
        0x80..=0x9E => PDFDOC_HIGH[(code - 0x80) as usize],
        0xA0 => '\u{20AC}', // EURO SIGN
        0xA1..=0xFF => code as char,
    };
    Some(ch)
}

fn pdfdoc_encode(ch: char) -> Option<u8> {
    let cp = ch as u32;
    match cp {
        0x00..=0x17 | 0x20..=0x7E => Some(cp as u8),
        0xA1..=0xFF if cp != 0xAD => Some(cp as u8),
        0x20AC => Some(0xA0),
        _ => {
            if let Some(pos) = PDFDOC_LOW.iter().position(|&c| c == ch) {
                return Some(0x18 + pos as u8);
            }
            PDFDOC_HIGH
                .iter()
                .position(|&c| c == ch)
                .map(|pos| 0x80 + pos as u8)
        },
    }
}

const PDFDOC_LOW: [char; 8] = [
    '\u{02D8}', '\u{02C7}', '\u{02C6}', '\u{02D9}', '\u{02DD}', '\u{02DB}', '\u{02DA}', '\u{02DC}',
];

const PDFDOC_HIGH: [char; 31] = [
    '\u{2022}', // BULLET
    '\u{2020}', // DAGGER
    '\u{2021}', // DOUBLE DAGGER
    '\u{2026}', // HORIZONTAL ELLIPSIS
    '\u{2014}', // EM DASH
    '\u{2013}', // EN DASH
    '\u{0192}', // LATIN SMALL LETTER F WITH HOOK
    '\u{2044}', // FRACTION SLASH
    '\u{2039}', // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
    '\u{203A}', // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
    '\u{2212}', // MINUS SIGN
    '\u{2030}', // PER MILLE SIGN
    '\u{201E}', // DOUBLE LOW-9 QUOTATION MARK
    '\u{201C}', // LEFT DOUBLE QUOTATION MARK
    '\u{201D}', // RIGHT DOUBLE QUOTATION MARK
    '\u{2018}', // LEFT SINGLE QUOTATION MARK
    '\u{2019}', // RIGHT SINGLE QUOTATION MARK
    '\u{201A}', // SINGLE LOW-9 QUOTATION MARK
    '\u{2122}', // TRADE MARK SIGN
    '\u{FB01}', // LATIN SMALL LIGATURE FI
    '\u{FB02}', // LATIN SMALL LIGATURE FL
    '\u{0141}', // LATIN CAPITAL LETTER L WITH STROKE
    '\u{0152}', // LATIN CAPITAL LIGATURE OE
    '\u{0160}', // LATIN CAPITAL LETTER S WITH CARON
    '\u{0178}', // LATIN CAPITAL LETTER Y WITH DIAERESIS
    '\u{017D}', // LATIN CAPITAL LETTER Z WITH CARON
    '\u{0131}', // LATIN SMALL LETTER DOTLESS I
    '\u{0142}', // LATIN SMALL LETTER L WITH STROKE
    '\u{0153}', // LATIN SMALL LIGATURE OE
    '\u{0161}', // LATIN SMALL LETTER S WITH CARON
    '\u{017E}', // LATIN SMALL LETTER Z WITH CARON
];

/// Check whether a code point lies in one of the Unicode Private Use Areas.
pub fn is_private_use(ch: char) -> bool {
    matches!(
        ch as u32,
        0xE000..=0xF8FF | 0xF_0000..=0xF_FFFD | 0x10_0000..=0x10_FFFD
    )
}

/// First Private Use Area code point in `s`, if any.
pub fn first_private_use(s: &str) -> Option<char> {
    s.chars().find(|&c| is_private_use(c))
}
