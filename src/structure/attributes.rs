//! Structure attributes (ISO 32000-2:2020, Section 14.8.5).
//!
//! A structure element may carry several attribute dictionaries, each tagged
//! with an owner (`O`). When more than one dictionary of the same owner
//! defines a key, the first one in document order wins. There is no
//! type-specific merging.

use crate::object::{Dictionary, Object};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner of the list attributes.
pub const OWNER_LIST: &str = "List";
/// Key of the list numbering attribute.
pub const KEY_LIST_NUMBERING: &str = "ListNumbering";

/// One attribute dictionary attached to a structure element.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDict {
    owner: String,
    entries: Dictionary,
}

impl AttributeDict {
    /// Create an empty attribute dictionary for `owner` (e.g. "List", "Layout").
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            entries: Dictionary::new(),
        }
    }

    /// List attributes with a `ListNumbering` entry.
    pub fn list_numbering(numbering: ListNumbering) -> Self {
        Self::new(OWNER_LIST).with(KEY_LIST_NUMBERING, Object::name(numbering.as_name()))
    }

    /// Add an entry.
    pub fn with(mut self, key: impl Into<String>, value: Object) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// The attribute owner (`O`).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.get(key)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &Dictionary {
        &self.entries
    }
}

/// Find the effective value of `key` for `owner`: the first dictionary in
/// document order that defines it.
pub fn first_attribute<'a>(
    attributes: &'a [AttributeDict],
    owner: &str,
    key: &str,
) -> Option<&'a Object> {
    attributes
        .iter()
        .filter(|dict| dict.owner() == owner)
        .find_map(|dict| dict.get(key))
}

/// Values of the `ListNumbering` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListNumbering {
    /// No numbering (the sentinel)
    None,
    /// Unordered, numbering left to the reader (PDF 2.0)
    Unordered,
    /// Description list (PDF 2.0)
    Description,
    /// Solid circular bullet
    Disc,
    /// Open circular bullet
    Circle,
    /// Solid square bullet
    Square,
    /// Ordered, numbering left to the reader (PDF 2.0)
    Ordered,
    /// Decimal arabic numerals
    Decimal,
    /// Uppercase roman numerals
    UpperRoman,
    /// Lowercase roman numerals
    LowerRoman,
    /// Uppercase letters
    UpperAlpha,
    /// Lowercase letters
    LowerAlpha,
}

impl ListNumbering {
    /// Parse from the attribute's name value.
    pub fn from_name(name: &str) -> Option<Self> {
        let value = match name {
            "None" => Self::None,
            "Unordered" => Self::Unordered,
            "Description" => Self::Description,
            "Disc" => Self::Disc,
            "Circle" => Self::Circle,
            "Square" => Self::Square,
            "Ordered" => Self::Ordered,
            "Decimal" => Self::Decimal,
            "UpperRoman" => Self::UpperRoman,
            "LowerRoman" => Self::LowerRoman,
            "UpperAlpha" => Self::UpperAlpha,
            "LowerAlpha" => Self::LowerAlpha,
            _ => return None,
        };
        Some(value)
    }

    /// Get the PDF name for this value.
    pub fn as_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Unordered => "Unordered",
            Self::Description => "Description",
            Self::Disc => "Disc",
            Self::Circle => "Circle",
            Self::Square => "Square",
            Self::Ordered => "Ordered",
            Self::Decimal => "Decimal",
            Self::UpperRoman => "UpperRoman",
            Self::LowerRoman => "LowerRoman",
            Self::UpperAlpha => "UpperAlpha",
            Self::LowerAlpha => "LowerAlpha",
        }
    }
}

impl fmt::Display for ListNumbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_name())
    }
}

/// Effective list numbering of a List node.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectiveListNumbering {
    /// No List-owned dictionary defines `ListNumbering`
    Absent,
    /// The winning value is a recognised name
    Valid(ListNumbering),
    /// The winning value is not a recognised name
    Invalid(Object),
}

/// Resolve the effective `ListNumbering` with first-wins precedence.
pub fn effective_list_numbering(attributes: &[AttributeDict]) -> EffectiveListNumbering {
    match first_attribute(attributes, OWNER_LIST, KEY_LIST_NUMBERING) {
        None => EffectiveListNumbering::Absent,
        Some(value) => match value.as_name().and_then(ListNumbering::from_name) {
            Some(numbering) => EffectiveListNumbering::Valid(numbering),
            None => EffectiveListNumbering::Invalid(value.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_dictionary_wins() {
        let attrs = vec![
            AttributeDict::list_numbering(ListNumbering::Decimal),
            AttributeDict::new("Layout").with("Placement", Object::name("Block")),
            AttributeDict::list_numbering(ListNumbering::None),
        ];
        assert_eq!(
            effective_list_numbering(&attrs),
            EffectiveListNumbering::Valid(ListNumbering::Decimal)
        );
    }

    #[test]
    fn test_other_owners_ignored() {
        let attrs = vec![
            AttributeDict::new("Layout").with(KEY_LIST_NUMBERING, Object::name("None")),
            AttributeDict::list_numbering(ListNumbering::Disc),
        ];
        assert_eq!(
            effective_list_numbering(&attrs),
            EffectiveListNumbering::Valid(ListNumbering::Disc)
        );
    }

    #[test]
    fn test_invalid_first_value_is_not_skipped() {
        let attrs = vec![
            AttributeDict::new(OWNER_LIST).with(KEY_LIST_NUMBERING, Object::name("Bogus")),
            AttributeDict::list_numbering(ListNumbering::Decimal),
        ];
        assert_eq!(
            effective_list_numbering(&attrs),
            EffectiveListNumbering::Invalid(Object::name("Bogus"))
        );
    }

    #[test]
    fn test_absent() {
        assert_eq!(effective_list_numbering(&[]), EffectiveListNumbering::Absent);
        let attrs = vec![AttributeDict::new(OWNER_LIST)];
        assert_eq!(effective_list_numbering(&attrs), EffectiveListNumbering::Absent);
    }

    #[test]
    fn test_list_numbering_names() {
        for name in ["None", "Disc", "Decimal", "LowerAlpha", "Ordered"] {
            let value = ListNumbering::from_name(name).expect("known name");
            assert_eq!(value.as_name(), name);
        }
        assert_eq!(ListNumbering::from_name("decimal"), None);
    }
}
