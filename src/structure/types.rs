//! Types for logical structure trees.
//!
//! Implements structure element types according to ISO 32000-1:2008 Section 14.7.2
//! and ISO 32000-2:2020 Section 14.8 (standard structure namespaces).

use super::attributes::AttributeDict;
use crate::encoding::TextString;
use crate::object::ObjectRef;
use phf::phf_set;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace URI of the PDF 1.7 standard structure types.
pub const NS_PDF_1_7: &str = "http://iso.org/pdf/ssn";
/// Namespace URI of the PDF 2.0 standard structure types.
pub const NS_PDF_2_0: &str = "http://iso.org/pdf2/ssn";
/// Namespace URI of MathML 3.0.
pub const NS_MATHML: &str = "http://www.w3.org/1998/Math/MathML";

static PDF_1_7_ROLES: phf::Set<&'static str> = phf_set! {
    "Document", "Part", "Art", "Sect", "Div", "BlockQuote", "Caption", "TOC", "TOCI",
    "Index", "NonStruct", "Private", "P", "H", "H1", "H2", "H3", "H4", "H5", "H6",
    "L", "LI", "Lbl", "LBody", "Table", "TR", "TH", "TD", "THead", "TBody", "TFoot",
    "Span", "Quote", "Note", "Reference", "BibEntry", "Code", "Link", "Annot",
    "Ruby", "RB", "RT", "RP", "Warichu", "WT", "WP", "Figure", "Formula", "Form",
};

static PDF_2_0_ROLES: phf::Set<&'static str> = phf_set! {
    "Document", "DocumentFragment", "Part", "Sect", "Div", "Aside", "NonStruct",
    "P", "H", "Title", "FENote", "Sub", "Lbl", "Span", "Em", "Strong", "Link", "Annot",
    "Form", "Ruby", "RB", "RT", "RP", "Warichu", "WT", "WP", "L", "LI", "LBody",
    "Table", "TR", "TH", "TD", "THead", "TBody", "TFoot", "Caption", "Figure",
    "Formula", "Artifact",
};

/// Identifier of a structure element inside a [`super::StructTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructElemId(pub(crate) usize);

impl StructElemId {
    /// Arena index of this element.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for StructElemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StructElem #{}", self.0)
    }
}

/// Identifier of a namespace inside a [`super::StructTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceId(pub(crate) usize);

impl NamespaceId {
    /// Arena index of this namespace.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Which standard vocabulary, if any, a namespace carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardNamespace {
    /// PDF 1.7 standard structure types
    Pdf1_7,
    /// PDF 2.0 standard structure types
    Pdf2_0,
    /// MathML 3.0 element names
    MathMl,
    /// A producer-defined namespace without standard types
    Custom(String),
}

impl StandardNamespace {
    /// Classify a namespace URI.
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            NS_PDF_1_7 => Self::Pdf1_7,
            NS_PDF_2_0 => Self::Pdf2_0,
            NS_MATHML => Self::MathMl,
            other => Self::Custom(other.to_string()),
        }
    }

    /// The namespace URI.
    pub fn uri(&self) -> &str {
        match self {
            Self::Pdf1_7 => NS_PDF_1_7,
            Self::Pdf2_0 => NS_PDF_2_0,
            Self::MathMl => NS_MATHML,
            Self::Custom(uri) => uri,
        }
    }

    /// Whether `role` is a standard type of this namespace.
    pub fn is_standard(&self, role: &str) -> bool {
        match self {
            Self::Pdf1_7 => PDF_1_7_ROLES.contains(role),
            Self::Pdf2_0 => PDF_2_0_ROLES.contains(role) || heading_level(role).is_some(),
            Self::MathMl => !role.is_empty(),
            Self::Custom(_) => false,
        }
    }
}

/// A namespace (PDF 2.0 `Namespace` dictionary) with its private role map.
#[derive(Debug, Clone)]
pub struct Namespace {
    pub(crate) kind: StandardNamespace,
    pub(crate) role_map: indexmap::IndexMap<String, RoleTarget>,
}

impl Namespace {
    pub(crate) fn new(uri: &str) -> Self {
        Self {
            kind: StandardNamespace::from_uri(uri),
            role_map: indexmap::IndexMap::new(),
        }
    }

    /// The namespace URI.
    pub fn uri(&self) -> &str {
        self.kind.uri()
    }

    /// The standard vocabulary carried by this namespace.
    pub fn kind(&self) -> &StandardNamespace {
        &self.kind
    }

    /// Role mappings scoped to this namespace (`RoleMapNS`).
    pub fn role_map(&self) -> &indexmap::IndexMap<String, RoleTarget> {
        &self.role_map
    }
}

/// Target of a namespace-scoped role mapping.
///
/// A `None` namespace keeps the mapped role in the source namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTarget {
    /// Target role name
    pub role: String,
    /// Namespace the target role belongs to
    pub namespace: Option<NamespaceId>,
}

/// Standard structure types of PDF 1.7 and PDF 2.0.
///
/// Only roles that resolve through the role map end up here; custom names
/// stay strings on the node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StructType {
    // Grouping
    /// Document root
    Document,
    /// Document fragment (PDF 2.0)
    DocumentFragment,
    /// Part (major division)
    Part,
    /// Article (PDF 1.7)
    Art,
    /// Section
    Sect,
    /// Division
    Div,
    /// Aside (PDF 2.0)
    Aside,
    /// Non-structural grouping
    NonStruct,
    /// Private content (PDF 1.7)
    Private,
    /// Block quotation (PDF 1.7)
    BlockQuote,
    /// Caption
    Caption,
    /// Table of contents (PDF 1.7)
    TOC,
    /// Table of contents item (PDF 1.7)
    TOCI,
    /// Index (PDF 1.7)
    Index,

    // Block level
    /// Paragraph
    P,
    /// Unnumbered heading
    H,
    /// Numbered heading (H1, H2, ...)
    Hn(u8),
    /// Title (PDF 2.0)
    Title,
    /// Footnote or endnote (PDF 2.0)
    FENote,
    /// Note (PDF 1.7)
    Note,
    /// Sub-block (PDF 2.0)
    Sub,

    // Lists
    /// List
    L,
    /// List item
    LI,
    /// Label (list item marker)
    Lbl,
    /// List body (list item content)
    LBody,

    // Tables
    /// Table
    Table,
    /// Table row
    TR,
    /// Table header cell
    TH,
    /// Table data cell
    TD,
    /// Table header group
    THead,
    /// Table body group
    TBody,
    /// Table footer group
    TFoot,

    // Inline
    /// Span (inline generic)
    Span,
    /// Quote
    Quote,
    /// Reference
    Reference,
    /// Bibliographic entry
    BibEntry,
    /// Code
    Code,
    /// Link
    Link,
    /// Annotation
    Annot,
    /// Emphasis (PDF 2.0)
    Em,
    /// Strong emphasis (PDF 2.0)
    Strong,
    /// Ruby annotation
    Ruby,
    /// Ruby base text
    RB,
    /// Ruby annotation text
    RT,
    /// Ruby punctuation
    RP,
    /// Warichu
    Warichu,
    /// Warichu text
    WT,
    /// Warichu punctuation
    WP,

    // Illustrations
    /// Figure
    Figure,
    /// Formula
    Formula,
    /// Form (input field)
    Form,

    /// Artifact (PDF 2.0)
    Artifact,

    /// MathML element
    MathMl(String),
}

impl StructType {
    /// Parse a standard type name as defined by `namespace`.
    ///
    /// Returns `None` when the name is not standard in that namespace.
    pub fn from_standard_name(name: &str, namespace: &StandardNamespace) -> Option<Self> {
        if !namespace.is_standard(name) {
            return None;
        }
        if *namespace == StandardNamespace::MathMl {
            return Some(Self::MathMl(name.to_string()));
        }
        if let Some(level) = heading_level(name) {
            return Some(Self::Hn(level));
        }
        let ty = match name {
            "Document" => Self::Document,
            "DocumentFragment" => Self::DocumentFragment,
            "Part" => Self::Part,
            "Art" => Self::Art,
            "Sect" => Self::Sect,
            "Div" => Self::Div,
            "Aside" => Self::Aside,
            "NonStruct" => Self::NonStruct,
            "Private" => Self::Private,
            "BlockQuote" => Self::BlockQuote,
            "Caption" => Self::Caption,
            "TOC" => Self::TOC,
            "TOCI" => Self::TOCI,
            "Index" => Self::Index,
            "P" => Self::P,
            "H" => Self::H,
            "Title" => Self::Title,
            "FENote" => Self::FENote,
            "Note" => Self::Note,
            "Sub" => Self::Sub,
            "L" => Self::L,
            "LI" => Self::LI,
            "Lbl" => Self::Lbl,
            "LBody" => Self::LBody,
            "Table" => Self::Table,
            "TR" => Self::TR,
            "TH" => Self::TH,
            "TD" => Self::TD,
            "THead" => Self::THead,
            "TBody" => Self::TBody,
            "TFoot" => Self::TFoot,
            "Span" => Self::Span,
            "Quote" => Self::Quote,
            "Reference" => Self::Reference,
            "BibEntry" => Self::BibEntry,
            "Code" => Self::Code,
            "Link" => Self::Link,
            "Annot" => Self::Annot,
            "Em" => Self::Em,
            "Strong" => Self::Strong,
            "Ruby" => Self::Ruby,
            "RB" => Self::RB,
            "RT" => Self::RT,
            "RP" => Self::RP,
            "Warichu" => Self::Warichu,
            "WT" => Self::WT,
            "WP" => Self::WP,
            "Figure" => Self::Figure,
            "Formula" => Self::Formula,
            "Form" => Self::Form,
            "Artifact" => Self::Artifact,
            _ => return None,
        };
        Some(ty)
    }

    /// The role category used by the rule modules.
    pub fn category(&self) -> RoleCategory {
        match self {
            Self::Document
            | Self::DocumentFragment
            | Self::Part
            | Self::Art
            | Self::Sect
            | Self::Div
            | Self::Aside
            | Self::NonStruct
            | Self::Private
            | Self::BlockQuote
            | Self::Index => RoleCategory::Grouping,
            Self::P | Self::Title | Self::FENote | Self::Note | Self::Sub => RoleCategory::Block,
            Self::H | Self::Hn(_) => RoleCategory::Heading,
            Self::Caption => RoleCategory::Caption,
            Self::TOC => RoleCategory::Toc,
            Self::TOCI => RoleCategory::TocItem,
            Self::L => RoleCategory::List,
            Self::LI => RoleCategory::ListItem,
            Self::Lbl => RoleCategory::Label,
            Self::LBody => RoleCategory::ListBody,
            Self::Table | Self::TR | Self::THead | Self::TBody | Self::TFoot => {
                RoleCategory::Table
            },
            Self::TH | Self::TD => RoleCategory::TableCell,
            Self::Link => RoleCategory::Link,
            Self::Reference => RoleCategory::Reference,
            Self::Annot => RoleCategory::Annot,
            Self::Figure => RoleCategory::Figure,
            Self::Formula => RoleCategory::Formula,
            Self::Form => RoleCategory::Form,
            Self::Artifact => RoleCategory::Artifact,
            Self::MathMl(_) => RoleCategory::Math,
            Self::Span
            | Self::Quote
            | Self::BibEntry
            | Self::Code
            | Self::Em
            | Self::Strong
            | Self::Ruby
            | Self::RB
            | Self::RT
            | Self::RP
            | Self::Warichu
            | Self::WT
            | Self::WP => RoleCategory::Inline,
        }
    }

    /// Check if this is a heading type (H, H1-Hn)
    pub fn is_heading(&self) -> bool {
        matches!(self, Self::H | Self::Hn(_))
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hn(level) => write!(f, "H{}", level),
            Self::MathMl(name) => write!(f, "{}", name),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Closed set of role families the rules dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    /// Document, Part, Sect, Div and friends
    Grouping,
    /// Paragraph-like blocks
    Block,
    /// Headings
    Heading,
    /// List container
    List,
    /// List item
    ListItem,
    /// List item label
    Label,
    /// List item body
    ListBody,
    /// Table and row groups
    Table,
    /// Table cells
    TableCell,
    /// Table of contents
    Toc,
    /// Table of contents item
    TocItem,
    /// Link
    Link,
    /// Reference
    Reference,
    /// Annotation wrapper
    Annot,
    /// Caption
    Caption,
    /// Image-like content
    Figure,
    /// Formula-like content
    Formula,
    /// Form field
    Form,
    /// Structure-level artifact
    Artifact,
    /// Inline text-level roles
    Inline,
    /// MathML content
    Math,
}

/// Parse the level of a numbered heading ("H1" -> 1).
pub(crate) fn heading_level(name: &str) -> Option<u8> {
    let digits = name.strip_prefix('H')?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok()
}

/// Reference to marked content by MCID on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkedContentRef {
    /// Page index (0-based)
    pub page: usize,
    /// Marked Content ID
    pub mcid: u32,
}

/// Child of a structure element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructChild {
    /// Another structure element
    Elem(StructElemId),
    /// Marked content on a page
    MarkedContent(MarkedContentRef),
    /// Object reference (OBJR), e.g. an annotation
    Object(ObjectRef),
}

/// Accessibility properties of a structure element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessibilityProps {
    /// Alternate description (`Alt`)
    pub alt: Option<TextString>,
    /// Replacement text (`ActualText`)
    pub actual_text: Option<TextString>,
    /// Expanded form of an abbreviation (`E`)
    pub expansion: Option<TextString>,
    /// Language (`Lang`)
    pub lang: Option<TextString>,
    /// Pointers to other structure elements (`Ref`)
    pub refs: Vec<StructElemId>,
}

/// A structure element (StructElem) in the structure tree.
#[derive(Debug, Clone)]
pub struct StructElem {
    pub(crate) role: String,
    pub(crate) namespace: Option<NamespaceId>,
    pub(crate) parent: Option<StructElemId>,
    pub(crate) children: Vec<StructChild>,
    pub(crate) attributes: Vec<AttributeDict>,
    pub(crate) props: AccessibilityProps,
}

impl StructElem {
    pub(crate) fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            namespace: None,
            parent: None,
            children: Vec::new(),
            attributes: Vec::new(),
            props: AccessibilityProps::default(),
        }
    }

    /// The role as written on the node (`S`).
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Explicit namespace of the node (`NS`).
    pub fn namespace(&self) -> Option<NamespaceId> {
        self.namespace
    }

    /// Parent element, if attached below another element.
    pub fn parent(&self) -> Option<StructElemId> {
        self.parent
    }

    /// Children in document order.
    pub fn children(&self) -> &[StructChild] {
        &self.children
    }

    /// Child structure elements in document order.
    pub fn child_elems(&self) -> impl Iterator<Item = StructElemId> + '_ {
        self.children.iter().filter_map(|c| match c {
            StructChild::Elem(id) => Some(*id),
            _ => None,
        })
    }

    /// Attribute dictionaries in document order.
    pub fn attributes(&self) -> &[AttributeDict] {
        &self.attributes
    }

    /// Accessibility properties.
    pub fn props(&self) -> &AccessibilityProps {
        &self.props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_type_parsing() {
        let pdf17 = StandardNamespace::Pdf1_7;
        assert_eq!(StructType::from_standard_name("P", &pdf17), Some(StructType::P));
        assert_eq!(StructType::from_standard_name("H1", &pdf17), Some(StructType::Hn(1)));
        assert_eq!(StructType::from_standard_name("TOCI", &pdf17), Some(StructType::TOCI));
        assert_eq!(StructType::from_standard_name("CustomType", &pdf17), None);
    }

    #[test]
    fn test_vocabularies_differ() {
        let pdf17 = StandardNamespace::Pdf1_7;
        let pdf20 = StandardNamespace::Pdf2_0;
        assert!(pdf17.is_standard("Art"));
        assert!(!pdf20.is_standard("Art"));
        assert!(pdf20.is_standard("Aside"));
        assert!(!pdf17.is_standard("Aside"));
        assert!(pdf20.is_standard("H9"));
        assert!(!pdf17.is_standard("H9"));
        assert!(!StandardNamespace::Custom("urn:x".into()).is_standard("P"));
    }

    #[test]
    fn test_mathml_elements_are_standard() {
        let ty = StructType::from_standard_name("mfrac", &StandardNamespace::MathMl);
        assert_eq!(ty, Some(StructType::MathMl("mfrac".into())));
        assert_eq!(ty.map(|t| t.category()), Some(RoleCategory::Math));
    }

    #[test]
    fn test_namespace_uri_round_trip() {
        assert_eq!(StandardNamespace::from_uri(NS_PDF_2_0), StandardNamespace::Pdf2_0);
        assert_eq!(StandardNamespace::Pdf1_7.uri(), NS_PDF_1_7);
        assert_eq!(StandardNamespace::from_uri("urn:custom").uri(), "urn:custom");
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("H1"), Some(1));
        assert_eq!(heading_level("H12"), Some(12));
        assert_eq!(heading_level("H"), None);
        assert_eq!(heading_level("H0"), None);
        assert_eq!(heading_level("Hx"), None);
    }

    #[test]
    fn test_is_heading() {
        assert!(StructType::Hn(1).is_heading());
        assert!(StructType::H.is_heading());
        assert!(!StructType::P.is_heading());
        assert!(!StructType::Document.is_heading());
    }

    #[test]
    fn test_categories() {
        assert_eq!(StructType::Figure.category(), RoleCategory::Figure);
        assert_eq!(StructType::Formula.category(), RoleCategory::Formula);
        assert_eq!(StructType::L.category(), RoleCategory::List);
        assert_eq!(StructType::TOCI.category(), RoleCategory::TocItem);
        assert_eq!(StructType::Em.category(), RoleCategory::Inline);
    }

    #[test]
    fn test_display() {
        assert_eq!(StructType::Hn(3).to_string(), "H3");
        assert_eq!(StructType::TOCI.to_string(), "TOCI");
    }
}
