//! Layout elements handed to the document for tagged emission.
//!
//! A layout engine flows text and images into block elements; the resulting
//! tree of [`ContentElement`]s is what [`crate::document::TaggedDocument::add_element`]
//! turns into structure elements, marked-content sequences and content
//! stream operators in one step.
//!
//! ## Example
//!
//! ```
//! use pdfua_check::elements::{ContentElement, StructureElement};
//!
//! let list = StructureElement::new("L")
//!     .with_child(ContentElement::Structure(
//!         StructureElement::new("LI")
//!             .with_child(ContentElement::Structure(
//!                 StructureElement::new("LBody").with_child(ContentElement::text("Item", 0)),
//!             )),
//!     ));
//! assert_eq!(list.children.len(), 1);
//! ```

use crate::encoding::TextString;
use crate::fonts::FontId;
use crate::structure::{AttributeDict, NamespaceId, StructElemId};

/// A content element that can be written to a tagged page.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentElement {
    /// A text run
    Text(TextContent),
    /// An image XObject
    Image(ImageContent),
    /// Structural element (for Tagged PDF support)
    Structure(StructureElement),
    /// Content marked as an artifact (headers, footers, decoration)
    Artifact(Vec<ContentElement>),
}

impl ContentElement {
    /// A text run at the origin.
    pub fn text(text: impl Into<String>, font: FontId) -> Self {
        ContentElement::Text(TextContent {
            text: text.into(),
            font,
            size: 12.0,
            origin: (0.0, 0.0),
        })
    }

    /// An image by resource name.
    pub fn image(resource: impl Into<String>) -> Self {
        ContentElement::Image(ImageContent {
            resource: resource.into(),
        })
    }

    /// Check if this is a text element.
    pub fn is_text(&self) -> bool {
        matches!(self, ContentElement::Text(_))
    }

    /// Check if this is an image element.
    pub fn is_image(&self) -> bool {
        matches!(self, ContentElement::Image(_))
    }

    /// Get as structure element if this is one.
    pub fn as_structure(&self) -> Option<&StructureElement> {
        match self {
            ContentElement::Structure(s) => Some(s),
            _ => None,
        }
    }
}

/// A run of text in one font.
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    /// The text
    pub text: String,
    /// Font registered with the document
    pub font: FontId,
    /// Font size in points
    pub size: f32,
    /// Baseline origin
    pub origin: (f32, f32),
}

/// A placed image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageContent {
    /// XObject resource name (e.g. "Im1")
    pub resource: String,
}

/// A structural element for Tagged PDF support.
///
/// Represents a node in the PDF structure tree that groups
/// other content elements semantically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureElement {
    /// Structure type (e.g., "P", "H1", "L", "Figure") or a role-mapped name
    pub structure_type: String,
    /// Explicit namespace
    pub namespace: Option<NamespaceId>,
    /// Children content elements
    pub children: Vec<ContentElement>,
    /// Attribute dictionaries in document order
    pub attributes: Vec<AttributeDict>,
    /// Alternate text (for accessibility)
    pub alt_text: Option<TextString>,
    /// Replacement text
    pub actual_text: Option<TextString>,
    /// Language tag (e.g., "en-US")
    pub language: Option<TextString>,
    /// `Ref` pointers to existing elements
    pub refs: Vec<StructElemId>,
}

impl StructureElement {
    /// Create an element with the given type.
    pub fn new(structure_type: impl Into<String>) -> Self {
        Self {
            structure_type: structure_type.into(),
            ..Default::default()
        }
    }

    /// Append a child.
    pub fn with_child(mut self, child: ContentElement) -> Self {
        self.children.push(child);
        self
    }

    /// Append an attribute dictionary.
    pub fn with_attributes(mut self, attributes: AttributeDict) -> Self {
        self.attributes.push(attributes);
        self
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: NamespaceId) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Set the alternate text.
    pub fn with_alt(mut self, alt: impl Into<TextString>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }

    /// Set the replacement text.
    pub fn with_actual_text(mut self, text: impl Into<TextString>) -> Self {
        self.actual_text = Some(text.into());
        self
    }

    /// Set the language.
    pub fn with_language(mut self, lang: impl Into<TextString>) -> Self {
        self.language = Some(lang.into());
        self
    }

    /// Add a `Ref` pointer.
    pub fn with_ref(mut self, target: StructElemId) -> Self {
        self.refs.push(target);
        self
    }
}
