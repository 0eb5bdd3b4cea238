//! PDF annotations, destinations and actions.
//!
//! Provides the annotation model per PDF spec ISO 32000-1:2008, Section 12.5,
//! with the destination and action forms of Sections 12.3.2 and 12.6 that the
//! link rules compare.

use crate::encoding::TextString;
use crate::object::ObjectRef;
use crate::structure::StructElemId;
use bitflags::bitflags;
use indexmap::IndexMap;

/// Annotation subtypes per PDF spec Table 169.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationSubtype {
    /// Text annotation (sticky note) - Section 12.5.6.4
    Text,
    /// Link annotation - Section 12.5.6.5
    Link,
    /// Free text annotation - Section 12.5.6.6
    FreeText,
    /// Highlight annotation - Section 12.5.6.10
    Highlight,
    /// Underline annotation - Section 12.5.6.10
    Underline,
    /// Strikeout annotation - Section 12.5.6.10
    StrikeOut,
    /// Rubber stamp annotation - Section 12.5.6.12
    Stamp,
    /// Ink annotation - Section 12.5.6.13
    Ink,
    /// Popup annotation - Section 12.5.6.14
    Popup,
    /// File attachment annotation - Section 12.5.6.15
    FileAttachment,
    /// Widget annotation (form field) - Section 12.5.6.19
    Widget,
    /// Screen annotation - Section 12.5.6.18
    Screen,
    /// Printer's mark annotation - Section 12.5.6.20
    PrinterMark,
    /// Redaction annotation - Section 12.5.6.23
    Redact,
    /// Unknown annotation type
    Unknown,
}

impl AnnotationSubtype {
    /// Get the PDF name for this annotation subtype.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Link => "Link",
            Self::FreeText => "FreeText",
            Self::Highlight => "Highlight",
            Self::Underline => "Underline",
            Self::StrikeOut => "StrikeOut",
            Self::Stamp => "Stamp",
            Self::Ink => "Ink",
            Self::Popup => "Popup",
            Self::FileAttachment => "FileAttachment",
            Self::Widget => "Widget",
            Self::Screen => "Screen",
            Self::PrinterMark => "PrinterMark",
            Self::Redact => "Redact",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse from the `Subtype` name.
    pub fn from_pdf_name(name: &str) -> Self {
        match name {
            "Text" => Self::Text,
            "Link" => Self::Link,
            "FreeText" => Self::FreeText,
            "Highlight" => Self::Highlight,
            "Underline" => Self::Underline,
            "StrikeOut" => Self::StrikeOut,
            "Stamp" => Self::Stamp,
            "Ink" => Self::Ink,
            "Popup" => Self::Popup,
            "FileAttachment" => Self::FileAttachment,
            "Widget" => Self::Widget,
            "Screen" => Self::Screen,
            "PrinterMark" => Self::PrinterMark,
            "Redact" => Self::Redact,
            _ => Self::Unknown,
        }
    }

    /// Whether an annotation of this type must carry `Contents`.
    pub fn requires_contents(&self) -> bool {
        !matches!(self, Self::Link | Self::Widget | Self::Popup | Self::PrinterMark)
    }
}

bitflags! {
    /// Annotation flags per PDF spec Table 165.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AnnotationFlags: u32 {
        /// Bit 1: Do not display if no appearance handler
        const INVISIBLE = 1 << 0;
        /// Bit 2: Do not display or print
        const HIDDEN = 1 << 1;
        /// Bit 3: Print when printing the page
        const PRINT = 1 << 2;
        /// Bit 4: Do not scale with page zoom
        const NO_ZOOM = 1 << 3;
        /// Bit 5: Do not rotate with page
        const NO_ROTATE = 1 << 4;
        /// Bit 6: Do not display on screen
        const NO_VIEW = 1 << 5;
        /// Bit 7: Do not allow interaction
        const READ_ONLY = 1 << 6;
    }
}

/// A PDF annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Annotation subtype
    pub subtype: AnnotationSubtype,
    /// Text contents of the annotation
    pub contents: Option<TextString>,
    /// Subject of the annotation
    pub subject: Option<TextString>,
    /// Rectangle bounds [x1, y1, x2, y2]
    pub rect: [f64; 4],
    /// Link destination (for Link annotations)
    /// PDF Spec: ISO 32000-1:2008, Section 12.3.2 - Destinations
    pub destination: Option<LinkDestination>,
    /// Link action (for Link annotations)
    /// PDF Spec: ISO 32000-1:2008, Section 12.6 - Actions
    pub action: Option<LinkAction>,
    /// Annotation flags (F entry)
    pub flags: AnnotationFlags,
}

impl Annotation {
    /// Create an annotation of `subtype` with a zero rectangle.
    pub fn new(subtype: AnnotationSubtype) -> Self {
        Self {
            subtype,
            contents: None,
            subject: None,
            rect: [0.0; 4],
            destination: None,
            action: None,
            flags: AnnotationFlags::PRINT,
        }
    }

    /// A Link annotation with a destination.
    pub fn link(destination: LinkDestination) -> Self {
        Self {
            destination: Some(destination),
            ..Self::new(AnnotationSubtype::Link)
        }
    }

    /// A Link annotation with an action.
    pub fn link_action(action: LinkAction) -> Self {
        Self {
            action: Some(action),
            ..Self::new(AnnotationSubtype::Link)
        }
    }

    /// Set the contents.
    pub fn with_contents(mut self, contents: impl Into<TextString>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: impl Into<TextString>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the rectangle.
    pub fn with_rect(mut self, rect: [f64; 4]) -> Self {
        self.rect = rect;
        self
    }

    /// Set the flags.
    pub fn with_flags(mut self, flags: AnnotationFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Check if this is a Link annotation.
    pub fn is_link(&self) -> bool {
        self.subtype == AnnotationSubtype::Link
    }

    /// Hidden annotations need not be tagged.
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(AnnotationFlags::HIDDEN)
    }

    /// Where activating this annotation leads, with named destinations
    /// looked up in `names`.
    pub fn target(&self, names: &IndexMap<String, LinkDestination>) -> LinkTarget {
        match (&self.destination, &self.action) {
            (Some(dest), _) => dest.resolve(names),
            (None, Some(LinkAction::GoTo(dest))) => dest.resolve(names),
            (None, Some(LinkAction::Uri(uri))) => LinkTarget::Uri(uri.clone()),
            (None, Some(LinkAction::GoToRemote { file, destination })) => LinkTarget::Remote {
                file: file.clone(),
                destination: destination.clone(),
            },
            (None, Some(LinkAction::Other { action_type })) => {
                LinkTarget::Action(action_type.clone())
            },
            (None, None) => LinkTarget::None,
        }
    }
}

/// Link destination within a PDF document.
///
/// Specifies a location within the PDF to navigate to.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkDestination {
    /// Named destination (string reference to destination dictionary)
    Named(String),
    /// Explicit destination: [page fit_type params...]
    Explicit {
        /// Target page number (0-indexed)
        page: u32,
        /// Fit type (XYZ, Fit, FitH, FitV, FitR, FitB, FitBH, FitBV)
        fit_type: String,
        /// Additional parameters (coordinates, zoom factor, etc.)
        params: Vec<f32>,
    },
    /// Structure destination (PDF 2.0): [elem fit_type params...]
    Structure {
        /// Target structure element
        elem: StructElemId,
        /// Fit type
        fit_type: String,
        /// Additional parameters
        params: Vec<f32>,
    },
}

impl LinkDestination {
    /// An explicit `/Fit` destination to a page.
    pub fn page(page: u32) -> Self {
        LinkDestination::Explicit {
            page,
            fit_type: "Fit".to_string(),
            params: Vec::new(),
        }
    }

    /// A `/Fit` structure destination.
    pub fn structure(elem: StructElemId) -> Self {
        LinkDestination::Structure {
            elem,
            fit_type: "Fit".to_string(),
            params: Vec::new(),
        }
    }

    /// Resolve to a comparable value.
    ///
    /// A name resolves through `names` once; a name that maps to another name
    /// or is absent stays unresolved.
    pub fn resolve(&self, names: &IndexMap<String, LinkDestination>) -> LinkTarget {
        match self {
            LinkDestination::Named(name) => match names.get(name) {
                Some(LinkDestination::Named(_)) | None => LinkTarget::UnknownName(name.clone()),
                Some(dest) => dest.resolve(names),
            },
            LinkDestination::Explicit {
                page,
                fit_type,
                params,
            } => LinkTarget::Page {
                page: *page,
                fit_type: fit_type.clone(),
                params: params.clone(),
            },
            LinkDestination::Structure {
                elem,
                fit_type,
                params,
            } => LinkTarget::Structure {
                elem: *elem,
                fit_type: fit_type.clone(),
                params: params.clone(),
            },
        }
    }
}

/// Link action associated with an annotation.
///
/// Specifies what happens when the annotation is activated.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkAction {
    /// URI action - navigate to a web URL
    Uri(String),
    /// GoTo action - navigate to a destination within the document
    GoTo(LinkDestination),
    /// GoToR action - navigate to a destination in another document
    GoToRemote {
        /// File specification
        file: String,
        /// Destination in remote file
        destination: Option<LinkDestination>,
    },
    /// Other action types (Launch, Named, etc.)
    Other {
        /// Action type (/S field)
        action_type: String,
    },
}

/// Resolved target of a link, compared by value.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    /// A view of a page
    Page {
        /// Target page (0-indexed)
        page: u32,
        /// Fit type
        fit_type: String,
        /// Fit parameters
        params: Vec<f32>,
    },
    /// A structure element
    Structure {
        /// Target element
        elem: StructElemId,
        /// Fit type
        fit_type: String,
        /// Fit parameters
        params: Vec<f32>,
    },
    /// An external URI
    Uri(String),
    /// A location in another file
    Remote {
        /// File specification
        file: String,
        /// Destination in that file
        destination: Option<LinkDestination>,
    },
    /// A named destination missing from the name table
    UnknownName(String),
    /// A non-navigation action
    Action(String),
    /// No destination and no action
    None,
}

impl LinkTarget {
    /// Whether the target lies inside this document.
    pub fn is_internal(&self) -> bool {
        matches!(self, LinkTarget::Page { .. } | LinkTarget::Structure { .. })
    }
}

/// An annotation placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedAnnotation {
    /// Object reference of the annotation dictionary
    pub obj: ObjectRef,
    /// Page index (0-based)
    pub page: usize,
    /// The annotation
    pub annotation: Annotation,
    /// Structure element holding the OBJR (`StructParent`)
    pub struct_parent: Option<StructElemId>,
}
