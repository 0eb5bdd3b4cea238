//! Error types for the checker.
//!
//! This module defines every error that can surface from building a tagged
//! document or validating it. Accessibility violations travel as
//! [`Error::Conformance`]; everything else is misuse of the session API.

use crate::compliance::UaComplianceError;

/// Result type alias for checker operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or checking a tagged document.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)] // "Invalid"/"Unknown" prefixes are intentional for clarity
pub enum Error {
    /// A conformance rule was violated
    #[error("Conformance violation: {0}")]
    Conformance(Box<UaComplianceError>),

    /// Structure element id does not belong to this tree
    #[error("Unknown structure element: {0}")]
    UnknownStructElem(crate::structure::StructElemId),

    /// Namespace id does not belong to this tree
    #[error("Unknown namespace: {0}")]
    UnknownNamespace(usize),

    /// Page index out of range
    #[error("Page {index} does not exist (document has {count} pages)")]
    UnknownPage {
        /// Requested page index
        index: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// Font id not registered with the document
    #[error("Unknown font: {0}")]
    UnknownFont(usize),

    /// Close was requested with no open marked-content frame
    #[error("No open marked-content sequence on page {0}")]
    TagStackUnderflow(usize),

    /// Operation attempted on a document that has already been closed
    #[error("Document is already closed")]
    DocumentClosed,

    /// A PDF dictionary is malformed
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// Structure element cannot be attached where requested
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// XFA packet could not be read
    #[error("XFA error: {0}")]
    Xfa(String),

    /// Font program could not be parsed
    #[error("Font error: {0}")]
    Font(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The violation carried by this error, if it is a conformance failure.
    pub fn violation(&self) -> Option<&UaComplianceError> {
        match self {
            Error::Conformance(v) => Some(v),
            _ => None,
        }
    }
}

impl From<UaComplianceError> for Error {
    fn from(violation: UaComplianceError) -> Self {
        Error::Conformance(Box::new(violation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::{UaErrorCode, ViolationKind};

    #[test]
    fn test_unknown_page_error() {
        let err = Error::UnknownPage { index: 3, count: 1 };
        let msg = format!("{}", err);
        assert!(msg.contains("Page 3"));
        assert!(msg.contains("1 pages"));
    }

    #[test]
    fn test_conformance_error_wraps_violation() {
        let err: Error =
            UaComplianceError::new(UaErrorCode::FigureMissingAlt, "Figure without Alt").into();
        let violation = err.violation().expect("violation");
        assert_eq!(violation.kind(), ViolationKind::ContentAccessibility);
        assert!(format!("{}", err).contains("UA-FIG-001"));
    }

    #[test]
    fn test_non_conformance_has_no_violation() {
        assert!(Error::DocumentClosed.violation().is_none());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
