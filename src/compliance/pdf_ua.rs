//! PDF/UA (Universal Accessibility) conformance vocabulary.
//!
//! This module defines the conformance levels, the violation taxonomy and the
//! result types shared by the rule modules and the [`super::UaChecker`].
//!
//! ## Standards Reference
//!
//! - ISO 14289-1:2014 (PDF/UA-1)
//! - ISO 14289-2:2024 (PDF/UA-2, based on PDF 2.0)
//!
//! ## Example
//!
//! ```
//! use pdfua_check::compliance::{UaComplianceError, UaErrorCode, ViolationKind};
//!
//! let error = UaComplianceError::new(UaErrorCode::FigureMissingAlt, "Figure without Alt")
//!     .with_location("StructElem #4");
//! assert_eq!(error.kind(), ViolationKind::ContentAccessibility);
//! assert!(error.to_string().starts_with("[UA-FIG-001]"));
//! ```

use super::types::ComplianceWarning;
use serde::{Deserialize, Serialize};
use std::fmt;

/// PDF/UA conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PdfUaLevel {
    /// PDF/UA-1 (ISO 14289-1:2014)
    #[default]
    Ua1,
    /// PDF/UA-2 (ISO 14289-2, based on PDF 2.0)
    Ua2,
}

impl fmt::Display for PdfUaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfUaLevel::Ua1 => write!(f, "PDF/UA-1"),
            PdfUaLevel::Ua2 => write!(f, "PDF/UA-2"),
        }
    }
}

/// Family a violation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Tree shape or a required child/attribute is wrong
    Structural,
    /// Two related pieces of data disagree
    Consistency,
    /// Emitted content lacks a required textual alternative
    ContentAccessibility,
    /// Required descriptive metadata is absent
    Metadata,
    /// Private Use Area code point in a human-readable string
    Encoding,
    /// Encryption permissions forbid accessible extraction
    SecurityPolicy,
    /// Role mapping cycle, excessive chain or standard role remapped
    GraphResolution,
    /// A feature the profile forbids is present
    UnsupportedFeature,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViolationKind::Structural => "StructuralViolation",
            ViolationKind::Consistency => "ConsistencyViolation",
            ViolationKind::ContentAccessibility => "ContentAccessibilityViolation",
            ViolationKind::Metadata => "MetadataViolation",
            ViolationKind::Encoding => "EncodingViolation",
            ViolationKind::SecurityPolicy => "SecurityPolicyViolation",
            ViolationKind::GraphResolution => "GraphResolutionError",
            ViolationKind::UnsupportedFeature => "UnsupportedFeatureViolation",
        };
        f.write_str(name)
    }
}

/// Result of PDF/UA validation.
#[derive(Debug, Clone, Serialize)]
pub struct UaValidationResult {
    /// Whether the document is compliant with the target level.
    pub is_compliant: bool,
    /// The level validated against.
    pub level: PdfUaLevel,
    /// Accessibility errors (violations).
    pub errors: Vec<UaComplianceError>,
    /// Accessibility warnings (non-fatal issues).
    pub warnings: Vec<ComplianceWarning>,
    /// Summary statistics.
    pub stats: UaValidationStats,
}

impl Default for UaValidationResult {
    fn default() -> Self {
        Self {
            is_compliant: true,
            level: PdfUaLevel::Ua1,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: UaValidationStats::default(),
        }
    }
}

impl UaValidationResult {
    /// Create a new validation result for a specific level.
    pub fn new(level: PdfUaLevel) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Add an error to the result.
    pub fn add_error(&mut self, error: UaComplianceError) {
        self.errors.push(error);
        self.is_compliant = false;
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: ComplianceWarning) {
        self.warnings.push(warning);
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if a violation with `code` was reported.
    pub fn has_code(&self, code: UaErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Check if a violation of `kind` was reported.
    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.errors.iter().any(|e| e.kind() == kind)
    }
}

/// PDF/UA validation statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UaValidationStats {
    /// Number of structure elements checked.
    pub structure_elements_checked: usize,
    /// Number of figures checked.
    pub figures_checked: usize,
    /// Number of lists checked.
    pub lists_checked: usize,
    /// Number of TOC items checked.
    pub toc_items_checked: usize,
    /// Number of annotations checked.
    pub annotations_checked: usize,
    /// Number of file specifications checked.
    pub file_specs_checked: usize,
    /// Number of human-readable strings checked.
    pub strings_checked: usize,
}

/// PDF/UA compliance error (accessibility violation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UaComplianceError {
    /// Error code.
    pub code: UaErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Location in the document (if applicable).
    pub location: Option<String>,
    /// WCAG reference (if applicable).
    pub wcag_ref: Option<String>,
    /// ISO 14289 clause reference.
    pub clause: Option<String>,
}

impl UaComplianceError {
    /// Create a new compliance error.
    pub fn new(code: UaErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
            wcag_ref: None,
            clause: None,
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the WCAG reference.
    pub fn with_wcag(mut self, wcag_ref: impl Into<String>) -> Self {
        self.wcag_ref = Some(wcag_ref.into());
        self
    }

    /// Set the ISO clause reference.
    pub fn with_clause(mut self, clause: impl Into<String>) -> Self {
        self.clause = Some(clause.into());
        self
    }

    /// The violation family.
    pub fn kind(&self) -> ViolationKind {
        self.code.kind()
    }
}

impl fmt::Display for UaComplianceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref loc) = self.location {
            write!(f, " (at {})", loc)?;
        }
        if let Some(ref wcag) = self.wcag_ref {
            write!(f, " [WCAG {}]", wcag)?;
        }
        Ok(())
    }
}

impl std::error::Error for UaComplianceError {}

/// Error codes for PDF/UA violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UaErrorCode {
    // Document-level errors
    /// Document has no structure tree
    NotTaggedPdf,
    /// Missing document language
    MissingLanguage,
    /// Missing document title
    MissingTitle,
    /// Document title not displayed in window title
    TitleNotDisplayed,

    // Structure errors
    /// Content not in structure tree and not an artifact
    ContentNotTagged,
    /// Role does not map to a standard structure type
    UnmappedRole,
    /// Role mapping chain is cyclic
    RoleMapCycle,
    /// Role mapping chain exceeds the hop budget
    RoleMapTooDeep,
    /// A standard role is remapped to another role
    StandardRoleRemapped,
    /// Marked content left open when the document closed
    UnclosedTag,
    /// Structure tag opened inside an artifact
    TagInsideArtifact,
    /// `Ref` names an element that does not exist
    DanglingReference,

    // Figure/Formula errors
    /// Figure missing alternative text
    FigureMissingAlt,
    /// Formula shows unmapped glyphs without ActualText
    FormulaMissingActualText,

    // List errors
    /// List numbering not specified
    ListNumberingMissing,
    /// List numbering value not recognised
    InvalidListNumbering,
    /// List item has content other than Lbl/LBody
    ListItemContentInvalid,
    /// List has a child other than LI, L or Caption
    ListChildInvalid,

    // Link errors
    /// Links tagged into one element have different destinations
    LinkDestinationMismatch,
    /// Link annotation not nested under Link or Reference
    LinkNotNested,

    // TOC errors
    /// TOCI subtree has no outgoing reference
    TocItemWithoutReference,

    // Annotation errors
    /// Annotation not tagged
    AnnotationNotTagged,
    /// Annotation missing contents
    AnnotationMissingContents,

    // Embedded file errors
    /// File specification lacks F/UF
    EmbeddedFileMissingName,
    /// File specification lacks Desc
    EmbeddedFileMissingDescription,

    // Text errors
    /// String contains Private Use Area characters
    PrivateUseCharacter,

    // Security errors
    /// Encryption forbids extraction for accessibility
    AccessibilityExtractionDenied,

    // Forms
    /// Dynamic XFA form present
    DynamicXfaForm,
}

impl UaErrorCode {
    /// The violation family of this code.
    pub fn kind(&self) -> ViolationKind {
        use UaErrorCode::*;
        match self {
            NotTaggedPdf | ContentNotTagged | UnmappedRole | UnclosedTag | TagInsideArtifact
            | DanglingReference | ListNumberingMissing | InvalidListNumbering
            | ListItemContentInvalid | ListChildInvalid | LinkNotNested
            | TocItemWithoutReference | AnnotationNotTagged => ViolationKind::Structural,
            LinkDestinationMismatch => ViolationKind::Consistency,
            FigureMissingAlt | FormulaMissingActualText => ViolationKind::ContentAccessibility,
            MissingLanguage | MissingTitle | TitleNotDisplayed | AnnotationMissingContents
            | EmbeddedFileMissingName | EmbeddedFileMissingDescription => ViolationKind::Metadata,
            PrivateUseCharacter => ViolationKind::Encoding,
            AccessibilityExtractionDenied => ViolationKind::SecurityPolicy,
            RoleMapCycle | RoleMapTooDeep | StandardRoleRemapped => ViolationKind::GraphResolution,
            DynamicXfaForm => ViolationKind::UnsupportedFeature,
        }
    }
}

impl fmt::Display for UaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            // Document-level
            UaErrorCode::NotTaggedPdf => "UA-DOC-001",
            UaErrorCode::MissingLanguage => "UA-DOC-002",
            UaErrorCode::MissingTitle => "UA-DOC-003",
            UaErrorCode::TitleNotDisplayed => "UA-DOC-004",

            // Structure
            UaErrorCode::ContentNotTagged => "UA-STRUCT-001",
            UaErrorCode::UnmappedRole => "UA-STRUCT-002",
            UaErrorCode::RoleMapCycle => "UA-STRUCT-003",
            UaErrorCode::RoleMapTooDeep => "UA-STRUCT-004",
            UaErrorCode::StandardRoleRemapped => "UA-STRUCT-005",
            UaErrorCode::UnclosedTag => "UA-STRUCT-006",
            UaErrorCode::TagInsideArtifact => "UA-STRUCT-007",
            UaErrorCode::DanglingReference => "UA-STRUCT-008",

            // Figure/Formula
            UaErrorCode::FigureMissingAlt => "UA-FIG-001",
            UaErrorCode::FormulaMissingActualText => "UA-FIG-002",

            // List
            UaErrorCode::ListNumberingMissing => "UA-LIST-001",
            UaErrorCode::InvalidListNumbering => "UA-LIST-002",
            UaErrorCode::ListItemContentInvalid => "UA-LIST-003",
            UaErrorCode::ListChildInvalid => "UA-LIST-004",

            // Link
            UaErrorCode::LinkDestinationMismatch => "UA-LINK-001",
            UaErrorCode::LinkNotNested => "UA-LINK-002",

            // TOC
            UaErrorCode::TocItemWithoutReference => "UA-TOC-001",

            // Annotation
            UaErrorCode::AnnotationNotTagged => "UA-ANNOT-001",
            UaErrorCode::AnnotationMissingContents => "UA-ANNOT-002",

            // Embedded files
            UaErrorCode::EmbeddedFileMissingName => "UA-FILE-001",
            UaErrorCode::EmbeddedFileMissingDescription => "UA-FILE-002",

            // Text
            UaErrorCode::PrivateUseCharacter => "UA-TEXT-001",

            // Security
            UaErrorCode::AccessibilityExtractionDenied => "UA-SEC-001",

            // Forms
            UaErrorCode::DynamicXfaForm => "UA-FORM-001",
        };
        write!(f, "{}", code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::types::WarningCode;

    #[test]
    fn test_pdf_ua_level_display() {
        assert_eq!(format!("{}", PdfUaLevel::Ua1), "PDF/UA-1");
        assert_eq!(format!("{}", PdfUaLevel::Ua2), "PDF/UA-2");
    }

    #[test]
    fn test_validation_result() {
        let mut result = UaValidationResult::new(PdfUaLevel::Ua2);
        assert!(result.is_compliant);
        assert!(!result.has_errors());

        result.add_error(UaComplianceError::new(UaErrorCode::NotTaggedPdf, "Not tagged"));
        assert!(result.has_errors());
        assert!(!result.is_compliant);
        assert!(result.has_code(UaErrorCode::NotTaggedPdf));
        assert!(result.has_kind(ViolationKind::Structural));

        result.add_warning(ComplianceWarning::new(WarningCode::LossyTextEncoding, "dropped"));
        assert!(result.has_warnings());
    }

    #[test]
    fn test_compliance_error_display() {
        let error = UaComplianceError::new(UaErrorCode::FigureMissingAlt, "Image without alt text")
            .with_location("Page 1")
            .with_wcag("1.1.1");
        let display = format!("{}", error);
        assert!(display.contains("[UA-FIG-001]"));
        assert!(display.contains("Page 1"));
        assert!(display.contains("WCAG 1.1.1"));
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", UaErrorCode::NotTaggedPdf), "UA-DOC-001");
        assert_eq!(format!("{}", UaErrorCode::RoleMapCycle), "UA-STRUCT-003");
        assert_eq!(format!("{}", UaErrorCode::TocItemWithoutReference), "UA-TOC-001");
    }

    #[test]
    fn test_error_code_kinds() {
        assert_eq!(UaErrorCode::RoleMapCycle.kind(), ViolationKind::GraphResolution);
        assert_eq!(UaErrorCode::StandardRoleRemapped.kind(), ViolationKind::GraphResolution);
        assert_eq!(UaErrorCode::UnmappedRole.kind(), ViolationKind::Structural);
        assert_eq!(UaErrorCode::LinkDestinationMismatch.kind(), ViolationKind::Consistency);
        assert_eq!(UaErrorCode::PrivateUseCharacter.kind(), ViolationKind::Encoding);
        assert_eq!(
            UaErrorCode::AccessibilityExtractionDenied.kind(),
            ViolationKind::SecurityPolicy
        );
        assert_eq!(UaErrorCode::DynamicXfaForm.kind(), ViolationKind::UnsupportedFeature);
        assert_eq!(UaErrorCode::EmbeddedFileMissingName.kind(), ViolationKind::Metadata);
    }

    #[test]
    fn test_violation_kind_display() {
        assert_eq!(ViolationKind::GraphResolution.to_string(), "GraphResolutionError");
        assert_eq!(ViolationKind::Structural.to_string(), "StructuralViolation");
    }
}
