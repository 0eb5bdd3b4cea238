//! PDF/UA conformance checking.
//!
//! This module decides whether a tagged document satisfies PDF/UA-1 or
//! PDF/UA-2. It is organised in three layers:
//!
//! - vocabulary: levels, the violation taxonomy ([`ViolationKind`]), error
//!   codes ([`UaErrorCode`]) and validation results
//! - [`rules`]: independent rule modules over a read-only [`CheckContext`]
//! - [`UaChecker`]: the orchestrator that runs incremental and finalization
//!   triggers in fail-fast or collect-all mode
//!
//! ## PDF/UA Requirements (Accessibility)
//!
//! - Document must be a Tagged PDF with a language and a displayed title
//! - All content must be part of the structure tree or an artifact
//! - Every role must resolve to a standard structure type
//! - Images must have alternative text, formulas replacement text
//! - Lists, links and tables of contents must be well formed
//! - Human-readable strings must not use Private Use Area characters
//!
//! ## Example
//!
//! ```
//! use pdfua_check::compliance::{DocumentModel, PdfUaLevel, UaChecker, UaErrorCode};
//! use pdfua_check::config::{CheckerConfig, ValidationMode};
//!
//! let mut model = DocumentModel::default();
//! let doc = model.tree.add_root("Document");
//! model.tree.add_elem(doc, "L").unwrap();
//!
//! let checker = UaChecker::new(
//!     CheckerConfig::new()
//!         .with_level(PdfUaLevel::Ua2)
//!         .with_mode(ValidationMode::CollectAll),
//! );
//! let result = checker.finalize(&model).unwrap();
//! assert!(result.has_code(UaErrorCode::ListNumberingMissing));
//! ```
//!
//! ## Standards Reference
//!
//! - ISO 14289-1:2014 (PDF/UA-1)
//! - ISO 14289-2:2024 (PDF/UA-2)

mod checker;
mod context;
pub mod cross_check;
mod pdf_ua;
pub mod rules;
mod types;

pub use checker::UaChecker;
pub use context::{CatalogInfo, CheckContext, DocumentModel};
pub use cross_check::{cross_check, CrossCheck, ExternalVerdict, ExternalVerifier};
pub use pdf_ua::{
    PdfUaLevel, UaComplianceError, UaErrorCode, UaValidationResult, UaValidationStats,
    ViolationKind,
};
pub use types::{ComplianceWarning, WarningCode};
