//! Document-level requirements: tagging, language and title.

use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{UaComplianceError, UaErrorCode, UaValidationResult};
use crate::compliance::types::{ComplianceWarning, WarningCode};
use crate::error::Result;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Rough BCP 47 shape: primary subtag, then alphanumeric subtags
    static ref RE_LANGUAGE_TAG: Regex =
        Regex::new(r"^(?:[A-Za-z]{2,8}|[xXiI])(?:-[A-Za-z0-9]{1,8})*$").unwrap();
}

/// Check if a language tag looks like BCP 47.
pub fn is_valid_language_tag(tag: &str) -> bool {
    RE_LANGUAGE_TAG.is_match(tag)
}

/// The document must be marked as tagged and have a structure tree.
pub fn check_tagged(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    if !ctx.model.catalog.marked {
        result.add_error(
            UaComplianceError::new(
                UaErrorCode::NotTaggedPdf,
                "Document must be a Tagged PDF (MarkInfo/Marked = true)",
            )
            .with_clause("7.1")
            .with_wcag("1.3.1"),
        );
    }
    if ctx.tree().roots().is_empty() {
        result.add_error(
            UaComplianceError::new(
                UaErrorCode::NotTaggedPdf,
                "Document must have a structure tree (StructTreeRoot)",
            )
            .with_clause("7.1")
            .with_wcag("1.3.1"),
        );
    }
    Ok(())
}

/// Language, title and title display.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    let catalog = &ctx.model.catalog;

    match &catalog.lang {
        Some(lang) if !lang.is_empty() => {
            if !is_valid_language_tag(lang.value()) {
                result.add_warning(
                    ComplianceWarning::new(
                        WarningCode::MalformedLanguageTag,
                        format!("Language tag '{}' may not be a valid BCP 47 tag", lang.value()),
                    )
                    .with_location("Catalog /Lang"),
                );
            }
        },
        _ => {
            result.add_error(
                UaComplianceError::new(
                    UaErrorCode::MissingLanguage,
                    "Document must specify a primary language (/Lang in catalog)",
                )
                .with_clause("7.2")
                .with_wcag("3.1.1"),
            );
        },
    }

    if !catalog.title.as_ref().is_some_and(|t| !t.is_empty()) {
        result.add_error(
            UaComplianceError::new(UaErrorCode::MissingTitle, "Document must have a title")
                .with_clause("7.1")
                .with_wcag("2.4.2"),
        );
    }
    if !catalog.display_doc_title {
        result.add_error(
            UaComplianceError::new(
                UaErrorCode::TitleNotDisplayed,
                "ViewerPreferences/DisplayDocTitle must be true",
            )
            .with_clause("7.1")
            .with_wcag("2.4.2"),
        );
    }
    Ok(())
}
