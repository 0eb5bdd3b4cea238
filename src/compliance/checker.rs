//! Conformance orchestration.
//!
//! [`UaChecker`] owns the active profile and validation mode and decides
//! which rules run at each trigger:
//!
//! - **Incremental** triggers run before an operation is committed (adding
//!   an annotation, staging a layout element) and always fail on the first
//!   violation, so a rejected operation leaves no trace.
//! - **Finalization** runs the full rule set once the document is complete.
//!   In fail-fast mode the first violation becomes an error; in collect-all
//!   mode every violation is reported in a [`UaValidationResult`].

use super::context::{CheckContext, DocumentModel};
use super::pdf_ua::{PdfUaLevel, UaValidationResult};
use super::rules::{self, annotations, figures, links, lists, roles, strings};
use crate::annotations::PlacedAnnotation;
use crate::config::{CheckerConfig, ValidationMode};
use crate::error::{Error, Result};
use crate::structure::{Resolution, StructElemId};

/// PDF/UA conformance checker.
#[derive(Debug, Clone, Default)]
pub struct UaChecker {
    config: CheckerConfig,
}

impl UaChecker {
    /// Create a checker with the given configuration.
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// The conformance level.
    pub fn level(&self) -> PdfUaLevel {
        self.config.level
    }

    /// Run every finalization rule and report all violations, regardless of
    /// the configured mode.
    pub fn validate(&self, model: &DocumentModel) -> Result<UaValidationResult> {
        self.run_rules(model, false)
    }

    /// Run the finalization trigger.
    ///
    /// In fail-fast mode the first violation is returned as
    /// [`Error::Conformance`]; in collect-all mode the full result is
    /// returned and the caller inspects it.
    pub fn finalize(&self, model: &DocumentModel) -> Result<UaValidationResult> {
        match self.config.mode {
            ValidationMode::CollectAll => self.run_rules(model, false),
            ValidationMode::FailFast => {
                let result = self.run_rules(model, true)?;
                enforce(result)
            },
        }
    }

    fn run_rules(&self, model: &DocumentModel, stop_on_first: bool) -> Result<UaValidationResult> {
        let ctx = CheckContext::new(&self.config, model);
        let mut result = UaValidationResult::new(self.config.level);

        for (name, rule) in rules::FINALIZATION_RULES {
            log::debug!("Running rule '{}' for {}", name, self.config.level);
            rule(&ctx, &mut result)?;
            if stop_on_first && result.has_errors() {
                break;
            }
        }

        result.is_compliant = result.errors.is_empty();
        if result.is_compliant {
            log::debug!(
                "Document conforms to {} ({} warnings)",
                self.config.level,
                result.warnings.len()
            );
        } else {
            log::warn!(
                "Document violates {}: {} errors, {} warnings",
                self.config.level,
                result.errors.len(),
                result.warnings.len()
            );
        }
        Ok(result)
    }

    /// Incremental trigger for an annotation about to be added.
    pub fn check_annotation(
        &self,
        model: &DocumentModel,
        candidate: &PlacedAnnotation,
    ) -> Result<()> {
        let ctx = CheckContext::new(&self.config, model);
        let mut result = UaValidationResult::new(self.config.level);

        annotations::check_annotation(candidate, &mut result);
        links::check_candidate(&ctx, candidate, &mut result)?;
        let annotation = &candidate.annotation;
        if let Some(contents) = &annotation.contents {
            strings::check_string("Annotation /Contents", contents, &mut result);
        }
        if let Some(subject) = &annotation.subject {
            strings::check_string("Annotation /Subj", subject, &mut result);
        }

        enforce(result).map(|_| ())
    }

    /// Incremental trigger for a staged subtree (layout element add).
    ///
    /// Every staged element must resolve, and the list and figure rules run
    /// on the subtree.
    pub fn check_staged(&self, model: &DocumentModel, root: StructElemId) -> Result<()> {
        let ctx = CheckContext::new(&self.config, model);
        let resolver = ctx.resolver();
        let mut result = UaValidationResult::new(self.config.level);

        for id in model.tree.descendants(root) {
            if let Resolution::Unresolvable(reason) = resolver.resolve_elem(id)? {
                result.add_error(roles::unresolved_violation(&reason, id));
                break;
            }
            lists::check_node(&resolver, self.config.level, id, &mut result)?;
            // A caption for the staged root may still be added to its
            // container, so that figure waits for finalization.
            if id != root || !figures::container_has_alt(&resolver, id) {
                figures::check_node(&resolver, self.config.level, id, &mut result)?;
            }
            if result.has_errors() {
                break;
            }
        }

        enforce(result).map(|_| ())
    }
}

/// Turn the first violation of `result` into an error.
fn enforce(mut result: UaValidationResult) -> Result<UaValidationResult> {
    if result.errors.is_empty() {
        return Ok(result);
    }
    let first = result.errors.swap_remove(0);
    log::error!("{}", first);
    Err(Error::Conformance(Box::new(first)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::context::CatalogInfo;
    use crate::compliance::{UaErrorCode, ViolationKind};

    fn conforming_model() -> DocumentModel {
        let mut model = DocumentModel {
            catalog: CatalogInfo {
                marked: true,
                lang: Some("en".into()),
                title: Some("Title".into()),
                display_doc_title: true,
            },
            ..Default::default()
        };
        let doc = model.tree.add_root("Document");
        model.tree.add_elem(doc, "P").unwrap();
        model
    }

    #[test]
    fn test_conforming_document() {
        let checker = UaChecker::default();
        let result = checker.finalize(&conforming_model()).unwrap();
        assert!(result.is_compliant);
        assert_eq!(result.stats.structure_elements_checked, 2);
    }

    #[test]
    fn test_fail_fast_returns_first_violation() {
        let mut model = conforming_model();
        model.catalog.lang = None;
        model.tree.add_role_mapping("Span", "Sect");

        let err = UaChecker::default().finalize(&model).unwrap_err();
        let violation = err.violation().unwrap();
        assert_eq!(violation.code, UaErrorCode::MissingLanguage);
    }

    #[test]
    fn test_collect_all_reports_everything() {
        let mut model = conforming_model();
        model.catalog.lang = None;
        model.tree.add_role_mapping("Span", "Sect");

        let checker =
            UaChecker::new(CheckerConfig::default().with_mode(ValidationMode::CollectAll));
        let result = checker.finalize(&model).unwrap();
        assert!(!result.is_compliant);
        assert!(result.has_code(UaErrorCode::MissingLanguage));
        assert!(result.has_kind(ViolationKind::GraphResolution));
    }

    #[test]
    fn test_staged_unresolved_role() {
        let mut model = conforming_model();
        let root = model.tree.roots()[0];
        let staged = model.tree.add_elem(root, "Mystery").unwrap();

        let err = UaChecker::default().check_staged(&model, staged).unwrap_err();
        assert_eq!(err.violation().unwrap().code, UaErrorCode::UnmappedRole);
    }
}
