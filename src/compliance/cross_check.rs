//! Cross-validation against an external verifier.
//!
//! A test harness can run the checker and an independent verifier on the
//! same document and compare the verdicts. The verifier itself lives outside
//! this crate; it only has to implement [`ExternalVerifier`].

use super::checker::UaChecker;
use super::context::DocumentModel;
use super::pdf_ua::PdfUaLevel;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Verdict of an external verifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalVerdict {
    /// Whether the verifier considers the document conforming
    pub compliant: bool,
    /// Identifiers of the rules the verifier reports as failed
    pub failed_rules: Vec<String>,
}

/// An independent conformance verifier.
pub trait ExternalVerifier {
    /// Name used in reports.
    fn name(&self) -> &str;

    /// Judge `model` against `level`.
    fn verify(&self, model: &DocumentModel, level: PdfUaLevel) -> Result<ExternalVerdict>;
}

/// Side-by-side verdicts for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossCheck {
    /// Level both sides judged against
    pub level: PdfUaLevel,
    /// Checker verdict
    pub checker_compliant: bool,
    /// Error codes reported by the checker
    pub checker_codes: Vec<String>,
    /// Verifier name
    pub verifier: String,
    /// Verifier verdict
    pub verifier_verdict: ExternalVerdict,
}

impl CrossCheck {
    /// Check if both sides reached the same verdict.
    pub fn agrees(&self) -> bool {
        self.checker_compliant == self.verifier_verdict.compliant
    }

    /// Serialize the report as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the checker in collect-all fashion and `verifier` on the same model.
pub fn cross_check(
    checker: &UaChecker,
    model: &DocumentModel,
    verifier: &dyn ExternalVerifier,
) -> Result<CrossCheck> {
    let result = checker.validate(model)?;
    let verdict = verifier.verify(model, checker.level())?;

    let report = CrossCheck {
        level: checker.level(),
        checker_compliant: result.is_compliant,
        checker_codes: result.errors.iter().map(|e| e.code.to_string()).collect(),
        verifier: verifier.name().to_string(),
        verifier_verdict: verdict,
    };
    if !report.agrees() {
        log::warn!(
            "Checker and {} disagree on {}: checker {:?}, verifier {:?}",
            report.verifier,
            report.level,
            report.checker_codes,
            report.verifier_verdict.failed_rules
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct AlwaysPasses;

    impl ExternalVerifier for AlwaysPasses {
        fn name(&self) -> &str {
            "always-passes"
        }

        fn verify(&self, _model: &DocumentModel, _level: PdfUaLevel) -> Result<ExternalVerdict> {
            Ok(ExternalVerdict {
                compliant: true,
                failed_rules: Vec::new(),
            })
        }
    }

    #[test]
    fn test_disagreement_reported() {
        // An empty model is not even tagged
        let report =
            cross_check(&UaChecker::default(), &DocumentModel::default(), &AlwaysPasses).unwrap();
        assert!(!report.agrees());
        assert!(report.checker_codes.contains(&"UA-DOC-001".to_string()));

        let json = report.to_json().unwrap();
        assert!(json.contains("always-passes"));
    }
}
