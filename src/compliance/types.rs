//! Common types for compliance reporting.

use serde::Serialize;
use std::fmt;

/// A compliance warning (non-fatal issue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceWarning {
    /// Warning code.
    pub code: WarningCode,
    /// Human-readable message.
    pub message: String,
    /// Location in the document (if applicable).
    pub location: Option<String>,
}

impl ComplianceWarning {
    /// Create a new compliance warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ComplianceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref loc) = self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

/// Warning codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WarningCode {
    /// Characters were omitted because the text encoding cannot represent them
    LossyTextEncoding,
    /// A standard role remapping was tolerated by configuration
    PermittedRemap,
    /// The language tag does not look like BCP 47
    MalformedLanguageTag,
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            WarningCode::LossyTextEncoding => "WARN-001",
            WarningCode::PermittedRemap => "WARN-002",
            WarningCode::MalformedLanguageTag => "WARN-003",
        };
        write!(f, "{}", code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let warning = ComplianceWarning::new(WarningCode::LossyTextEncoding, "omitted U+4E2D")
            .with_location("Catalog /Lang");
        let display = warning.to_string();
        assert!(display.starts_with("[WARN-001]"));
        assert!(display.ends_with("(at Catalog /Lang)"));
    }
}
