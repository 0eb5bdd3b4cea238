//! Configuration for conformance checking.

use crate::compliance::PdfUaLevel;
use crate::error::{Error, Result};
use crate::structure::{ListNumbering, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

/// How violations are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValidationMode {
    /// Stop at the first violation and return it as an error
    #[default]
    FailFast,
    /// Run every rule and report all violations
    CollectAll,
}

/// Conformance checking configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Conformance level (fixed for the lifetime of a document).
    pub level: PdfUaLevel,

    /// Fail fast or collect all violations.
    pub mode: ValidationMode,

    /// Maximum number of role-map edges followed for one role.
    pub max_role_map_depth: usize,

    /// Standard roles whose remapping is tolerated (reported as warnings).
    pub permitted_standard_remaps: Vec<String>,

    /// Numbering appended to lists added through layout elements that
    /// define none.
    pub auto_list_numbering: Option<ListNumbering>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckerConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            level: PdfUaLevel::Ua1,
            mode: ValidationMode::FailFast,
            max_role_map_depth: DEFAULT_MAX_DEPTH,
            permitted_standard_remaps: Vec::new(),
            auto_list_numbering: None,
        }
    }

    /// Load configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        if config.max_role_map_depth == 0 {
            return Err(Error::InvalidConfig(
                "max_role_map_depth must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Set the conformance level.
    pub fn with_level(mut self, level: PdfUaLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the validation mode.
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the role-map hop budget.
    pub fn with_max_role_map_depth(mut self, depth: usize) -> Self {
        self.max_role_map_depth = depth.max(1);
        self
    }

    /// Tolerate remapping of a standard role.
    pub fn permit_standard_remap(mut self, role: impl Into<String>) -> Self {
        self.permitted_standard_remaps.push(role.into());
        self
    }

    /// Set the automatic list numbering.
    pub fn with_auto_list_numbering(mut self, numbering: Option<ListNumbering>) -> Self {
        self.auto_list_numbering = numbering;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckerConfig::default();
        assert_eq!(config.level, PdfUaLevel::Ua1);
        assert_eq!(config.mode, ValidationMode::FailFast);
        assert_eq!(config.max_role_map_depth, 32);
        assert!(config.auto_list_numbering.is_none());
    }

    #[test]
    fn test_builder() {
        let config = CheckerConfig::new()
            .with_level(PdfUaLevel::Ua2)
            .with_mode(ValidationMode::CollectAll)
            .with_max_role_map_depth(0)
            .permit_standard_remap("Span")
            .with_auto_list_numbering(Some(ListNumbering::Disc));
        assert_eq!(config.level, PdfUaLevel::Ua2);
        assert_eq!(config.max_role_map_depth, 1);
        assert_eq!(config.permitted_standard_remaps, vec!["Span"]);
    }

    #[test]
    fn test_from_json_partial() {
        let config = CheckerConfig::from_json(r#"{"level": "Ua2", "mode": "CollectAll"}"#).unwrap();
        assert_eq!(config.level, PdfUaLevel::Ua2);
        assert_eq!(config.mode, ValidationMode::CollectAll);
        assert_eq!(config.max_role_map_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(CheckerConfig::from_json("{"), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            CheckerConfig::from_json(r#"{"max_role_map_depth": 0}"#),
            Err(Error::InvalidConfig(_))
        ));
    }
}
