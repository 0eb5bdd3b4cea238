//! Encryption permission policy.

use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{UaComplianceError, UaErrorCode, UaValidationResult};
use crate::error::Result;

/// With the standard security handler, extraction for accessibility must be
/// permitted.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    let Some(encryption) = &ctx.model.encryption else {
        return Ok(());
    };
    if encryption.is_standard() && !encryption.allows_accessibility() {
        result.add_error(
            UaComplianceError::new(
                UaErrorCode::AccessibilityExtractionDenied,
                format!(
                    "Standard encryption (R{}) does not permit extraction for accessibility",
                    encryption.revision
                ),
            )
            .with_location("Encrypt /P")
            .with_clause("7.16"),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::context::DocumentModel;
    use crate::compliance::ViolationKind;
    use crate::config::CheckerConfig;
    use crate::encryption::{EncryptionInfo, Permissions};

    fn run(model: &DocumentModel) -> UaValidationResult {
        let config = CheckerConfig::default();
        let mut result = UaValidationResult::new(config.level);
        check(&CheckContext::new(&config, model), &mut result).unwrap();
        result
    }

    #[test]
    fn test_accessibility_bit() {
        let mut model = DocumentModel::default();
        model.encryption = Some(EncryptionInfo::standard(
            4,
            Permissions::allow_all() - Permissions::EXTRACT_ACCESSIBILITY,
        ));
        assert!(run(&model).has_kind(ViolationKind::SecurityPolicy));

        model.encryption = Some(EncryptionInfo::standard(4, Permissions::allow_all()));
        assert!(!run(&model).has_errors());
    }

    #[test]
    fn test_other_handlers_ignored() {
        let mut model = DocumentModel::default();
        let mut info = EncryptionInfo::standard(4, Permissions::empty());
        info.filter = "Adobe.PubSec".to_string();
        model.encryption = Some(info);
        assert!(!run(&model).has_errors());
    }
}
