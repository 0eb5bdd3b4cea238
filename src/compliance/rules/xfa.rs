//! Dynamic XFA forms are not allowed.

use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{UaComplianceError, UaErrorCode, UaValidationResult};
use crate::error::Result;

/// A dynamic XFA form leaves nothing tagged to read.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    if let Some(form) = &ctx.model.xfa {
        if form.is_dynamic() {
            result.add_error(
                UaComplianceError::new(
                    UaErrorCode::DynamicXfaForm,
                    "Document contains a dynamic XFA form",
                )
                .with_location("AcroForm /XFA")
                .with_clause("7.15"),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::context::DocumentModel;
    use crate::compliance::ViolationKind;
    use crate::config::CheckerConfig;
    use crate::xfa::XfaForm;

    #[test]
    fn test_dynamic_form_rejected() {
        let config = CheckerConfig::default();
        let mut model = DocumentModel::default();
        model.xfa = Some(XfaForm::default());

        let mut result = UaValidationResult::new(config.level);
        check(&CheckContext::new(&config, &model), &mut result).unwrap();
        assert!(!result.has_errors());

        model.xfa = Some(XfaForm::default().with_needs_rendering(true));
        let mut result = UaValidationResult::new(config.level);
        check(&CheckContext::new(&config, &model), &mut result).unwrap();
        assert!(result.has_kind(ViolationKind::UnsupportedFeature));
    }
}
