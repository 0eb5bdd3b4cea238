//! Role resolution and standard-role protection.

use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{UaComplianceError, UaErrorCode, UaValidationResult};
use crate::compliance::types::{ComplianceWarning, WarningCode};
use crate::error::Result;
use crate::structure::{RemappedRole, Resolution, StructElemId, Unresolved};

/// Violation for an element whose role does not terminate.
///
/// A cycle and an exhausted hop budget are graph errors; a plain missing
/// mapping is structural.
pub fn unresolved_violation(reason: &Unresolved, elem: StructElemId) -> UaComplianceError {
    let code = match reason {
        Unresolved::Unmapped { .. } => UaErrorCode::UnmappedRole,
        Unresolved::Cycle { .. } => UaErrorCode::RoleMapCycle,
        Unresolved::TooDeep { .. } => UaErrorCode::RoleMapTooDeep,
    };
    UaComplianceError::new(code, format!("{}: {}", elem, reason))
        .with_location(elem.to_string())
        .with_clause("7.1")
        .with_wcag("1.3.1")
}

fn remap_message(remap: &RemappedRole) -> String {
    match (&remap.namespace, &remap.target_namespace) {
        (Some(uri), Some(target_uri)) if uri != target_uri => format!(
            "Standard role '{}' is remapped to '{}' of {} in namespace {}",
            remap.role, remap.target, target_uri, uri
        ),
        (Some(uri), _) => format!(
            "Standard role '{}' is remapped to '{}' in namespace {}",
            remap.role, remap.target, uri
        ),
        (None, _) => format!(
            "Standard role '{}' is remapped to '{}' in the RoleMap",
            remap.role, remap.target
        ),
    }
}

/// Every reachable element must resolve, and no standard role may be
/// remapped whether or not anything uses it.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    let resolver = ctx.resolver();

    for id in ctx.tree().walk() {
        result.stats.structure_elements_checked += 1;
        if let Resolution::Unresolvable(reason) = resolver.resolve_elem(id)? {
            result.add_error(unresolved_violation(&reason, id));
        }
    }

    let permitted = &ctx.config.permitted_standard_remaps;
    for remap in resolver.remapped_standard_roles(&[]) {
        if permitted.contains(&remap.role) {
            log::debug!("Tolerating remap of standard role '{}'", remap.role);
            result.add_warning(
                ComplianceWarning::new(WarningCode::PermittedRemap, remap_message(&remap))
                    .with_location("RoleMap"),
            );
        } else {
            log::error!("{}", remap_message(&remap));
            result.add_error(
                UaComplianceError::new(UaErrorCode::StandardRoleRemapped, remap_message(&remap))
                    .with_location("RoleMap")
                    .with_clause("7.1"),
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

    fn run(model: &DocumentModel, config: &CheckerConfig) -> UaValidationResult {
        let mut result = UaValidationResult::new(config.level);
        check(&CheckContext::new(config, model), &mut result).unwrap();
        result
    }

    #[test]
    fn test_unused_standard_remap_fails() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        model.tree.add_elem(doc, "P").unwrap();
        model.tree.add_role_mapping("Span", "Sect");

        let result = run(&model, &CheckerConfig::default());
        assert!(result.has_code(UaErrorCode::StandardRoleRemapped));
        assert!(result.has_kind(ViolationKind::GraphResolution));
        assert_eq!(result.stats.structure_elements_checked, 2);
    }

    #[test]
    fn test_permitted_remap_is_a_warning() {
        let mut model = DocumentModel::default();
        model.tree.add_root("Document");
        model.tree.add_role_mapping("Span", "Sect");

        let config = CheckerConfig::default().permit_standard_remap("Span");
        let result = run(&model, &config);
        assert!(!result.has_errors());
        assert_eq!(result.warnings[0].code, WarningCode::PermittedRemap);
    }

    #[test]
    fn test_cycle_reported_as_graph_error() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        model.tree.add_elem(doc, "chapter").unwrap();
        model.tree.add_role_mapping("chapter", "chapterChild");
        model.tree.add_role_mapping("chapterChild", "chapter");

        let result = run(&model, &CheckerConfig::default());
        assert!(result.has_code(UaErrorCode::RoleMapCycle));
        assert!(!result.has_code(UaErrorCode::UnmappedRole));
    }

    #[test]
    fn test_unmapped_role_is_structural() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let custom = model.tree.add_elem(doc, "Fancy").unwrap();

        let result = run(&model, &CheckerConfig::default());
        assert!(result.has_code(UaErrorCode::UnmappedRole));
        assert_eq!(result.errors[0].location, Some(custom.to_string()));
    }
}
