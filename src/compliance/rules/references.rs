//! `Ref` pointer integrity.

use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{UaComplianceError, UaErrorCode, UaValidationResult};
use crate::error::Result;
use std::collections::HashSet;

/// Every `Ref` must name an element that is part of the document.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    let tree = ctx.tree();
    let reachable: HashSet<_> = tree.walk().collect();

    for id in tree.walk() {
        for target in &tree.get(id)?.props().refs {
            if !reachable.contains(target) {
                result.add_error(
                    UaComplianceError::new(
                        UaErrorCode::DanglingReference,
                        format!("{} refers to {}, which is not in the structure tree", id, target),
                    )
                    .with_location(id.to_string())
                    .with_clause("7.1"),
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::context::DocumentModel;
    use crate::config::CheckerConfig;

    #[test]
    fn test_ref_to_removed_element() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let note = model.tree.add_elem(doc, "Note").unwrap();
        let p = model.tree.add_elem(doc, "P").unwrap();
        model.tree.add_ref(p, note).unwrap();

        let config = CheckerConfig::default();
        let mut result = UaValidationResult::new(config.level);
        check(&CheckContext::new(&config, &model), &mut result).unwrap();
        assert!(!result.has_errors());

        model.tree.remove(note).unwrap();
        let mut result = UaValidationResult::new(config.level);
        check(&CheckContext::new(&config, &model), &mut result).unwrap();
        assert!(result.has_code(UaErrorCode::DanglingReference));
    }
}
