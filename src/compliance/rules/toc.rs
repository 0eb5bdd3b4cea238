//! Table of contents reference integrity (PDF/UA-2).

use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{UaComplianceError, UaErrorCode, UaValidationResult};
use crate::error::Result;
use crate::structure::{RoleCategory, StructChild, StructElemId};

/// Whether the subtree of `item` points anywhere else in the document.
///
/// An outgoing reference is a `Ref` entry, or an OBJR to a link annotation
/// whose target lies inside the document. Intermediate containers of any
/// role are searched.
pub fn has_outgoing_reference(ctx: &CheckContext<'_>, item: StructElemId) -> Result<bool> {
    let tree = ctx.tree();
    for id in tree.descendants(item) {
        let elem = tree.get(id)?;
        if !elem.props().refs.is_empty() {
            return Ok(true);
        }
        for child in elem.children() {
            let StructChild::Object(obj) = child else {
                continue;
            };
            let Some(placed) = ctx.annotation(*obj) else {
                continue;
            };
            if placed.annotation.is_link()
                && placed
                    .annotation
                    .target(&ctx.model.named_destinations)
                    .is_internal()
            {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Every `TOCI` must reference some part of the document.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    if !ctx.is_ua2() {
        return Ok(());
    }
    let resolver = ctx.resolver();
    for id in ctx.tree().walk() {
        if resolver.resolve_elem(id)?.category() != Some(RoleCategory::TocItem) {
            continue;
        }
        result.stats.toc_items_checked += 1;
        if !has_outgoing_reference(ctx, id)? {
            result.add_error(
                UaComplianceError::new(
                    UaErrorCode::TocItemWithoutReference,
                    format!("TOCI {} does not reference any part of the document", id),
                )
                .with_location(id.to_string())
                .with_wcag("2.4.5"),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{Annotation, LinkDestination, PlacedAnnotation};
    use crate::compliance::context::DocumentModel;
    use crate::compliance::PdfUaLevel;
    use crate::config::CheckerConfig;
    use crate::object::ObjectRef;

    fn run(model: &DocumentModel) -> UaValidationResult {
        let config = CheckerConfig::default().with_level(PdfUaLevel::Ua2);
        let mut result = UaValidationResult::new(config.level);
        check(&CheckContext::new(&config, model), &mut result).unwrap();
        result
    }

    #[test]
    fn test_ref_three_levels_deep() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let target = model.tree.add_elem(doc, "H1").unwrap();
        let toc = model.tree.add_elem(doc, "TOC").unwrap();
        let toci = model.tree.add_elem(toc, "TOCI").unwrap();
        assert!(run(&model).has_code(UaErrorCode::TocItemWithoutReference));

        let div = model.tree.add_elem(toci, "Div").unwrap();
        let span = model.tree.add_elem(div, "Span").unwrap();
        let reference = model.tree.add_elem(span, "Reference").unwrap();
        model.tree.add_ref(reference, target).unwrap();

        let result = run(&model);
        assert!(!result.has_errors());
        assert_eq!(result.stats.toc_items_checked, 1);
    }

    #[test]
    fn test_internal_link_counts() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let toc = model.tree.add_elem(doc, "TOC").unwrap();
        let toci = model.tree.add_elem(toc, "TOCI").unwrap();
        let link = model.tree.add_elem(toci, "Link").unwrap();
        let obj = ObjectRef::new(20, 0);
        model.tree.add_object_ref(link, obj).unwrap();
        model.annotations.insert(
            obj,
            PlacedAnnotation {
                obj,
                page: 0,
                annotation: Annotation::link(LinkDestination::page(2)),
                struct_parent: Some(link),
            },
        );
        assert!(!run(&model).has_errors());
    }

    #[test]
    fn test_not_enforced_under_ua1() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let toc = model.tree.add_elem(doc, "TOC").unwrap();
        model.tree.add_elem(toc, "TOCI").unwrap();

        let config = CheckerConfig::default();
        let mut result = UaValidationResult::new(config.level);
        check(&CheckContext::new(&config, &model), &mut result).unwrap();
        assert!(!result.has_errors());
    }
}
