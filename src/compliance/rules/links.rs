//! Link nesting and destination consistency (PDF/UA-2).
//!
//! Assistive technology presents one structure element as one link, so all
//! link annotations tagged into the same element must lead to the same
//! place. Destinations are compared by resolved value: a named destination
//! and the explicit destination it stands for are equal.

use crate::annotations::{LinkTarget, PlacedAnnotation};
use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{UaComplianceError, UaErrorCode, UaValidationResult};
use crate::error::Result;
use crate::structure::{RoleCategory, StructElemId};
use indexmap::IndexMap;

fn mismatch(elem: StructElemId, first: &LinkTarget, other: &LinkTarget) -> UaComplianceError {
    UaComplianceError::new(
        UaErrorCode::LinkDestinationMismatch,
        format!(
            "Links tagged into {} lead to different destinations ({:?} and {:?})",
            elem, first, other
        ),
    )
    .with_location(elem.to_string())
    .with_wcag("2.4.4")
}

/// The link annotation must be tagged under a `Link` or `Reference` element.
fn check_nesting(
    ctx: &CheckContext<'_>,
    placed: &PlacedAnnotation,
    result: &mut UaValidationResult,
) -> Result<()> {
    let Some(parent) = placed.struct_parent else {
        // Untagged annotations are the annotation rule's concern
        return Ok(());
    };
    let category = ctx.resolver().resolve_elem(parent)?.category();
    if !matches!(
        category,
        Some(RoleCategory::Link) | Some(RoleCategory::Reference)
    ) {
        result.add_error(
            UaComplianceError::new(
                UaErrorCode::LinkNotNested,
                format!(
                    "Link annotation {} is tagged under {}, which is not a Link or Reference",
                    placed.obj, parent
                ),
            )
            .with_location(format!("Page {}", placed.page + 1))
            .with_clause("8.9.4.2"),
        );
    }
    Ok(())
}

/// Check a link annotation that is about to be added against the links
/// already tagged into the same element.
pub fn check_candidate(
    ctx: &CheckContext<'_>,
    candidate: &PlacedAnnotation,
    result: &mut UaValidationResult,
) -> Result<()> {
    if !ctx.is_ua2() || !candidate.annotation.is_link() {
        return Ok(());
    }
    check_nesting(ctx, candidate, result)?;

    let Some(parent) = candidate.struct_parent else {
        return Ok(());
    };
    let names = &ctx.model.named_destinations;
    let target = candidate.annotation.target(names);
    let existing = ctx.model.annotations.values().find(|placed| {
        placed.annotation.is_link() && placed.struct_parent == Some(parent)
    });
    if let Some(existing) = existing {
        let first = existing.annotation.target(names);
        if first != target {
            result.add_error(mismatch(parent, &first, &target));
        }
    }
    Ok(())
}

/// Run the link rules over every annotation of the document.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    if !ctx.is_ua2() {
        return Ok(());
    }
    let names = &ctx.model.named_destinations;
    let mut by_parent: IndexMap<StructElemId, LinkTarget> = IndexMap::new();

    for placed in ctx.model.annotations.values() {
        if !placed.annotation.is_link() {
            continue;
        }
        check_nesting(ctx, placed, result)?;

        let Some(parent) = placed.struct_parent else {
            continue;
        };
        let target = placed.annotation.target(names);
        match by_parent.get(&parent) {
            Some(first) if *first != target => {
                result.add_error(mismatch(parent, first, &target));
            },
            Some(_) => {},
            None => {
                by_parent.insert(parent, target);
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{Annotation, LinkDestination};
    use crate::compliance::context::DocumentModel;
    use crate::compliance::{PdfUaLevel, ViolationKind};
    use crate::config::CheckerConfig;
    use crate::object::ObjectRef;

    fn place(model: &mut DocumentModel, id: u32, parent: StructElemId, dest: LinkDestination) {
        let obj = ObjectRef::new(id, 0);
        model.tree.add_object_ref(parent, obj).unwrap();
        model.annotations.insert(
            obj,
            PlacedAnnotation {
                obj,
                page: 0,
                annotation: Annotation::link(dest),
                struct_parent: Some(parent),
            },
        );
    }

    fn run(model: &DocumentModel) -> UaValidationResult {
        let config = CheckerConfig::default().with_level(PdfUaLevel::Ua2);
        let mut result = UaValidationResult::new(config.level);
        check(&CheckContext::new(&config, model), &mut result).unwrap();
        result
    }

    #[test]
    fn test_differing_destinations() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let link = model.tree.add_elem(doc, "Link").unwrap();
        place(&mut model, 10, link, LinkDestination::page(1));
        place(&mut model, 11, link, LinkDestination::page(2));

        let result = run(&model);
        assert!(result.has_kind(ViolationKind::Consistency));
    }

    #[test]
    fn test_equal_by_value() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let heading = model.tree.add_elem(doc, "H1").unwrap();
        let link = model.tree.add_elem(doc, "Link").unwrap();
        model
            .named_destinations
            .insert("intro".into(), LinkDestination::structure(heading));
        place(&mut model, 10, link, LinkDestination::structure(heading));
        place(&mut model, 11, link, LinkDestination::Named("intro".into()));

        assert!(!run(&model).has_errors());
    }

    #[test]
    fn test_link_under_paragraph() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let p = model.tree.add_elem(doc, "P").unwrap();
        place(&mut model, 10, p, LinkDestination::page(0));
        assert!(run(&model).has_code(UaErrorCode::LinkNotNested));

        let config = CheckerConfig::default();
        let mut result = UaValidationResult::new(config.level);
        check(&CheckContext::new(&config, &model), &mut result).unwrap();
        assert!(!result.has_errors());
    }

    #[test]
    fn test_candidate_against_existing() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let link = model.tree.add_elem(doc, "Link").unwrap();
        place(&mut model, 10, link, LinkDestination::page(1));

        let candidate = PlacedAnnotation {
            obj: ObjectRef::new(11, 0),
            page: 0,
            annotation: Annotation::link(LinkDestination::page(3)),
            struct_parent: Some(link),
        };
        let config = CheckerConfig::default().with_level(PdfUaLevel::Ua2);
        let mut result = UaValidationResult::new(config.level);
        check_candidate(&CheckContext::new(&config, &model), &candidate, &mut result).unwrap();
        assert!(result.has_code(UaErrorCode::LinkDestinationMismatch));
    }
}
