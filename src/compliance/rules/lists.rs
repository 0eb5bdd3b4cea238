//! List structure and list numbering.
//!
//! Both profiles restrict what may appear directly under `L` and `LI`.
//! PDF/UA-2 additionally requires every list to declare its numbering through
//! a `List` attribute dictionary; with several such dictionaries the first
//! one defining `ListNumbering` is the one that counts.

use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{PdfUaLevel, UaComplianceError, UaErrorCode, UaValidationResult};
use crate::error::Result;
use crate::structure::{
    effective_list_numbering, EffectiveListNumbering, ListNumbering, RoleCategory, RoleResolver,
    StructChild, StructElemId,
};

/// Check one element if it is a list or list item.
pub fn check_node(
    resolver: &RoleResolver<'_>,
    level: PdfUaLevel,
    id: StructElemId,
    result: &mut UaValidationResult,
) -> Result<()> {
    match resolver.resolve_elem(id)?.category() {
        Some(RoleCategory::List) => check_list(resolver, level, id, result),
        Some(RoleCategory::ListItem) => check_list_item(resolver, id, result),
        _ => Ok(()),
    }
}

/// Run the list rules over the whole tree.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    let resolver = ctx.resolver();
    for id in ctx.tree().walk() {
        check_node(&resolver, ctx.level(), id, result)?;
    }
    Ok(())
}

fn check_list(
    resolver: &RoleResolver<'_>,
    level: PdfUaLevel,
    id: StructElemId,
    result: &mut UaValidationResult,
) -> Result<()> {
    result.stats.lists_checked += 1;
    let list = resolver.tree().get(id)?;

    for child in list.children() {
        let allowed = match child {
            StructChild::Elem(child) => matches!(
                resolver.resolve_elem(*child)?.category(),
                // Unresolvable children are reported by the role rule
                None | Some(RoleCategory::ListItem)
                    | Some(RoleCategory::List)
                    | Some(RoleCategory::Caption)
                    | Some(RoleCategory::Artifact)
            ),
            StructChild::MarkedContent(_) | StructChild::Object(_) => false,
        };
        if !allowed {
            result.add_error(
                UaComplianceError::new(
                    UaErrorCode::ListChildInvalid,
                    format!("List {} has a child that is not LI, L or Caption", id),
                )
                .with_location(id.to_string())
                .with_clause("7.6")
                .with_wcag("1.3.1"),
            );
        }
    }

    if level != PdfUaLevel::Ua2 {
        return Ok(());
    }

    match effective_list_numbering(list.attributes()) {
        EffectiveListNumbering::Valid(ListNumbering::None) => {
            if !every_item_labelled(resolver, id)? {
                result.add_error(numbering_missing(
                    id,
                    "ListNumbering is None but not every item has a Lbl",
                ));
            }
        },
        EffectiveListNumbering::Valid(numbering) => {
            log::debug!("List {} numbered {}", id, numbering);
        },
        EffectiveListNumbering::Absent => {
            result.add_error(numbering_missing(id, "List numbering is not specified"));
        },
        EffectiveListNumbering::Invalid(value) => {
            result.add_error(
                UaComplianceError::new(
                    UaErrorCode::InvalidListNumbering,
                    format!(
                        "List {} has ListNumbering {:?}, which is not a recognised value",
                        id, value
                    ),
                )
                .with_location(id.to_string())
                .with_clause("8.2.5.25"),
            );
        },
    }
    Ok(())
}

fn numbering_missing(id: StructElemId, message: &str) -> UaComplianceError {
    UaComplianceError::new(UaErrorCode::ListNumberingMissing, format!("{}: {}", id, message))
        .with_location(id.to_string())
        .with_clause("8.2.5.25")
        .with_wcag("1.3.1")
}

/// Whether every `LI` of the list has a `Lbl` child.
fn every_item_labelled(resolver: &RoleResolver<'_>, list: StructElemId) -> Result<bool> {
    let tree = resolver.tree();
    for item in tree.get(list)?.child_elems() {
        if resolver.resolve_elem(item)?.category() != Some(RoleCategory::ListItem) {
            continue;
        }
        let mut labelled = false;
        for child in tree.get(item)?.child_elems() {
            if resolver.resolve_elem(child)?.category() == Some(RoleCategory::Label) {
                labelled = true;
                break;
            }
        }
        if !labelled {
            return Ok(false);
        }
    }
    Ok(true)
}

fn check_list_item(
    resolver: &RoleResolver<'_>,
    id: StructElemId,
    result: &mut UaValidationResult,
) -> Result<()> {
    for child in resolver.tree().get(id)?.children() {
        let allowed = match child {
            StructChild::Elem(child) => matches!(
                resolver.resolve_elem(*child)?.category(),
                None | Some(RoleCategory::Label)
                    | Some(RoleCategory::ListBody)
                    | Some(RoleCategory::Artifact)
            ),
            StructChild::MarkedContent(_) | StructChild::Object(_) => false,
        };
        if !allowed {
            result.add_error(
                UaComplianceError::new(
                    UaErrorCode::ListItemContentInvalid,
                    format!("List item {} has content outside Lbl and LBody", id),
                )
                .with_location(id.to_string())
                .with_clause("7.6")
                .with_wcag("1.3.1"),
            );
        }
    }
    Ok(())
}
