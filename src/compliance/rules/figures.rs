//! Alternate text of figures.

use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{PdfUaLevel, UaComplianceError, UaErrorCode, UaValidationResult};
use crate::error::Result;
use crate::structure::{AccessibilityProps, RoleCategory, RoleResolver, StructElemId};

/// Whether the parent of `elem` carries `Alt`.
///
/// Such a container may describe the figure once it also holds a caption.
pub fn container_has_alt(resolver: &RoleResolver<'_>, elem: StructElemId) -> bool {
    let tree = resolver.tree();
    tree.get(elem)
        .ok()
        .and_then(|e| e.parent())
        .and_then(|parent| tree.get(parent).ok())
        .map_or(false, |container| container.props().alt.is_some())
}

/// Whether `elem` sits in a container that carries `Alt` next to a caption.
///
/// A figure wrapped this way is described by its container.
pub fn has_captioned_alternative(resolver: &RoleResolver<'_>, elem: StructElemId) -> bool {
    if !container_has_alt(resolver, elem) {
        return false;
    }
    let tree = resolver.tree();
    let Some(parent) = tree.get(elem).ok().and_then(|e| e.parent()) else {
        return false;
    };
    let Ok(container) = tree.get(parent) else {
        return false;
    };
    container.child_elems().filter(|&sibling| sibling != elem).any(|sibling| {
        resolver
            .resolve_elem(sibling)
            .map(|r| r.category() == Some(RoleCategory::Caption))
            .unwrap_or(false)
    })
}

/// Whether the element's own properties are an acceptable text alternative.
///
/// Empty `ActualText` is an intentional "nothing to add" and always counts.
/// Empty `Alt` counts only under PDF/UA-2.
fn has_alternative(props: &AccessibilityProps, level: PdfUaLevel) -> bool {
    if props.actual_text.is_some() {
        return true;
    }
    match (&props.alt, level) {
        (Some(_), PdfUaLevel::Ua2) => true,
        (Some(alt), PdfUaLevel::Ua1) => !alt.is_empty(),
        (None, _) => false,
    }
}

/// Check one element if it is a figure.
pub fn check_node(
    resolver: &RoleResolver<'_>,
    level: PdfUaLevel,
    id: StructElemId,
    result: &mut UaValidationResult,
) -> Result<()> {
    if resolver.resolve_elem(id)?.category() != Some(RoleCategory::Figure) {
        return Ok(());
    }
    result.stats.figures_checked += 1;

    let props = resolver.tree().get(id)?.props();
    if has_alternative(props, level) || has_captioned_alternative(resolver, id) {
        return Ok(());
    }

    let message = if props.alt.is_some() {
        format!("Figure {} has an empty Alt", id)
    } else {
        format!("Figure {} has no Alt or ActualText", id)
    };
    result.add_error(
        UaComplianceError::new(UaErrorCode::FigureMissingAlt, message)
            .with_location(id.to_string())
            .with_wcag("1.1.1")
            .with_clause("7.3"),
    );
    Ok(())
}

/// Run the figure rule over the whole tree.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    let resolver = ctx.resolver();
    for id in ctx.tree().walk() {
        check_node(&resolver, ctx.level(), id, result)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::context::DocumentModel;
    use crate::config::CheckerConfig;

    fn run(model: &DocumentModel, level: PdfUaLevel) -> UaValidationResult {
        let config = CheckerConfig::default().with_level(level);
        let mut result = UaValidationResult::new(level);
        check(&CheckContext::new(&config, model), &mut result).unwrap();
        result
    }

    #[test]
    fn test_empty_alt_by_profile() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let figure = model.tree.add_elem(doc, "Figure").unwrap();
        model.tree.set_alt(figure, Some("".into())).unwrap();

        assert!(run(&model, PdfUaLevel::Ua1).has_code(UaErrorCode::FigureMissingAlt));
        let result = run(&model, PdfUaLevel::Ua2);
        assert!(!result.has_errors());
        assert_eq!(result.stats.figures_checked, 1);
    }

    #[test]
    fn test_empty_actual_text_accepted() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let figure = model.tree.add_elem(doc, "Figure").unwrap();
        model.tree.set_actual_text(figure, Some("".into())).unwrap();
        assert!(!run(&model, PdfUaLevel::Ua1).has_errors());
    }

    #[test]
    fn test_captioned_container() {
        let mut model = DocumentModel::default();
        model.tree.add_role_mapping("Illustration", "Figure");
        let doc = model.tree.add_root("Document");
        let div = model.tree.add_elem(doc, "Div").unwrap();
        let figure = model.tree.add_elem(div, "Illustration").unwrap();
        assert!(run(&model, PdfUaLevel::Ua1).has_code(UaErrorCode::FigureMissingAlt));

        model.tree.add_elem(div, "Caption").unwrap();
        model.tree.set_alt(div, Some("Sales chart".into())).unwrap();
        assert!(has_captioned_alternative(&RoleResolver::new(&model.tree, 32), figure));
        assert!(!run(&model, PdfUaLevel::Ua1).has_errors());
    }

    #[test]
    fn test_caption_after_figure() {
        let mut model = DocumentModel::default();
        let doc = model.tree.add_root("Document");
        let sect = model.tree.add_elem(doc, "Sect").unwrap();
        model.tree.set_alt(sect, Some("Revenue chart".into())).unwrap();
        let figure = model.tree.add_elem(sect, "Figure").unwrap();

        let resolver = RoleResolver::new(&model.tree, 32);
        assert!(container_has_alt(&resolver, figure));
        assert!(!has_captioned_alternative(&resolver, figure));

        model.tree.add_elem(sect, "Caption").unwrap();
        assert!(!run(&model, PdfUaLevel::Ua1).has_errors());
    }
}
