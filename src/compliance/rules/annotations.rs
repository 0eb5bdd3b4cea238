//! Annotations must be tagged and described.

use crate::annotations::{AnnotationSubtype, PlacedAnnotation};
use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{UaComplianceError, UaErrorCode, UaValidationResult};
use crate::error::Result;

/// Check a single annotation.
pub fn check_annotation(placed: &PlacedAnnotation, result: &mut UaValidationResult) {
    result.stats.annotations_checked += 1;
    let annotation = &placed.annotation;
    if annotation.is_hidden() || annotation.subtype == AnnotationSubtype::Popup {
        return;
    }
    let location = format!("Page {}", placed.page + 1);

    if placed.struct_parent.is_none() {
        result.add_error(
            UaComplianceError::new(
                UaErrorCode::AnnotationNotTagged,
                format!(
                    "{} annotation {} is not tagged",
                    annotation.subtype.pdf_name(),
                    placed.obj
                ),
            )
            .with_location(location.clone())
            .with_clause("7.18.1"),
        );
    }

    let described = annotation.contents.as_ref().is_some_and(|c| !c.is_empty());
    if annotation.subtype.requires_contents() && !described {
        result.add_error(
            UaComplianceError::new(
                UaErrorCode::AnnotationMissingContents,
                format!(
                    "{} annotation {} has no Contents",
                    annotation.subtype.pdf_name(),
                    placed.obj
                ),
            )
            .with_location(location)
            .with_clause("7.18.1")
            .with_wcag("1.1.1"),
        );
    }
}

/// Run the annotation rule over every annotation.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    for placed in ctx.model.annotations.values() {
        check_annotation(placed, result);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{Annotation, AnnotationFlags};
    use crate::object::ObjectRef;
    use crate::compliance::PdfUaLevel;

    fn placed(annotation: Annotation) -> PlacedAnnotation {
        PlacedAnnotation {
            obj: ObjectRef::new(5, 0),
            page: 0,
            annotation,
            struct_parent: None,
        }
    }

    #[test]
    fn test_untagged_text_annotation() {
        let mut result = UaValidationResult::new(PdfUaLevel::Ua1);
        check_annotation(&placed(Annotation::new(AnnotationSubtype::Text)), &mut result);
        assert!(result.has_code(UaErrorCode::AnnotationNotTagged));
        assert!(result.has_code(UaErrorCode::AnnotationMissingContents));
        assert_eq!(result.stats.annotations_checked, 1);
    }

    #[test]
    fn test_hidden_and_popup_exempt() {
        let mut result = UaValidationResult::new(PdfUaLevel::Ua1);
        check_annotation(
            &placed(Annotation::new(AnnotationSubtype::Text).with_flags(AnnotationFlags::HIDDEN)),
            &mut result,
        );
        check_annotation(&placed(Annotation::new(AnnotationSubtype::Popup)), &mut result);
        assert!(!result.has_errors());
    }
}
