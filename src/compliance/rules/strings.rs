//! Private Use Area code points in human-readable strings.
//!
//! The check reads the value the producer attempted to write, not the
//! serialized bytes, so the outcome does not depend on the text encoding.
//! Characters that PDFDocEncoding could not represent were dropped on
//! serialization; that loss is reported as a warning only.

use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{UaComplianceError, UaErrorCode, UaValidationResult};
use crate::compliance::types::{ComplianceWarning, WarningCode};
use crate::encoding::{first_private_use, TextString};
use crate::error::Result;

/// Check one string. `location` names where it lives (e.g. "Catalog /Lang").
pub fn check_string(location: &str, text: &TextString, result: &mut UaValidationResult) {
    result.stats.strings_checked += 1;

    if let Some(ch) = first_private_use(text.value()) {
        result.add_error(
            UaComplianceError::new(
                UaErrorCode::PrivateUseCharacter,
                format!("String contains Private Use Area character U+{:04X}", ch as u32),
            )
            .with_location(location)
            .with_clause("7.21.7"),
        );
    }

    if text.is_lossy() {
        log::warn!("{}: characters omitted by {:?}", location, text.encoding());
        result.add_warning(
            ComplianceWarning::new(
                WarningCode::LossyTextEncoding,
                format!("Characters omitted by {:?} serialization", text.encoding()),
            )
            .with_location(location),
        );
    }
}

/// Check every human-readable string in the document.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    let model = ctx.model;

    if let Some(lang) = &model.catalog.lang {
        check_string("Catalog /Lang", lang, result);
    }
    if let Some(title) = &model.catalog.title {
        check_string("Catalog /Title", title, result);
    }

    let tree = ctx.tree();
    for id in tree.walk() {
        let props = tree.get(id)?.props();
        let entries = [
            ("Alt", &props.alt),
            ("ActualText", &props.actual_text),
            ("E", &props.expansion),
            ("Lang", &props.lang),
        ];
        for (key, value) in entries {
            if let Some(text) = value {
                check_string(&format!("{} /{}", id, key), text, result);
            }
        }
        for attributes in tree.get(id)?.attributes() {
            for (key, value) in attributes.entries() {
                let location = format!("{} /A /{} /{}", id, attributes.owner(), key);
                value.for_each_string(&mut |bytes| {
                    check_string(&location, &TextString::from_bytes(bytes.to_vec()), result)
                });
            }
        }
    }

    for placed in model.annotations.values() {
        let annotation = &placed.annotation;
        if let Some(contents) = &annotation.contents {
            check_string(&format!("Annotation {} /Contents", placed.obj), contents, result);
        }
        if let Some(subject) = &annotation.subject {
            check_string(&format!("Annotation {} /Subj", placed.obj), subject, result);
        }
    }

    for (index, spec) in model.files.iter().enumerate() {
        for (key, text) in spec.text_strings() {
            check_string(&format!("File specification {} /{}", index, key), text, result);
        }
    }

    Ok(())
}
