//! Embedded and associated file metadata.
//!
//! PDF/UA-1 needs both name keys (`F` and `UF`); PDF/UA-2 relaxes that and
//! needs a description (`Desc`) instead.

use crate::compliance::context::CheckContext;
use crate::compliance::pdf_ua::{PdfUaLevel, UaComplianceError, UaErrorCode, UaValidationResult};
use crate::embedded_files::FileSpec;
use crate::error::Result;

/// Check one file specification.
pub fn check_file_spec(
    level: PdfUaLevel,
    index: usize,
    spec: &FileSpec,
    result: &mut UaValidationResult,
) {
    result.stats.file_specs_checked += 1;
    let location = format!("File specification {}", index);

    match level {
        PdfUaLevel::Ua1 if !spec.has_file_name() => {
            result.add_error(
                UaComplianceError::new(
                    UaErrorCode::EmbeddedFileMissingName,
                    "File specification must carry both F and UF",
                )
                .with_location(location)
                .with_clause("7.11"),
            );
        },
        PdfUaLevel::Ua2 if spec.description().is_none() => {
            result.add_error(
                UaComplianceError::new(
                    UaErrorCode::EmbeddedFileMissingDescription,
                    "File specification must carry a Desc",
                )
                .with_location(location)
                .with_clause("8.11"),
            );
        },
        _ => {},
    }
}

/// Run the file rule over every file specification.
pub fn check(ctx: &CheckContext<'_>, result: &mut UaValidationResult) -> Result<()> {
    for (index, spec) in ctx.model.files.iter().enumerate() {
        check_file_spec(ctx.level(), index, spec, result);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_differ() {
        let named = FileSpec::new("data.csv", Vec::new());
        let described = FileSpec::unnamed(Vec::new()).with_description("Raw data");

        let mut ua1 = UaValidationResult::new(PdfUaLevel::Ua1);
        check_file_spec(PdfUaLevel::Ua1, 0, &named, &mut ua1);
        assert!(!ua1.has_errors());
        check_file_spec(PdfUaLevel::Ua1, 1, &described, &mut ua1);
        assert!(ua1.has_code(UaErrorCode::EmbeddedFileMissingName));

        let mut ua2 = UaValidationResult::new(PdfUaLevel::Ua2);
        check_file_spec(PdfUaLevel::Ua2, 0, &described, &mut ua2);
        assert!(!ua2.has_errors());
        check_file_spec(PdfUaLevel::Ua2, 1, &named, &mut ua2);
        assert!(ua2.has_code(UaErrorCode::EmbeddedFileMissingDescription));
        assert_eq!(ua2.stats.file_specs_checked, 2);
    }
}
