//! File specifications for embedded and associated files.
//!
//! Embedded files are stored in the /Names dictionary of the catalog under
//! /EmbeddedFiles; associated files (PDF 2.0) hang off an `AF` array. Either
//! way each one is described by a file specification (Filespec) dictionary
//! whose `F`/`UF` name keys and `Desc` description key the accessibility
//! profiles care about.
//!
//! ## Example
//!
//! ```
//! use pdfua_check::embedded_files::FileSpec;
//!
//! let file = FileSpec::new("data.csv", b"a,b\n1,2\n".to_vec())
//!     .with_description("Monthly sales data");
//! assert!(file.has_file_name());
//! ```

use crate::encoding::TextString;

/// A file specification with an embedded file stream.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSpec {
    /// Generic file name (`F`)
    file_name: Option<TextString>,
    /// Unicode file name (`UF`)
    unicode_file_name: Option<TextString>,
    /// Description (`Desc`)
    description: Option<TextString>,
    /// The file data
    pub data: Vec<u8>,
}

impl FileSpec {
    /// Create a file specification with both name keys set to `name`.
    pub fn new(name: &str, data: Vec<u8>) -> Self {
        Self {
            file_name: Some(name.into()),
            unicode_file_name: Some(name.into()),
            description: None,
            data,
        }
    }

    /// Create a file specification without any name or description.
    pub fn unnamed(data: Vec<u8>) -> Self {
        Self {
            file_name: None,
            unicode_file_name: None,
            description: None,
            data,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<TextString>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The `F` key.
    pub fn file_name(&self) -> Option<&TextString> {
        self.file_name.as_ref()
    }

    /// Set or clear the `F` key.
    pub fn set_file_name(&mut self, name: Option<TextString>) {
        self.file_name = name;
    }

    /// The `UF` key.
    pub fn unicode_file_name(&self) -> Option<&TextString> {
        self.unicode_file_name.as_ref()
    }

    /// Set or clear the `UF` key.
    pub fn set_unicode_file_name(&mut self, name: Option<TextString>) {
        self.unicode_file_name = name;
    }

    /// The `Desc` key.
    pub fn description(&self) -> Option<&TextString> {
        self.description.as_ref()
    }

    /// Set or clear the `Desc` key.
    pub fn set_description(&mut self, description: Option<TextString>) {
        self.description = description;
    }

    /// Whether both `F` and `UF` are present.
    pub fn has_file_name(&self) -> bool {
        self.file_name.is_some() && self.unicode_file_name.is_some()
    }

    /// Human-readable strings carried by the specification.
    pub fn text_strings(&self) -> impl Iterator<Item = (&'static str, &TextString)> {
        [
            ("F", self.file_name.as_ref()),
            ("UF", self.unicode_file_name.as_ref()),
            ("Desc", self.description.as_ref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filespec_keys() {
        let mut spec = FileSpec::new("report.pdf", vec![1, 2, 3]).with_description("Source");
        assert!(spec.has_file_name());

        spec.set_unicode_file_name(None);
        assert!(!spec.has_file_name());
        assert_eq!(spec.text_strings().count(), 2);
    }

    #[test]
    fn test_unnamed() {
        let spec = FileSpec::unnamed(Vec::new());
        assert!(!spec.has_file_name());
        assert!(spec.description().is_none());
    }
}
