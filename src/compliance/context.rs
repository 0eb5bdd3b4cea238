//! The document as seen by the rule modules.

use super::pdf_ua::PdfUaLevel;
use crate::annotations::{LinkDestination, PlacedAnnotation};
use crate::config::CheckerConfig;
use crate::embedded_files::FileSpec;
use crate::encoding::TextString;
use crate::encryption::EncryptionInfo;
use crate::object::ObjectRef;
use crate::structure::{RoleResolver, StructTree};
use crate::xfa::XfaForm;
use indexmap::IndexMap;

/// Catalog entries the profiles care about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogInfo {
    /// `MarkInfo` `Marked` flag
    pub marked: bool,
    /// Document language (`Lang`)
    pub lang: Option<TextString>,
    /// Document title (`dc:title` / `Title`)
    pub title: Option<TextString>,
    /// `ViewerPreferences` `DisplayDocTitle`
    pub display_doc_title: bool,
}

/// Everything a finished document consists of, minus its content streams.
#[derive(Debug, Clone, Default)]
pub struct DocumentModel {
    /// Catalog metadata
    pub catalog: CatalogInfo,
    /// Structure tree, namespaces and role maps
    pub tree: StructTree,
    /// Annotations by object reference, in insertion order
    pub annotations: IndexMap<ObjectRef, PlacedAnnotation>,
    /// Named destinations (`Dests` name tree)
    pub named_destinations: IndexMap<String, LinkDestination>,
    /// Embedded and associated file specifications
    pub files: Vec<FileSpec>,
    /// Encryption dictionary summary
    pub encryption: Option<EncryptionInfo>,
    /// XFA form summary
    pub xfa: Option<XfaForm>,
}

/// Read-only view handed to every rule.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Active configuration
    pub config: &'a CheckerConfig,
    /// The document
    pub model: &'a DocumentModel,
}

impl<'a> CheckContext<'a> {
    /// Create a view.
    pub fn new(config: &'a CheckerConfig, model: &'a DocumentModel) -> Self {
        Self { config, model }
    }

    /// The conformance level.
    pub fn level(&self) -> PdfUaLevel {
        self.config.level
    }

    /// Check if UA-2 rules apply.
    pub fn is_ua2(&self) -> bool {
        self.config.level == PdfUaLevel::Ua2
    }

    /// The structure tree.
    pub fn tree(&self) -> &'a StructTree {
        &self.model.tree
    }

    /// A resolver with the configured hop budget.
    pub fn resolver(&self) -> RoleResolver<'a> {
        RoleResolver::new(&self.model.tree, self.config.max_role_map_depth)
    }

    /// Look up an annotation by object reference.
    pub fn annotation(&self, obj: ObjectRef) -> Option<&'a PlacedAnnotation> {
        self.model.annotations.get(&obj)
    }
}
