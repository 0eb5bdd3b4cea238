//! Tagged document session.
//!
//! [`TaggedDocument`] is where content is produced. It owns the structure
//! tree and catalog data, one content stream and tag tracker per page, and
//! the fonts used to show text. Every operation that writes content runs
//! its incremental checks before anything is committed, and
//! [`TaggedDocument::close`] runs the full rule set.
//!
//! # Example
//!
//! ```
//! use pdfua_check::config::CheckerConfig;
//! use pdfua_check::document::TaggedDocument;
//! use pdfua_check::elements::{ContentElement, StructureElement};
//! use pdfua_check::fonts::GlyphCoverage;
//!
//! let mut doc = TaggedDocument::new(CheckerConfig::default());
//! doc.set_language("en-US").unwrap();
//! doc.set_title("Quarterly report").unwrap();
//! doc.set_display_doc_title(true).unwrap();
//!
//! let page = doc.add_page().unwrap();
//! let font = doc.register_font(Box::new(GlyphCoverage::ascii("Helvetica"))).unwrap();
//! let root = doc.tree_mut().unwrap().add_root("Document");
//!
//! doc.add_element(
//!     page,
//!     Some(root),
//!     &StructureElement::new("P").with_child(ContentElement::text("Revenue grew.", font)),
//! )
//! .unwrap();
//!
//! let result = doc.close().unwrap();
//! assert!(result.is_compliant);
//! ```

use crate::annotations::{Annotation, LinkDestination, PlacedAnnotation};
use crate::compliance::{
    DocumentModel, PdfUaLevel, UaChecker, UaComplianceError, UaErrorCode, UaValidationResult,
};
use crate::config::{CheckerConfig, ValidationMode};
use crate::elements::{ContentElement, StructureElement, TextContent};
use crate::embedded_files::FileSpec;
use crate::encoding::TextString;
use crate::encryption::EncryptionInfo;
use crate::error::{Error, Result};
use crate::fonts::{FontId, GlyphLookup};
use crate::object::ObjectRef;
use crate::structure::attributes::{KEY_LIST_NUMBERING, OWNER_LIST};
use crate::structure::{
    extract_reading_order, first_attribute, AttributeDict, RoleCategory, RoleResolver,
    StructElemId, StructTree,
};
use crate::tagging::{Frame, FrameProperties, TagTracker};
use crate::writer::ContentStreamBuilder;
use crate::xfa::XfaForm;

/// One page: its content stream and the tags open in it.
#[derive(Debug, Clone)]
struct Page {
    content: ContentStreamBuilder,
    tracker: TagTracker,
}

/// A tagged document under construction.
#[derive(Debug)]
pub struct TaggedDocument {
    checker: UaChecker,
    model: DocumentModel,
    pages: Vec<Page>,
    fonts: Vec<Box<dyn GlyphLookup>>,
    next_object: u32,
    closed: bool,
}

impl TaggedDocument {
    /// Start an empty tagged document.
    pub fn new(config: CheckerConfig) -> Self {
        let mut model = DocumentModel::default();
        model.catalog.marked = true;
        log::debug!("New {} document ({:?} mode)", config.level, config.mode);
        Self {
            checker: UaChecker::new(config),
            model,
            pages: Vec::new(),
            fonts: Vec::new(),
            next_object: 1,
            closed: false,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &CheckerConfig {
        self.checker.config()
    }

    /// The conformance level.
    pub fn level(&self) -> PdfUaLevel {
        self.checker.level()
    }

    /// Check if [`close`](Self::close) has succeeded.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The document as the rules see it.
    pub fn model(&self) -> &DocumentModel {
        &self.model
    }

    /// The structure tree.
    pub fn tree(&self) -> &StructTree {
        &self.model.tree
    }

    /// Mutable access to the structure tree, for role maps, namespaces and
    /// elements that carry no content of their own.
    pub fn tree_mut(&mut self) -> Result<&mut StructTree> {
        self.ensure_open()?;
        Ok(&mut self.model.tree)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::DocumentClosed);
        }
        Ok(())
    }

    // ===== Catalog =====

    /// Set the document language (`Lang`).
    pub fn set_language(&mut self, lang: impl Into<TextString>) -> Result<()> {
        self.ensure_open()?;
        self.model.catalog.lang = Some(lang.into());
        Ok(())
    }

    /// Set the document title.
    pub fn set_title(&mut self, title: impl Into<TextString>) -> Result<()> {
        self.ensure_open()?;
        self.model.catalog.title = Some(title.into());
        Ok(())
    }

    /// Set `ViewerPreferences` `DisplayDocTitle`.
    pub fn set_display_doc_title(&mut self, display: bool) -> Result<()> {
        self.ensure_open()?;
        self.model.catalog.display_doc_title = display;
        Ok(())
    }

    /// Set the `MarkInfo` `Marked` flag. New documents are marked.
    pub fn set_marked(&mut self, marked: bool) -> Result<()> {
        self.ensure_open()?;
        self.model.catalog.marked = marked;
        Ok(())
    }

    /// Register a named destination.
    pub fn add_named_destination(
        &mut self,
        name: impl Into<String>,
        destination: LinkDestination,
    ) -> Result<()> {
        self.ensure_open()?;
        self.model.named_destinations.insert(name.into(), destination);
        Ok(())
    }

    /// Embed a file. Returns its index.
    pub fn add_file(&mut self, spec: FileSpec) -> Result<usize> {
        self.ensure_open()?;
        self.model.files.push(spec);
        Ok(self.model.files.len() - 1)
    }

    /// Mutable access to an embedded file specification.
    pub fn file_mut(&mut self, index: usize) -> Result<&mut FileSpec> {
        self.ensure_open()?;
        self.model
            .files
            .get_mut(index)
            .ok_or_else(|| Error::InvalidStructure(format!("No embedded file {}", index)))
    }

    /// Set or clear the encryption dictionary.
    pub fn set_encryption(&mut self, encryption: Option<EncryptionInfo>) -> Result<()> {
        self.ensure_open()?;
        self.model.encryption = encryption;
        Ok(())
    }

    /// Set or clear the XFA form.
    pub fn set_xfa(&mut self, xfa: Option<XfaForm>) -> Result<()> {
        self.ensure_open()?;
        self.model.xfa = xfa;
        Ok(())
    }

    // ===== Pages and fonts =====

    /// Append a page. Returns its index.
    pub fn add_page(&mut self) -> Result<usize> {
        self.ensure_open()?;
        let index = self.pages.len();
        self.pages.push(Page {
            content: ContentStreamBuilder::new(),
            tracker: TagTracker::new(index),
        });
        Ok(index)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Register a font for text runs.
    pub fn register_font(&mut self, font: Box<dyn GlyphLookup>) -> Result<FontId> {
        self.ensure_open()?;
        log::debug!("Registered font '{}' as F{}", font.name(), self.fonts.len());
        self.fonts.push(font);
        Ok(self.fonts.len() - 1)
    }

    fn page(&self, index: usize) -> Result<&Page> {
        self.pages.get(index).ok_or(Error::UnknownPage {
            index,
            count: self.pages.len(),
        })
    }

    fn page_mut(pages: &mut [Page], index: usize) -> Result<&mut Page> {
        let count = pages.len();
        pages.get_mut(index).ok_or(Error::UnknownPage { index, count })
    }

    /// The tag tracker of a page.
    pub fn tracker(&self, page: usize) -> Result<&TagTracker> {
        Ok(&self.page(page)?.tracker)
    }

    /// Serialized content stream of a page.
    pub fn content_stream(&self, page: usize) -> Result<Vec<u8>> {
        self.page(page)?.content.build()
    }

    /// MCIDs of a page in logical reading order.
    pub fn reading_order(&self, page: usize) -> Result<Vec<u32>> {
        self.page(page)?;
        Ok(extract_reading_order(&self.model.tree, page))
    }

    // ===== Tagged content =====

    /// Open a marked-content tag for `elem` on `page`. Returns the MCID.
    pub fn open_tag(&mut self, page: usize, elem: StructElemId) -> Result<u32> {
        self.ensure_open()?;
        let resolver = RoleResolver::new(&self.model.tree, self.checker.config().max_role_map_depth);
        let role = self.model.tree.get(elem)?.role().to_string();
        let target = Self::page_mut(&mut self.pages, page)?;

        let checkpoint = target.content.checkpoint();
        let mcid = target.content.next_mcid();
        if let Err(e) = target.tracker.open_tag(&resolver, elem, mcid) {
            target.content.rollback(checkpoint);
            return Err(e);
        }
        target.content.begin_marked_content(&role, mcid);
        Ok(mcid)
    }

    /// Open an artifact on `page`.
    pub fn open_artifact(&mut self, page: usize) -> Result<()> {
        self.ensure_open()?;
        let target = Self::page_mut(&mut self.pages, page)?;
        target.tracker.open_artifact();
        target.content.begin_artifact();
        Ok(())
    }

    /// Close the innermost tag or artifact on `page`.
    pub fn close_tag(&mut self, page: usize) -> Result<Frame> {
        self.ensure_open()?;
        let target = Self::page_mut(&mut self.pages, page)?;
        let frame = target.tracker.close(&mut self.model.tree)?;
        target.content.end_marked_content();
        Ok(frame)
    }

    /// Edit the innermost open tag on `page`.
    ///
    /// Values set here also reach the element at once, so frames of the same
    /// element open on other pages see them.
    fn edit_current(
        &mut self,
        page: usize,
        edit: impl FnOnce(&mut FrameProperties),
    ) -> Result<()> {
        self.ensure_open()?;
        let target = Self::page_mut(&mut self.pages, page)?;
        let tag = target
            .tracker
            .current_tag_mut()
            .ok_or(Error::TagStackUnderflow(page))?;
        let before = tag.props.clone();
        edit(&mut tag.props);

        let (elem, after) = (tag.elem, tag.props.clone());
        if after.alt.is_some() && after.alt != before.alt {
            self.model.tree.set_alt(elem, after.alt)?;
        }
        if after.actual_text.is_some() && after.actual_text != before.actual_text {
            self.model.tree.set_actual_text(elem, after.actual_text)?;
        }
        Ok(())
    }

    /// Set the alternate description of the innermost open tag.
    pub fn set_current_alt(&mut self, page: usize, alt: Option<TextString>) -> Result<()> {
        self.edit_current(page, |props| props.alt = alt)
    }

    /// Set the replacement text of the innermost open tag.
    pub fn set_current_actual_text(
        &mut self,
        page: usize,
        actual_text: Option<TextString>,
    ) -> Result<()> {
        self.edit_current(page, |props| props.actual_text = actual_text)
    }

    /// Paint an image XObject in the current frame.
    pub fn draw_image(&mut self, page: usize, resource: &str) -> Result<()> {
        self.ensure_open()?;
        let resolver = RoleResolver::new(&self.model.tree, self.checker.config().max_role_map_depth);
        let target = Self::page_mut(&mut self.pages, page)?;
        target.tracker.check_image(&resolver)?;
        target.content.draw_image(resource);
        Ok(())
    }

    /// Show a text run in the current frame.
    pub fn show_text(&mut self, page: usize, run: &TextContent) -> Result<()> {
        self.ensure_open()?;
        let font = self
            .fonts
            .get(run.font)
            .ok_or(Error::UnknownFont(run.font))?;
        let target = Self::page_mut(&mut self.pages, page)?;
        target
            .tracker
            .check_show_text(&self.model.tree, font.as_ref(), &run.text)?;
        target
            .content
            .set_font(&format!("F{}", run.font), run.size)
            .text(&run.text, run.origin.0, run.origin.1);
        Ok(())
    }

    // ===== Annotations =====

    /// Place an annotation on `page`, owned by `struct_parent`.
    ///
    /// The annotation is checked before it is added; a rejected annotation
    /// leaves the document unchanged.
    pub fn add_annotation(
        &mut self,
        page: usize,
        annotation: Annotation,
        struct_parent: Option<StructElemId>,
    ) -> Result<ObjectRef> {
        self.ensure_open()?;
        self.page(page)?;
        if let Some(parent) = struct_parent {
            self.model.tree.get(parent)?;
        }

        let obj = ObjectRef::new(self.next_object, 0);
        let candidate = PlacedAnnotation {
            obj,
            page,
            annotation,
            struct_parent,
        };
        self.checker.check_annotation(&self.model, &candidate)?;

        if let Some(parent) = struct_parent {
            self.model.tree.add_object_ref(parent, obj)?;
        }
        log::debug!(
            "Added {} annotation {} on page {}",
            candidate.annotation.subtype.pdf_name(),
            obj,
            page
        );
        self.model.annotations.insert(obj, candidate);
        self.next_object += 1;
        Ok(obj)
    }

    // ===== Layout elements =====

    /// Add a layout element and its content below `parent` (or as a new root).
    ///
    /// Structure elements, marked-content sequences and content operators
    /// are staged together. If any step or the staged-subtree check fails,
    /// everything staged is discarded and the document is left as it was.
    pub fn add_element(
        &mut self,
        page: usize,
        parent: Option<StructElemId>,
        element: &StructureElement,
    ) -> Result<StructElemId> {
        self.ensure_open()?;
        if let Some(parent) = parent {
            self.model.tree.get(parent)?;
        }
        let (stream_checkpoint, tracker_checkpoint) = {
            let target = self.page(page)?;
            (target.content.checkpoint(), target.tracker.checkpoint())
        };
        let tree_checkpoint = self.model.tree.checkpoint(parent);

        let staged = self
            .stage_element(page, parent, element)
            .and_then(|root| self.checker.check_staged(&self.model, root).map(|_| root));

        match staged {
            Ok(root) => Ok(root),
            Err(e) => {
                log::debug!("Discarding staged '{}': {}", element.structure_type, e);
                self.model.tree.rollback(tree_checkpoint);
                let target = Self::page_mut(&mut self.pages, page)?;
                target.content.rollback(stream_checkpoint);
                target.tracker.rollback(tracker_checkpoint);
                Err(e)
            },
        }
    }

    fn stage_element(
        &mut self,
        page: usize,
        parent: Option<StructElemId>,
        element: &StructureElement,
    ) -> Result<StructElemId> {
        let tree = &mut self.model.tree;
        let id = match parent {
            Some(parent) => tree.add_elem(parent, element.structure_type.as_str())?,
            None => tree.add_root(element.structure_type.as_str()),
        };
        tree.set_namespace(id, element.namespace)?;
        for attributes in &element.attributes {
            tree.add_attributes(id, attributes.clone())?;
        }
        tree.set_alt(id, element.alt_text.clone())?;
        tree.set_actual_text(id, element.actual_text.clone())?;
        tree.set_lang(id, element.language.clone())?;
        for target in &element.refs {
            tree.add_ref(id, *target)?;
        }
        self.apply_default_numbering(id)?;

        for child in &element.children {
            match child {
                ContentElement::Structure(structure) => {
                    self.stage_element(page, Some(id), structure)?;
                },
                ContentElement::Artifact(children) => {
                    self.open_artifact(page)?;
                    self.stage_artifact(page, children)?;
                    self.close_tag(page)?;
                },
                content => {
                    self.open_tag(page, id)?;
                    self.emit(page, content)?;
                    self.close_tag(page)?;
                },
            }
        }
        Ok(id)
    }

    /// Append the configured numbering to a list that declares none.
    fn apply_default_numbering(&mut self, id: StructElemId) -> Result<()> {
        let Some(numbering) = self.checker.config().auto_list_numbering else {
            return Ok(());
        };
        let resolver = RoleResolver::new(&self.model.tree, self.checker.config().max_role_map_depth);
        if resolver.resolve_elem(id)?.category() != Some(RoleCategory::List) {
            return Ok(());
        }
        let attributes = self.model.tree.get(id)?.attributes();
        if first_attribute(attributes, OWNER_LIST, KEY_LIST_NUMBERING).is_some() {
            return Ok(());
        }
        log::debug!("Applying default ListNumbering {} to {}", numbering, id);
        self.model
            .tree
            .add_attributes(id, AttributeDict::list_numbering(numbering))
    }

    fn stage_artifact(&mut self, page: usize, children: &[ContentElement]) -> Result<()> {
        for child in children {
            match child {
                ContentElement::Structure(structure) => {
                    return Err(UaComplianceError::new(
                        UaErrorCode::TagInsideArtifact,
                        format!("'{}' placed inside an artifact", structure.structure_type),
                    )
                    .with_location(format!("Page {}", page + 1))
                    .into());
                },
                ContentElement::Artifact(nested) => {
                    self.open_artifact(page)?;
                    self.stage_artifact(page, nested)?;
                    self.close_tag(page)?;
                },
                content => self.emit(page, content)?,
            }
        }
        Ok(())
    }

    fn emit(&mut self, page: usize, content: &ContentElement) -> Result<()> {
        match content {
            ContentElement::Text(run) => self.show_text(page, run),
            ContentElement::Image(image) => self.draw_image(page, &image.resource),
            ContentElement::Structure(_) | ContentElement::Artifact(_) => Err(
                Error::InvalidStructure("Expected text or image content".to_string()),
            ),
        }
    }

    // ===== Validation =====

    /// Validate the document as it stands and report every violation.
    pub fn validate(&self) -> Result<UaValidationResult> {
        self.checker.validate(&self.model)
    }

    fn unclosed_tags(&self) -> Vec<UaComplianceError> {
        self.pages
            .iter()
            .filter(|p| !p.tracker.is_idle())
            .map(|p| {
                let open: Vec<String> = p.tracker.open_elements().map(|e| e.to_string()).collect();
                UaComplianceError::new(
                    UaErrorCode::UnclosedTag,
                    format!(
                        "{} marked-content sequence(s) still open: [{}]",
                        p.tracker.depth(),
                        open.join(", ")
                    ),
                )
                .with_location(format!("Page {}", p.tracker.page() + 1))
            })
            .collect()
    }

    /// Finish the document and run the full rule set.
    ///
    /// In fail-fast mode the first violation is returned as an error and the
    /// document stays open. In collect-all mode the document is closed and
    /// every violation is reported in the result.
    pub fn close(&mut self) -> Result<UaValidationResult> {
        self.ensure_open()?;
        let unclosed = self.unclosed_tags();

        let result = match self.checker.config().mode {
            ValidationMode::FailFast => {
                if let Some(first) = unclosed.into_iter().next() {
                    log::error!("{}", first);
                    return Err(first.into());
                }
                self.checker.finalize(&self.model)?
            },
            ValidationMode::CollectAll => {
                let mut result = self.checker.finalize(&self.model)?;
                for violation in unclosed {
                    result.add_error(violation);
                }
                result.is_compliant = result.errors.is_empty();
                result
            },
        };

        self.closed = true;
        log::info!(
            "Closed {} document with {} pages: {}",
            self.level(),
            self.pages.len(),
            if result.is_compliant {
                "compliant"
            } else {
                "not compliant"
            }
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::AnnotationSubtype;
    use crate::fonts::GlyphCoverage;
    use crate::object::Object;
    use crate::structure::{ListNumbering, StructChild};

    fn ready(config: CheckerConfig) -> (TaggedDocument, usize, FontId, StructElemId) {
        let mut doc = TaggedDocument::new(config);
        doc.set_language("en").unwrap();
        doc.set_title("Test").unwrap();
        doc.set_display_doc_title(true).unwrap();
        let page = doc.add_page().unwrap();
        let font = doc
            .register_font(Box::new(GlyphCoverage::ascii("Helvetica")))
            .unwrap();
        let root = doc.tree_mut().unwrap().add_root("Document");
        (doc, page, font, root)
    }

    #[test]
    fn test_manual_tagging() {
        let (mut doc, page, font, root) = ready(CheckerConfig::default());
        let p = doc.tree_mut().unwrap().add_elem(root, "P").unwrap();

        let mcid = doc.open_tag(page, p).unwrap();
        doc.show_text(
            page,
            &TextContent {
                text: "Hello".into(),
                font,
                size: 10.0,
                origin: (72.0, 720.0),
            },
        )
        .unwrap();
        doc.close_tag(page).unwrap();

        let stream = String::from_utf8(doc.content_stream(page).unwrap()).unwrap();
        assert!(stream.contains("/P <</MCID 0>> BDC"));
        assert!(stream.contains("(Hello) Tj"));
        assert_eq!(doc.reading_order(page).unwrap(), vec![mcid]);
        assert!(doc.close().unwrap().is_compliant);
    }

    #[test]
    fn test_untagged_text_rejected() {
        let (mut doc, page, font, _) = ready(CheckerConfig::default());
        let err = doc
            .show_text(page, &TextContent {
                text: "loose".into(),
                font,
                size: 12.0,
                origin: (0.0, 0.0),
            })
            .unwrap_err();
        assert_eq!(err.violation().unwrap().code, UaErrorCode::ContentNotTagged);
        assert!(doc.content_stream(page).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_page_and_font() {
        let (mut doc, _, _, root) = ready(CheckerConfig::default());
        assert!(matches!(
            doc.open_tag(5, root),
            Err(Error::UnknownPage { index: 5, count: 1 })
        ));
        let err = doc
            .add_element(
                0,
                Some(root),
                &StructureElement::new("P").with_child(ContentElement::text("x", 9)),
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnknownFont(9)));
        assert_eq!(doc.tree().get(root).unwrap().children().len(), 0);
    }

    #[test]
    fn test_rejected_element_rolls_back() {
        let (mut doc, page, font, root) = ready(CheckerConfig::default());
        doc.add_element(
            page,
            Some(root),
            &StructureElement::new("P").with_child(ContentElement::text("kept", font)),
        )
        .unwrap();
        let before = doc.content_stream(page).unwrap();
        let nodes = doc.tree().len();

        let err = doc
            .add_element(
                page,
                Some(root),
                &StructureElement::new("Figure").with_child(ContentElement::image("Im1")),
            )
            .unwrap_err();
        assert_eq!(err.violation().unwrap().code, UaErrorCode::FigureMissingAlt);
        assert_eq!(doc.content_stream(page).unwrap(), before);
        assert_eq!(doc.tree().len(), nodes);
        assert!(doc.tracker(page).unwrap().is_idle());

        // MCIDs of the discarded attempt are reused
        let mcid = doc.open_tag(page, root).unwrap();
        assert_eq!(mcid, 1);
    }

    #[test]
    fn test_default_list_numbering() {
        let config = CheckerConfig::default()
            .with_level(PdfUaLevel::Ua2)
            .with_auto_list_numbering(Some(ListNumbering::Disc));
        let (mut doc, page, font, root) = ready(config);
        let list = doc
            .add_element(
                page,
                Some(root),
                &StructureElement::new("L").with_child(ContentElement::Structure(
                    StructureElement::new("LI").with_child(ContentElement::Structure(
                        StructureElement::new("LBody").with_child(ContentElement::text("a", font)),
                    )),
                )),
            )
            .unwrap();
        assert_eq!(doc.tree().get(list).unwrap().attributes().len(), 1);
        assert!(doc.close().unwrap().is_compliant);
    }

    #[test]
    fn test_default_numbering_never_masks_declared_value() {
        let config = CheckerConfig::default()
            .with_level(PdfUaLevel::Ua2)
            .with_auto_list_numbering(Some(ListNumbering::Disc));
        let (mut doc, page, font, root) = ready(config);
        let list = StructureElement::new("L")
            .with_attributes(
                AttributeDict::new(OWNER_LIST).with(KEY_LIST_NUMBERING, Object::name("Roman")),
            )
            .with_child(ContentElement::Structure(
                StructureElement::new("LI").with_child(ContentElement::Structure(
                    StructureElement::new("LBody").with_child(ContentElement::text("a", font)),
                )),
            ));

        let err = doc.add_element(page, Some(root), &list).unwrap_err();
        assert_eq!(err.violation().unwrap().code, UaErrorCode::InvalidListNumbering);
    }

    #[test]
    fn test_annotation_needs_struct_parent() {
        let (mut doc, page, _, root) = ready(CheckerConfig::default());
        let stamp = Annotation::new(AnnotationSubtype::Stamp).with_contents("Approved");

        let err = doc.add_annotation(page, stamp.clone(), None).unwrap_err();
        assert_eq!(err.violation().unwrap().code, UaErrorCode::AnnotationNotTagged);
        assert!(doc.model().annotations.is_empty());

        let annot = doc.tree_mut().unwrap().add_elem(root, "Annot").unwrap();
        let obj = doc.add_annotation(page, stamp, Some(annot)).unwrap();
        assert_eq!(
            doc.tree().get(annot).unwrap().children(),
            &[StructChild::Object(obj)]
        );
    }

    #[test]
    fn test_close_with_open_tag() {
        let (mut doc, page, _, root) = ready(CheckerConfig::default());
        let p = doc.tree_mut().unwrap().add_elem(root, "P").unwrap();
        doc.open_tag(page, p).unwrap();

        let err = doc.close().unwrap_err();
        assert_eq!(err.violation().unwrap().code, UaErrorCode::UnclosedTag);
        assert!(!doc.is_closed());

        doc.close_tag(page).unwrap();
        doc.close().unwrap();
        assert!(matches!(doc.add_page(), Err(Error::DocumentClosed)));
    }

    #[test]
    fn test_collect_all_close() {
        let config = CheckerConfig::default().with_mode(ValidationMode::CollectAll);
        let mut doc = TaggedDocument::new(config);
        let page = doc.add_page().unwrap();
        doc.open_artifact(page).unwrap();

        let result = doc.close().unwrap();
        assert!(doc.is_closed());
        assert!(result.has_code(UaErrorCode::NotTaggedPdf));
        assert!(result.has_code(UaErrorCode::MissingLanguage));
        assert!(result.has_code(UaErrorCode::UnclosedTag));
    }
}
