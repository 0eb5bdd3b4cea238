//! Stack of open marked-content frames for one page content stream.

use crate::compliance::rules::{figures, roles};
use crate::compliance::{UaComplianceError, UaErrorCode};
use crate::encoding::TextString;
use crate::error::{Error, Result};
use crate::fonts::GlyphLookup;
use crate::structure::{
    MarkedContentRef, Resolution, ResolvedRole, RoleCategory, RoleResolver, StructElemId,
    StructTree,
};

/// Properties captured while a tag is open and written to the node on close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameProperties {
    /// Alternate description (`Alt`)
    pub alt: Option<TextString>,
    /// Replacement text (`ActualText`)
    pub actual_text: Option<TextString>,
}

/// An open structure tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TagFrame {
    /// Owning structure element
    pub elem: StructElemId,
    /// Standard role the element resolved to at open time
    pub resolved: ResolvedRole,
    /// MCID of the marked-content sequence
    pub mcid: u32,
    /// Properties, editable until the tag closes
    pub props: FrameProperties,
}

/// One entry of the tag stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Tagged content owned by a structure element
    Tag(TagFrame),
    /// Content explicitly marked as not part of the document
    Artifact,
}

/// Saved stack, used to undo staged operations.
#[derive(Debug, Clone)]
pub struct TrackerCheckpoint(Vec<Frame>);

/// Tracks tag nesting on one page and guards content emission.
#[derive(Debug, Clone)]
pub struct TagTracker {
    page: usize,
    stack: Vec<Frame>,
}

impl TagTracker {
    /// Create an idle tracker for `page`.
    pub fn new(page: usize) -> Self {
        Self {
            page,
            stack: Vec::new(),
        }
    }

    /// The page this tracker belongs to.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check if no frame is open.
    pub fn is_idle(&self) -> bool {
        self.stack.is_empty()
    }

    /// The innermost open frame.
    pub fn current(&self) -> Option<&Frame> {
        self.stack.last()
    }

    /// Open a tag for `elem`.
    ///
    /// The element's role must resolve to a standard type before any content
    /// is emitted into it.
    pub fn open_tag(
        &mut self,
        resolver: &RoleResolver<'_>,
        elem: StructElemId,
        mcid: u32,
    ) -> Result<&TagFrame> {
        if matches!(self.stack.last(), Some(Frame::Artifact)) {
            return Err(UaComplianceError::new(
                UaErrorCode::TagInsideArtifact,
                format!("Tag for {} opened inside an artifact", elem),
            )
            .with_location(format!("Page {}", self.page + 1))
            .into());
        }

        let resolved = match resolver.resolve_elem(elem)? {
            Resolution::Standard(resolved) => resolved,
            Resolution::Unresolvable(reason) => {
                return Err(roles::unresolved_violation(&reason, elem).into());
            },
        };

        let node = resolver.tree().get(elem)?;
        let props = FrameProperties {
            alt: node.props().alt.clone(),
            actual_text: node.props().actual_text.clone(),
        };
        log::debug!(
            "Open tag {} ({} -> {}) mcid {} on page {}",
            elem,
            node.role(),
            resolved.struct_type,
            mcid,
            self.page
        );

        self.stack.push(Frame::Tag(TagFrame {
            elem,
            resolved,
            mcid,
            props,
        }));
        match self.stack.last() {
            Some(Frame::Tag(frame)) => Ok(frame),
            _ => Err(Error::TagStackUnderflow(self.page)),
        }
    }

    /// Open an artifact frame.
    pub fn open_artifact(&mut self) {
        log::debug!("Open artifact on page {}", self.page);
        self.stack.push(Frame::Artifact);
    }

    /// The innermost frame, if it is a tag.
    pub fn current_tag_mut(&mut self) -> Option<&mut TagFrame> {
        match self.stack.last_mut() {
            Some(Frame::Tag(frame)) => Some(frame),
            _ => None,
        }
    }

    /// Properties of the innermost tag, if it is a tag.
    pub fn current_properties_mut(&mut self) -> Option<&mut FrameProperties> {
        self.current_tag_mut().map(|frame| &mut frame.props)
    }

    /// Close the innermost frame.
    ///
    /// For a tag, the marked-content reference is linked into the owning
    /// element and the frame's properties are merged onto it. A property the
    /// frame does not carry never clears one the element already has, so an
    /// element tagged on several pages keeps what any of its frames set.
    pub fn close(&mut self, tree: &mut StructTree) -> Result<Frame> {
        let frame = self.stack.pop().ok_or(Error::TagStackUnderflow(self.page))?;
        if let Frame::Tag(ref tag) = frame {
            if let Some(alt) = &tag.props.alt {
                tree.set_alt(tag.elem, Some(alt.clone()))?;
            }
            if let Some(actual_text) = &tag.props.actual_text {
                tree.set_actual_text(tag.elem, Some(actual_text.clone()))?;
            }
            tree.add_marked_content(
                tag.elem,
                MarkedContentRef {
                    page: self.page,
                    mcid: tag.mcid,
                },
            )?;
            log::debug!("Close tag {} mcid {} on page {}", tag.elem, tag.mcid, self.page);
        }
        Ok(frame)
    }

    /// Check that content may be emitted at all.
    fn require_frame(&self, what: &str) -> Result<&Frame> {
        self.stack.last().ok_or_else(|| {
            UaComplianceError::new(
                UaErrorCode::ContentNotTagged,
                format!("{} emitted outside any tag or artifact", what),
            )
            .with_location(format!("Page {}", self.page + 1))
            .into()
        })
    }

    /// Frame properties, falling back to what the element already carries.
    ///
    /// Another frame of the same element, open on a different page, may have
    /// set them in the meantime.
    fn effective_properties(frame: &TagFrame, tree: &StructTree) -> FrameProperties {
        let node = tree.get(frame.elem).ok().map(|node| node.props());
        FrameProperties {
            alt: frame
                .props
                .alt
                .clone()
                .or_else(|| node.and_then(|p| p.alt.clone())),
            actual_text: frame
                .props
                .actual_text
                .clone()
                .or_else(|| node.and_then(|p| p.actual_text.clone())),
        }
    }

    /// Check that an image may be drawn in the current frame.
    ///
    /// A figure whose container carries `Alt` is left to the figure rule,
    /// because the container's caption may be added after the figure.
    pub fn check_image(&self, resolver: &RoleResolver<'_>) -> Result<()> {
        let Frame::Tag(frame) = self.require_frame("Image")? else {
            return Ok(());
        };
        if frame.resolved.category() != RoleCategory::Figure {
            return Ok(());
        }
        let props = Self::effective_properties(frame, resolver.tree());
        if props.alt.is_some() || props.actual_text.is_some() {
            return Ok(());
        }
        if figures::container_has_alt(resolver, frame.elem) {
            return Ok(());
        }
        Err(UaComplianceError::new(
            UaErrorCode::FigureMissingAlt,
            format!("{} draws an image without Alt or ActualText", frame.elem),
        )
        .with_location(format!("Page {}", self.page + 1))
        .with_wcag("1.1.1")
        .with_clause("7.3")
        .into())
    }

    /// Check that `text` may be shown with `font` in the current frame.
    pub fn check_show_text(
        &self,
        tree: &StructTree,
        font: &dyn GlyphLookup,
        text: &str,
    ) -> Result<()> {
        let Frame::Tag(frame) = self.require_frame("Text")? else {
            return Ok(());
        };
        let formula = matches!(
            frame.resolved.category(),
            RoleCategory::Formula | RoleCategory::Math
        );
        if !formula || Self::effective_properties(frame, tree).actual_text.is_some() {
            return Ok(());
        }
        let missing = font.missing_glyphs(text);
        if let Some(first) = missing.first() {
            return Err(UaComplianceError::new(
                UaErrorCode::FormulaMissingActualText,
                format!(
                    "{} shows U+{:04X} which font '{}' cannot draw, and has no ActualText",
                    frame.elem,
                    *first as u32,
                    font.name()
                ),
            )
            .with_location(format!("Page {}", self.page + 1))
            .with_clause("7.7")
            .into());
        }
        Ok(())
    }

    /// Elements with a tag still open, innermost last.
    pub fn open_elements(&self) -> impl Iterator<Item = StructElemId> + '_ {
        self.stack.iter().filter_map(|f| match f {
            Frame::Tag(tag) => Some(tag.elem),
            Frame::Artifact => None,
        })
    }

    /// Remember the current stack.
    pub fn checkpoint(&self) -> TrackerCheckpoint {
        TrackerCheckpoint(self.stack.clone())
    }

    /// Restore a remembered stack.
    pub fn rollback(&mut self, checkpoint: TrackerCheckpoint) {
        self.stack = checkpoint.0;
    }
}
