//! PDF content stream recorder.
//!
//! Records the text, image and marked-content operators of a page content
//! stream according to ISO 32000-1:2008 Sections 8-9 and 14.6, and serializes
//! them to bytes.

use crate::error::Result;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font and size (Tf)
    SetFont(String, f32),
    /// Move text position (Td)
    MoveText(f32, f32),
    /// Show text (Tj) - literal string
    ShowText(String),
    /// Show hex-encoded text (Tj) - for CIDFonts/Unicode
    ShowHexText(String),
    /// Paint XObject (Do)
    PaintXObject(String),

    // === Marked Content Operations ===
    /// Begin marked content with dictionary (BDC) - for tagged PDF structure
    BeginMarkedContentDict {
        /// The tag/structure type (e.g., "P" for paragraph, "H1" for heading)
        tag: String,
        /// Marked Content ID for linking to structure tree
        mcid: u32,
    },
    /// Begin marked content without properties (BMC), used for artifacts
    BeginMarkedContent(String),
    /// End marked content (EMC)
    EndMarkedContent,
}

/// Position of a content stream, used to undo staged operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamCheckpoint {
    ops: usize,
    mcid: u32,
    in_text_object: bool,
}

/// Builder for PDF content streams.
#[derive(Debug, Default, Clone)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Whether we're in a text object
    in_text_object: bool,
    /// MCID (Marked Content ID) counter for tagged PDF structure
    mcid_counter: u32,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set the font and size.
    pub fn set_font(&mut self, font_name: &str, size: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFont(font_name.to_string(), size))
    }

    /// Show text at a position. Text outside printable ASCII is written as
    /// UTF-16BE hex for an Identity-H encoded font.
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::MoveText(x, y));
        if text.chars().all(|c| (' '..='~').contains(&c)) {
            self.op(ContentStreamOp::ShowText(text.to_string()))
        } else {
            let hex: String = text.encode_utf16().map(|u| format!("{:04X}", u)).collect();
            self.op(ContentStreamOp::ShowHexText(format!("<{}>", hex)))
        }
    }

    /// Paint an image XObject.
    pub fn draw_image(&mut self, resource_name: &str) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::SaveState);
        self.op(ContentStreamOp::PaintXObject(resource_name.to_string()));
        self.op(ContentStreamOp::RestoreState)
    }

    /// Get the next MCID value and increment the counter.
    pub fn next_mcid(&mut self) -> u32 {
        let mcid = self.mcid_counter;
        self.mcid_counter += 1;
        mcid
    }

    /// Begin a tagged marked-content sequence (`/tag <</MCID n>> BDC`).
    pub fn begin_marked_content(&mut self, tag: &str, mcid: u32) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::BeginMarkedContentDict {
            tag: tag.to_string(),
            mcid,
        })
    }

    /// Begin an artifact sequence (`/Artifact BMC`).
    pub fn begin_artifact(&mut self) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::BeginMarkedContent("Artifact".to_string()))
    }

    /// End the innermost marked-content sequence.
    pub fn end_marked_content(&mut self) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::EndMarkedContent)
    }

    /// Remember the current position.
    pub fn checkpoint(&self) -> StreamCheckpoint {
        StreamCheckpoint {
            ops: self.operations.len(),
            mcid: self.mcid_counter,
            in_text_object: self.in_text_object,
        }
    }

    /// Drop every operation recorded since `checkpoint` and reuse its MCIDs.
    pub fn rollback(&mut self, checkpoint: StreamCheckpoint) {
        self.operations.truncate(checkpoint.ops);
        self.mcid_counter = checkpoint.mcid;
        self.in_text_object = checkpoint.in_text_object;
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            self.write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
        match op {
            ContentStreamOp::SaveState => write!(w, "q"),
            ContentStreamOp::RestoreState => write!(w, "Q"),
            ContentStreamOp::BeginText => write!(w, "BT"),
            ContentStreamOp::EndText => write!(w, "ET"),
            ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, size),
            ContentStreamOp::MoveText(tx, ty) => write!(w, "{} {} Td", tx, ty),
            ContentStreamOp::ShowText(text) => {
                write!(w, "(")?;
                self.write_escaped_string(w, text)?;
                write!(w, ") Tj")
            },
            ContentStreamOp::ShowHexText(hex) => {
                // Hex string already formatted as <XXXX...>
                write!(w, "{} Tj", hex)
            },
            ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),

            // Marked content operations
            ContentStreamOp::BeginMarkedContentDict { tag, mcid } => {
                write!(w, "/{} <</MCID {}>> BDC", tag, mcid)
            },
            ContentStreamOp::BeginMarkedContent(tag) => write!(w, "/{} BMC", tag),
            ContentStreamOp::EndMarkedContent => write!(w, "EMC"),
        }
    }

    /// Write a string with PDF escape sequences.
    fn write_escaped_string<W: Write>(&self, w: &mut W, text: &str) -> std::io::Result<()> {
        for byte in text.bytes() {
            match byte {
                b'(' => write!(w, "\\(")?,
                b')' => write!(w, "\\)")?,
                b'\\' => write!(w, "\\\\")?,
                _ => w.write_all(&[byte])?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(builder: &ContentStreamBuilder) -> String {
        String::from_utf8(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("Helvetica", 12.0)
            .text("Hello (World)", 72.0, 720.0)
            .end_text();

        let content = render(&builder);
        assert!(content.contains("BT"));
        assert!(content.contains("/Helvetica 12 Tf"));
        assert!(content.contains("(Hello \\(World\\)) Tj"));
        assert!(content.contains("ET"));
    }

    #[test]
    fn test_unicode_text_is_hex() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("\u{2211}", 0.0, 0.0);
        assert!(render(&builder).contains("<2211> Tj"));
    }

    #[test]
    fn test_marked_content() {
        let mut builder = ContentStreamBuilder::new();
        let mcid = builder.next_mcid();
        builder
            .begin_marked_content("Figure", mcid)
            .draw_image("Im1")
            .end_marked_content()
            .begin_artifact()
            .end_marked_content();

        let content = render(&builder);
        assert!(content.contains("/Figure <</MCID 0>> BDC"));
        assert!(content.contains("/Im1 Do"));
        assert!(content.contains("/Artifact BMC"));
        assert_eq!(content.matches("EMC").count(), 2);
    }

    #[test]
    fn test_rollback() {
        let mut builder = ContentStreamBuilder::new();
        let first = builder.next_mcid();
        builder.begin_marked_content("P", first);
        let cp = builder.checkpoint();
        let second = builder.next_mcid();
        builder.begin_marked_content("Span", second).text("x", 0.0, 0.0);
        builder.rollback(cp);

        assert_eq!(builder.operations.len(), 1);
        assert_eq!(builder.next_mcid(), second);
    }
}
