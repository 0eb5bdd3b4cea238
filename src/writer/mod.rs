//! Content stream writing.
//!
//! Tagged content is recorded operator by operator so that a rejected
//! operation can be undone before the stream is serialized.
//!
//! ## Example
//!
//! ```
//! use pdfua_check::writer::ContentStreamBuilder;
//!
//! let mut builder = ContentStreamBuilder::new();
//! let mcid = builder.next_mcid();
//! builder
//!     .begin_marked_content("P", mcid)
//!     .set_font("F0", 12.0)
//!     .text("Hello", 72.0, 720.0)
//!     .end_marked_content();
//!
//! let bytes = builder.build().unwrap();
//! assert!(String::from_utf8(bytes).unwrap().contains("/P <</MCID 0>> BDC"));
//! ```

mod content_stream;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp, StreamCheckpoint};
