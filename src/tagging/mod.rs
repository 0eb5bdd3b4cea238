//! Content tag tracking (ISO 32000-1:2008, Section 14.6).
//!
//! Every page content stream gets a [`TagTracker`]: a stack of open
//! marked-content frames. Opening a tag resolves the owning element's role;
//! drawing an image or showing text consults the innermost frame before any
//! bytes are written; closing a tag links the marked-content reference into
//! the structure tree and snapshots the frame's properties onto the node.

mod tracker;

pub use tracker::{FrameProperties, Frame, TagFrame, TagTracker, TrackerCheckpoint};
