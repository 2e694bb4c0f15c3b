//! Scribe Document Model
//!
//! Ordered, named sections over flat markdown text.
//!
//! # Core Concepts
//!
//! - [`SectionDocument`]: ordered list of [`Segment`]s parsed from markdown
//! - [`Segment`]: one marker-headed section, or the unheaded preamble
//! - [`MergeMode`]: how incoming section text combines with existing text
//! - [`normalize`]: blank-line normalizer that keeps template control lines
//!   and variable-only list items visually compact
//!
//! Parsing is total: malformed or unmarked content is retained as opaque
//! segments, so round-tripping never loses data even for hand-edited files.
//!
//! # Example
//!
//! ```rust
//! use scribe_document::{MergeMode, SectionDocument};
//!
//! let mut doc = SectionDocument::parse("# T1: Add retries\n\n## Plan\n\nDo it.\n");
//! doc.merge("Plan", "Do it carefully.", MergeMode::Replace);
//! assert_eq!(doc.get("plan"), Some("Do it carefully."));
//! ```

#![warn(unreachable_pub)]

mod document;
mod format;

pub use document::{section_key, MergeMode, SectionDocument, Segment};
pub use format::{is_control_line, normalize};
