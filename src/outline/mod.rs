//! Table of contents built from the document's headings
//!
//! The outline is rebuilt wholesale from the top-level heading nodes whenever
//! a heading-affecting edit settles. Rows carry the heading id they were
//! rendered for; a click re-resolves that id against the live document.

mod index;
mod render;
mod trigger;

pub use index::{index_headings, IndentRule};
pub use render::{render_outline, OutlineContainer, OutlineList, OutlineRow};
pub use trigger::affects_headings;

/// A heading found by the indexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Offset of the heading node in the document
    pub position: usize,
    pub level: u8,
    /// Stable id attribute of the heading (empty if the node has none)
    pub id: String,
    pub text: String,
    /// Visual offset derived from the level sequence
    pub indentation: i32,
}
