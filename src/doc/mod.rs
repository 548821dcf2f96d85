//! Structured document model
//!
//! A small tree-document stand-in for the editing framework: ordered block
//! nodes, position resolution, selections and transactions made of replace
//! steps. It covers what the outline and slash menu need and nothing more.

mod markdown;
mod node;
mod selection;
mod state;
mod transaction;

pub use markdown::{parse_markdown, to_markdown};
pub use node::{fresh_heading_id, Attrs, Node, NodeKind};
pub use selection::Selection;
pub use state::EditorState;
pub use transaction::{Meta, Slice, Step, Transaction};

use std::fmt;

/// Errors raised when a step cannot be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    OutOfRange { pos: usize, size: usize },
    Unsupported(String),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::OutOfRange { pos, size } => {
                write!(f, "Position {} out of range (document size {})", pos, size)
            }
            StepError::Unsupported(reason) => write!(f, "Unsupported replace: {}", reason),
        }
    }
}

impl std::error::Error for StepError {}

/// A document: the root `doc` node and its ordered top-level blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(vec![Node::paragraph("")])
    }
}

impl Document {
    pub fn new(blocks: Vec<Node>) -> Self {
        Self {
            root: Node {
                kind: NodeKind::Doc,
                attrs: Attrs::default(),
                children: blocks,
                text: None,
            },
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Top-level blocks in document order
    pub fn blocks(&self) -> &[Node] {
        &self.root.children
    }

    pub fn content_size(&self) -> usize {
        self.root.content_size()
    }

    pub fn text_content(&self) -> String {
        self.root.text_content()
    }

    /// Iterate top-level blocks as `(node, offset, index)`
    pub fn for_each_child<'a, F>(&'a self, f: F)
    where
        F: FnMut(&'a Node, usize, usize) -> bool,
    {
        self.root.for_each_child(f)
    }

    /// Position of the top-level heading carrying `id`
    pub fn find_heading_by_id(&self, id: &str) -> Option<usize> {
        let mut found = None;
        self.for_each_child(|node, offset, _| {
            if node.is_heading() && node.attrs.id.as_deref() == Some(id) {
                found = Some(offset);
                return false;
            }
            true
        });
        found
    }

    /// Resolve a position into its ancestor chain
    pub fn resolve(&self, pos: usize) -> Result<ResolvedPos<'_>, StepError> {
        let size = self.content_size();
        if pos > size {
            return Err(StepError::OutOfRange { pos, size });
        }

        let mut path = vec![PathEntry {
            node: &self.root,
            index: 0,
            start: 0,
        }];
        let mut node = &self.root;
        let mut start = 0;

        'descend: while !node.is_textblock() {
            let mut offset = start;
            for (index, child) in node.children.iter().enumerate() {
                let end = offset + child.node_size();
                if pos > offset && pos < end && !child.kind.is_leaf() && !child.is_text() {
                    path.push(PathEntry {
                        node: child,
                        index,
                        start: offset + 1,
                    });
                    node = child;
                    start = offset + 1;
                    continue 'descend;
                }
                if end > pos {
                    break;
                }
                offset = end;
            }
            break;
        }

        Ok(ResolvedPos {
            pos,
            parent_offset: pos - start,
            path,
        })
    }

    /// The node starting exactly at `pos`, if any
    pub fn node_at(&self, pos: usize) -> Option<&Node> {
        let resolved = self.resolve(pos).ok()?;
        let parent = resolved.parent();
        let mut found = None;
        parent.for_each_child(|child, offset, _| {
            if offset == resolved.parent_offset {
                found = Some(child);
                return false;
            }
            offset < resolved.parent_offset
        });
        found
    }

    pub(crate) fn node_at_path_mut(&mut self, indices: &[usize]) -> Option<&mut Node> {
        let mut node = &mut self.root;
        for &index in indices {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }
}

#[derive(Debug, Clone, Copy)]
struct PathEntry<'a> {
    node: &'a Node,
    /// Index of `node` in its parent (0 for the root)
    index: usize,
    /// Position where `node`'s content starts
    start: usize,
}

/// A position resolved against a document
#[derive(Debug, Clone)]
pub struct ResolvedPos<'a> {
    pub pos: usize,
    /// Offset of `pos` inside the parent's content
    pub parent_offset: usize,
    path: Vec<PathEntry<'a>>,
}

impl<'a> ResolvedPos<'a> {
    /// Depth of the parent node (0 = document root)
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    pub fn node(&self, depth: usize) -> &'a Node {
        self.path[depth].node
    }

    pub fn parent(&self) -> &'a Node {
        self.node(self.depth())
    }

    /// Start of the content of the ancestor at `depth`
    pub fn start(&self, depth: usize) -> usize {
        self.path[depth].start
    }

    /// Position directly before the ancestor at `depth` (depth >= 1)
    pub fn before(&self, depth: usize) -> usize {
        self.path[depth].start.saturating_sub(1)
    }

    /// Child indices from the root down to the parent
    pub fn indices(&self) -> Vec<usize> {
        self.path.iter().skip(1).map(|entry| entry.index).collect()
    }

    /// Innermost ancestor (depth >= 1) matching `predicate`, as `(pos, node)`
    pub fn find_ancestor<P>(&self, predicate: P) -> Option<(usize, &'a Node)>
    where
        P: Fn(&Node) -> bool,
    {
        (1..=self.depth())
            .rev()
            .map(|depth| (self.before(depth), self.node(depth)))
            .find(|(_, node)| predicate(node))
    }

    /// Index of the child of the parent at which this position sits
    pub fn index(&self) -> usize {
        let mut index = 0;
        self.parent().for_each_child(|child, offset, _| {
            if offset + child.node_size() <= self.parent_offset {
                index += 1;
                true
            } else {
                false
            }
        });
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        // 0 <h>1 Title 6</h>7 <p>8 body 12</p>13 [tags]14
        Document::new(vec![
            Node::heading_with_id(1, "a", "Title"),
            Node::paragraph("body"),
            Node::leaf(NodeKind::Tags),
        ])
    }

    #[test]
    fn test_resolve_inside_textblock() {
        let doc = sample();
        let pos = doc.resolve(3).unwrap();
        assert_eq!(pos.depth(), 1);
        assert!(pos.parent().is_heading());
        assert_eq!(pos.parent_offset, 2);
        assert_eq!(pos.before(1), 0);
    }

    #[test]
    fn test_resolve_block_boundary() {
        let doc = sample();
        let pos = doc.resolve(7).unwrap();
        assert_eq!(pos.depth(), 0);
        assert_eq!(pos.index(), 1);
        assert_eq!(doc.node_at(7).map(|n| n.kind), Some(NodeKind::Paragraph));
        assert_eq!(doc.node_at(13).map(|n| n.kind), Some(NodeKind::Tags));
    }

    #[test]
    fn test_resolve_out_of_range() {
        let doc = sample();
        assert_eq!(
            doc.resolve(99).unwrap_err(),
            StepError::OutOfRange { pos: 99, size: 14 }
        );
    }

    #[test]
    fn test_resolve_nested_quote() {
        let doc = Document::new(vec![Node::blockquote(vec![Node::paragraph("ab")])]);
        let pos = doc.resolve(3).unwrap();
        assert_eq!(pos.depth(), 2);
        assert_eq!(pos.indices(), vec![0, 0]);
        let (before, node) = pos.find_ancestor(|n| n.kind == NodeKind::Blockquote).unwrap();
        assert_eq!(before, 0);
        assert_eq!(node.kind, NodeKind::Blockquote);
    }

    #[test]
    fn test_node_at_inside_container() {
        // 0 <bq>1 <p>2 ab 4</p>5 <h>6 Hi 8</h>9 </bq>10
        let doc = Document::new(vec![Node::blockquote(vec![
            Node::paragraph("ab"),
            Node::heading(2, "Hi"),
        ])]);
        assert_eq!(doc.node_at(0).map(|n| n.kind), Some(NodeKind::Blockquote));
        assert_eq!(doc.node_at(5).map(|n| n.text_content()), Some("Hi".to_string()));
        assert!(doc.node_at(3).is_none());
    }

    #[test]
    fn test_find_heading_by_id() {
        let doc = sample();
        assert_eq!(doc.find_heading_by_id("a"), Some(0));
        assert_eq!(doc.find_heading_by_id("missing"), None);
    }
}
