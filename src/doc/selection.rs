//! Text and node selections

use super::{Document, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A text range; `anchor == head` for a cursor
    Text { anchor: usize, head: usize },
    /// A whole node selected, spanning `from..to`
    Node { from: usize, to: usize },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::cursor(0)
    }
}

impl Selection {
    pub fn cursor(pos: usize) -> Self {
        Selection::Text {
            anchor: pos,
            head: pos,
        }
    }

    /// Select the node starting at `pos`
    pub fn node(doc: &Document, pos: usize) -> Option<Self> {
        let node = doc.node_at(pos)?;
        Some(Selection::Node {
            from: pos,
            to: pos + node.node_size(),
        })
    }

    pub fn from(&self) -> usize {
        match *self {
            Selection::Text { anchor, head } => anchor.min(head),
            Selection::Node { from, .. } => from,
        }
    }

    pub fn to(&self) -> usize {
        match *self {
            Selection::Text { anchor, head } => anchor.max(head),
            Selection::Node { to, .. } => to,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from() == self.to()
    }

    /// Cursor at the end of the last textblock in the document
    pub fn at_end(doc: &Document) -> Self {
        fn last_textblock_end(node: &Node, start: usize) -> Option<usize> {
            let mut offset = start;
            let mut found = None;
            for child in &node.children {
                if child.is_textblock() {
                    found = Some(offset + 1 + child.content_size());
                } else if !child.kind.is_leaf() && !child.is_text() {
                    if let Some(end) = last_textblock_end(child, offset + 1) {
                        found = Some(end);
                    }
                }
                offset += child.node_size();
            }
            found
        }

        Selection::cursor(last_textblock_end(doc.root(), 0).unwrap_or(doc.content_size()))
    }

    /// Cursor at the first textblock position reached from `pos`, scanning
    /// forward or backward; `None` when no textblock lies that way
    pub fn near(doc: &Document, pos: usize, forward: bool) -> Option<Self> {
        let size = doc.content_size();
        let mut pos = pos.min(size);
        loop {
            if doc.resolve(pos).ok()?.parent().is_textblock() {
                return Some(Selection::cursor(pos));
            }
            pos = if forward {
                if pos >= size {
                    return None;
                }
                pos + 1
            } else {
                pos.checked_sub(1)?
            };
        }
    }

    /// Map the selection through a replacement of `from..to` by `inserted` positions
    pub(crate) fn map(&self, from: usize, to: usize, inserted: usize) -> Self {
        let map_pos = |pos: usize| {
            if pos < from {
                pos
            } else if pos > to {
                pos - (to - from) + inserted
            } else {
                from + inserted
            }
        };
        match *self {
            Selection::Text { anchor, head } => Selection::Text {
                anchor: map_pos(anchor),
                head: map_pos(head),
            },
            Selection::Node { from: start, to: end } => {
                let (start, end) = (map_pos(start), map_pos(end));
                if start == end {
                    Selection::cursor(start)
                } else {
                    Selection::Node {
                        from: start,
                        to: end,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::NodeKind;

    #[test]
    fn test_at_end_skips_trailing_leaf() {
        let doc = Document::new(vec![
            Node::paragraph("one"),
            Node::paragraph("two"),
            Node::leaf(NodeKind::HorizontalRule),
        ]);
        assert_eq!(Selection::at_end(&doc), Selection::cursor(9));
    }

    #[test]
    fn test_at_end_without_textblock() {
        let doc = Document::new(vec![Node::leaf(NodeKind::Tags)]);
        assert_eq!(Selection::at_end(&doc), Selection::cursor(1));
    }

    #[test]
    fn test_node_selection_spans_node() {
        let doc = Document::new(vec![Node::paragraph("abc"), Node::heading(2, "Hi")]);
        assert_eq!(
            Selection::node(&doc, 5),
            Some(Selection::Node { from: 5, to: 9 })
        );
        assert_eq!(Selection::node(&doc, 2), None);
    }

    #[test]
    fn test_near_skips_block_boundaries() {
        // 0 <p>1 ab 3</p>4 <p>5 cd 7</p>8 [hr]9
        let doc = Document::new(vec![
            Node::paragraph("ab"),
            Node::paragraph("cd"),
            Node::leaf(NodeKind::HorizontalRule),
        ]);
        assert_eq!(Selection::near(&doc, 4, true), Some(Selection::cursor(5)));
        assert_eq!(Selection::near(&doc, 4, false), Some(Selection::cursor(3)));
        assert_eq!(Selection::near(&doc, 2, true), Some(Selection::cursor(2)));
        assert_eq!(Selection::near(&doc, 8, true), None);
        assert_eq!(Selection::near(&doc, 0, false), None);
    }

    #[test]
    fn test_map_after_deletion() {
        let sel = Selection::cursor(10);
        assert_eq!(sel.map(2, 5, 0), Selection::cursor(7));
        assert_eq!(Selection::cursor(3).map(2, 5, 1), Selection::cursor(3));
        assert_eq!(Selection::cursor(1).map(2, 5, 1), Selection::cursor(1));
    }
}
