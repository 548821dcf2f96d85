//! Transactions: replace steps applied to a working copy of the document

use super::{Document, EditorState, Node, NodeKind, Selection, StepError};
use crate::slash_menu::SlashMenuMeta;

/// Content inserted by a step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slice {
    pub content: Vec<Node>,
}

impl Slice {
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.content.iter().map(Node::node_size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// An atomic edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Replace `from..to` with `slice`
    Replace {
        from: usize,
        to: usize,
        slice: Slice,
    },
}

impl Step {
    pub fn slice(&self) -> &Slice {
        match self {
            Step::Replace { slice, .. } => slice,
        }
    }

    /// Apply the step to `doc`, returning `(from, to, inserted_size)`
    fn apply(&self, doc: &mut Document) -> Result<(usize, usize, usize), StepError> {
        let Step::Replace { from, to, slice } = self;
        let (from, to) = (*from, *to);
        if from > to {
            return Err(StepError::Unsupported(format!(
                "inverted range {}..{}",
                from, to
            )));
        }

        let (indices, parent_is_textblock, from_offset, to_offset, from_index, to_index) = {
            let start = doc.resolve(from)?;
            let end = doc.resolve(to)?;
            if start.indices() != end.indices() {
                return Err(StepError::Unsupported(
                    "range spans different parents".to_string(),
                ));
            }
            (
                start.indices(),
                start.parent().is_textblock(),
                start.parent_offset,
                end.parent_offset,
                start.index(),
                end.index(),
            )
        };

        let parent = doc
            .node_at_path_mut(&indices)
            .ok_or_else(|| StepError::Unsupported("dangling path".to_string()))?;

        if parent_is_textblock {
            if !slice.content.iter().all(Node::is_text) {
                return Err(StepError::Unsupported(
                    "block content inside a textblock".to_string(),
                ));
            }
            let chars: Vec<char> = parent.text_content().chars().collect();
            let inserted: String = slice.content.iter().map(Node::text_content).collect();
            let mut text: String = chars[..from_offset].iter().collect();
            text.push_str(&inserted);
            text.extend(&chars[to_offset..]);
            parent.set_inline_text(text);
        } else {
            if slice.content.iter().any(Node::is_text) {
                return Err(StepError::Unsupported(
                    "text outside a textblock".to_string(),
                ));
            }
            parent
                .children
                .splice(from_index..to_index, slice.content.iter().cloned());
        }

        Ok((from, to, slice.size()))
    }
}

/// Transaction metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Meta {
    SlashMenu(SlashMenuMeta),
}

/// A batch of steps plus selection and metadata, built against a state
#[derive(Debug, Clone)]
pub struct Transaction {
    doc: Document,
    steps: Vec<Step>,
    selection: Selection,
    scroll_into_view: bool,
    meta: Vec<Meta>,
}

impl Transaction {
    pub fn new(state: &EditorState) -> Self {
        Self {
            doc: state.doc.clone(),
            steps: Vec::new(),
            selection: state.selection,
            scroll_into_view: false,
            meta: Vec::new(),
        }
    }

    /// Document after all steps so far
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_scroll_into_view(&self) -> bool {
        self.scroll_into_view
    }

    /// Apply a step and map the selection through it
    pub fn step(&mut self, step: Step) -> Result<&mut Self, StepError> {
        let (from, to, inserted) = step.apply(&mut self.doc)?;
        self.selection = self.selection.map(from, to, inserted);
        self.steps.push(step);
        Ok(self)
    }

    pub fn replace(&mut self, from: usize, to: usize, slice: Slice) -> Result<&mut Self, StepError> {
        self.step(Step::Replace { from, to, slice })
    }

    pub fn replace_with(
        &mut self,
        from: usize,
        to: usize,
        nodes: Vec<Node>,
    ) -> Result<&mut Self, StepError> {
        self.replace(from, to, Slice::new(nodes))
    }

    pub fn delete(&mut self, from: usize, to: usize) -> Result<&mut Self, StepError> {
        self.replace(from, to, Slice::empty())
    }

    /// Replace the selection with `text`, leaving the cursor after it
    pub fn insert_text(&mut self, text: &str) -> Result<&mut Self, StepError> {
        let (from, to) = (self.selection.from(), self.selection.to());
        self.replace(from, to, Slice::new(vec![Node::text(text)]))?;
        let end = from + text.chars().count();
        self.selection = Selection::cursor(end);
        Ok(self)
    }

    /// Change the type of the textblock starting at `pos`, keeping its text
    ///
    /// Headings without an id receive a fresh one.
    pub fn set_block_type(
        &mut self,
        pos: usize,
        kind: NodeKind,
        level: Option<u8>,
    ) -> Result<&mut Self, StepError> {
        let old = self
            .doc
            .node_at(pos)
            .filter(|node| node.is_textblock())
            .cloned()
            .ok_or_else(|| StepError::Unsupported(format!("no textblock at {}", pos)))?;

        let mut node = old.clone();
        node.kind = kind;
        node.attrs.level = level;
        if kind == NodeKind::Heading {
            if node.attrs.id.is_none() {
                node.attrs.id = Some(super::fresh_heading_id());
            }
        } else {
            node.attrs.id = None;
        }

        let selection = self.selection;
        let end = pos + old.node_size();
        self.replace(pos, end, Slice::new(vec![node]))?;
        if selection.from() > pos && selection.to() < end {
            self.selection = selection;
        }
        Ok(self)
    }

    /// Split the textblock around the cursor in two, cursor at the start of the second
    ///
    /// Splitting at the end of a heading continues with a paragraph.
    pub fn split_block(&mut self) -> Result<&mut Self, StepError> {
        let (from, to) = (self.selection.from(), self.selection.to());
        if from < to {
            self.delete(from, to)?;
        }

        let cursor = self.selection.from();
        let (pos, block, offset) = {
            let resolved = self.doc.resolve(cursor)?;
            if !resolved.parent().is_textblock() {
                return Err(StepError::Unsupported(format!(
                    "no textblock at {}",
                    cursor
                )));
            }
            (
                resolved.before(resolved.depth()),
                resolved.parent().clone(),
                resolved.parent_offset,
            )
        };

        let chars: Vec<char> = block.text_content().chars().collect();
        let mut head = block.clone();
        head.set_inline_text(chars[..offset].iter().collect());

        let mut tail = block.clone();
        tail.set_inline_text(chars[offset..].iter().collect());
        if block.is_heading() {
            if offset == chars.len() {
                tail.kind = NodeKind::Paragraph;
                tail.attrs = Default::default();
            } else {
                tail.attrs.id = Some(super::fresh_heading_id());
            }
        }

        let next = pos + head.node_size() + 1;
        self.replace(pos, pos + block.node_size(), Slice::new(vec![head, tail]))?;
        self.selection = Selection::cursor(next);
        Ok(self)
    }

    pub fn set_selection(&mut self, selection: Selection) -> &mut Self {
        self.selection = selection;
        self
    }

    pub fn scroll_into_view(&mut self) -> &mut Self {
        self.scroll_into_view = true;
        self
    }

    pub fn set_meta(&mut self, meta: Meta) -> &mut Self {
        self.meta.push(meta);
        self
    }

    /// Last slash menu metadata attached to this transaction
    pub fn slash_menu_meta(&self) -> Option<&SlashMenuMeta> {
        self.meta.iter().rev().find_map(|meta| match meta {
            Meta::SlashMenu(m) => Some(m),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> EditorState {
        // 0 <h>1 Title 6</h>7 <p>8 body 12</p>13
        EditorState::new(
            Document::new(vec![
                Node::heading_with_id(1, "a", "Title"),
                Node::paragraph("body"),
            ]),
            Selection::cursor(12),
        )
    }

    #[test]
    fn test_insert_text_moves_cursor() {
        let mut tr = Transaction::new(&state());
        tr.insert_text("!").unwrap();
        assert_eq!(tr.doc().blocks()[1].text_content(), "body!");
        assert_eq!(tr.selection(), &Selection::cursor(13));
        assert_eq!(tr.steps().len(), 1);
    }

    #[test]
    fn test_delete_inside_textblock() {
        let mut tr = Transaction::new(&state());
        tr.delete(8, 10).unwrap();
        assert_eq!(tr.doc().blocks()[1].text_content(), "dy");
        assert_eq!(tr.selection(), &Selection::cursor(10));
        assert!(tr.steps()[0].slice().is_empty());
    }

    #[test]
    fn test_replace_blocks_at_top_level() {
        let mut tr = Transaction::new(&state());
        tr.replace_with(7, 13, vec![Node::heading(2, "New")]).unwrap();
        assert_eq!(tr.doc().blocks().len(), 2);
        assert!(tr.doc().blocks()[1].is_heading());
    }

    #[test]
    fn test_range_across_blocks_is_rejected() {
        let mut tr = Transaction::new(&state());
        let err = tr.delete(3, 10).unwrap_err();
        assert!(matches!(err, StepError::Unsupported(_)));
        assert!(!tr.doc_changed());
    }

    #[test]
    fn test_split_at_heading_end_starts_paragraph() {
        let mut state = state();
        state.selection = Selection::cursor(6);
        let mut tr = Transaction::new(&state);
        tr.split_block().unwrap();

        let kinds: Vec<NodeKind> = tr.doc().blocks().iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Heading, NodeKind::Paragraph, NodeKind::Paragraph]
        );
        assert_eq!(tr.doc().blocks()[0].attrs.id.as_deref(), Some("a"));
        assert_eq!(tr.selection(), &Selection::cursor(8));
    }

    #[test]
    fn test_split_inside_paragraph() {
        let mut state = state();
        state.selection = Selection::cursor(10);
        let mut tr = Transaction::new(&state);
        tr.split_block().unwrap();

        let texts: Vec<String> = tr.doc().blocks().iter().map(Node::text_content).collect();
        assert_eq!(texts, vec!["Title", "bo", "dy"]);
        assert_eq!(tr.selection(), &Selection::cursor(12));
    }

    #[test]
    fn test_set_block_type_keeps_text_and_cursor() {
        let mut tr = Transaction::new(&state());
        tr.set_block_type(7, NodeKind::Heading, Some(3)).unwrap();
        let block = &tr.doc().blocks()[1];
        assert!(block.is_heading());
        assert_eq!(block.level(), 3);
        assert!(block.attrs.id.is_some());
        assert_eq!(block.text_content(), "body");
        assert_eq!(tr.selection(), &Selection::cursor(12));
    }
}
