//! Editor state: a document plus a selection

use super::{Document, Selection, Transaction};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub doc: Document,
    pub selection: Selection,
}

impl EditorState {
    pub fn new(doc: Document, selection: Selection) -> Self {
        Self { doc, selection }
    }

    /// State with the cursor at the end of the document
    pub fn with_doc(doc: Document) -> Self {
        let selection = Selection::at_end(&doc);
        Self { doc, selection }
    }

    /// Start a transaction against this state
    pub fn tr(&self) -> Transaction {
        Transaction::new(self)
    }

    /// Produce the state after `tr`
    pub fn apply(&self, tr: &Transaction) -> EditorState {
        EditorState {
            doc: tr.doc().clone(),
            selection: *tr.selection(),
        }
    }
}
