//! Which transactions can change the outline

use crate::doc::{NodeKind, Step, Transaction};

/// True when a transaction may have added, removed or renamed a heading
///
/// Any step that removes content counts, whether or not a heading was hit.
/// Inserted text counts when the resulting selection sits inside a heading.
pub fn affects_headings(tr: &Transaction) -> bool {
    let selection_in_heading = || {
        tr.doc()
            .resolve(tr.selection().from())
            .ok()
            .and_then(|pos| pos.find_ancestor(|node| node.kind == NodeKind::Heading))
            .is_some()
    };

    for step in tr.steps() {
        let Step::Replace { slice, .. } = step;
        if slice.is_empty() {
            return true;
        }
        for node in &slice.content {
            if node.is_heading() {
                return true;
            }
            if node.is_text() && selection_in_heading() {
                return true;
            }
        }
    }
    false
}
