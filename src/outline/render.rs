//! Outline rows and the container they are drawn into

use super::HeadingEntry;
use crate::messages::{Msg, OutlineMsg};

/// One row of the outline panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub padding_left: i32,
    pub label: String,
    /// Heading id captured when the row was rendered
    pub target_id: String,
}

impl OutlineRow {
    /// Message sent when the row is clicked
    pub fn on_click(&self) -> Msg {
        Msg::Outline(OutlineMsg::RowClicked {
            heading_id: self.target_id.clone(),
        })
    }
}

/// Anything that can display outline rows
pub trait OutlineContainer {
    fn clear(&mut self);
    fn append(&mut self, row: OutlineRow);
}

/// In-memory outline panel contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineList {
    pub rows: Vec<OutlineRow>,
}

impl OutlineList {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl OutlineContainer for OutlineList {
    fn clear(&mut self) {
        self.rows.clear();
    }

    fn append(&mut self, row: OutlineRow) {
        self.rows.push(row);
    }
}

/// Replace the container's rows with one row per heading entry
pub fn render_outline<C: OutlineContainer + ?Sized>(
    entries: &[HeadingEntry],
    container: &mut C,
    base_padding: i32,
) {
    container.clear();
    for entry in entries {
        tracing::trace!(id = %entry.id, "outline row");
        container.append(OutlineRow {
            padding_left: base_padding + entry.indentation,
            label: entry.text.clone(),
            target_id: entry.id.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, text: &str, indentation: i32) -> HeadingEntry {
        HeadingEntry {
            position: 0,
            level: 2,
            id: id.to_string(),
            text: text.to_string(),
            indentation,
        }
    }

    #[test]
    fn test_render_replaces_previous_rows() {
        let mut list = OutlineList::default();
        render_outline(&[entry("a", "Old", 0)], &mut list, 16);
        render_outline(
            &[entry("b", "First", -10), entry("c", "Second", 10)],
            &mut list,
            16,
        );

        assert_eq!(list.len(), 2);
        assert_eq!(list.rows[0].padding_left, 6);
        assert_eq!(list.rows[0].label, "First");
        assert_eq!(list.rows[1].padding_left, 26);
        assert_eq!(list.rows[1].target_id, "c");
    }

    #[test]
    fn test_row_click_carries_captured_id() {
        let row = OutlineRow {
            padding_left: 16,
            label: "Title".to_string(),
            target_id: "h_1".to_string(),
        };
        match row.on_click() {
            Msg::Outline(OutlineMsg::RowClicked { heading_id }) => assert_eq!(heading_id, "h_1"),
            other => panic!("unexpected message {:?}", other),
        }
    }
}
