//! Slash command menu
//!
//! Typing the trigger character opens a suggestion menu anchored at the
//! cursor. The menu state lives beside the editor state and is advanced by
//! every transaction through [`SlashMenuState::apply`], keyed on the
//! transaction's [`SlashMenuMeta`]:
//!
//! ```text
//!            trigger key / Activate meta
//! inactive ───────────────────────────────▶ active ──┐ Up/Down: index ∓1 mod 10
//!    ▲                                        │  ◀────┘ Activate: reinitialize
//!    └──────────── Enter / Escape ────────────┘
//! ```

mod items;
mod keys;

pub use items::{matching_items, ItemAction, SlashMenuItem, SLASH_MENU_ITEMS};
pub use keys::handle_key_down;

use uuid::Uuid;

use crate::doc::{EditorState, Transaction};

/// Number of keyboard-selectable slots; the highlighted index wraps within it
pub const MENU_SLOTS: usize = 10;

/// Transaction metadata understood by the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashMenuMeta {
    /// Open (or reopen) the menu; `None` means opened without trigger text
    Activate { trigger_character: Option<String> },
    /// Requested highlight index, before wrapping
    SelectedItemIndexChanged(i64),
    /// Close the menu
    Deactivate,
}

/// Menu state carried alongside the editor state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlashMenuState {
    pub active: bool,
    /// Empty when the menu was opened programmatically
    pub trigger_character: String,
    /// Where the query text begins
    pub query_start_pos: usize,
    pub decoration_id: String,
    pub keyboard_hovered_item_index: usize,
}

/// Wrap a requested index into `0..MENU_SLOTS`, jumping between the ends
pub fn wrap_index(index: i64) -> usize {
    if index < 0 {
        MENU_SLOTS - 1
    } else if index >= MENU_SLOTS as i64 {
        0
    } else {
        index as usize
    }
}

fn fresh_decoration_id() -> String {
    format!("id_{}", Uuid::new_v4().simple())
}

impl SlashMenuState {
    pub fn init() -> Self {
        Self::default()
    }

    /// Menu state after `tr`; `new_state` is the editor state it produced
    pub fn apply(&self, tr: &Transaction, new_state: &EditorState) -> Self {
        match tr.slash_menu_meta() {
            Some(SlashMenuMeta::Activate { trigger_character }) => {
                let state = Self {
                    active: true,
                    trigger_character: trigger_character.clone().unwrap_or_default(),
                    query_start_pos: new_state.selection.from(),
                    decoration_id: fresh_decoration_id(),
                    keyboard_hovered_item_index: 0,
                };
                tracing::debug!(
                    decoration_id = %state.decoration_id,
                    query_start_pos = state.query_start_pos,
                    "slash menu activated"
                );
                state
            }
            _ if !self.active => self.clone(),
            Some(SlashMenuMeta::SelectedItemIndexChanged(index)) => Self {
                keyboard_hovered_item_index: wrap_index(*index),
                ..self.clone()
            },
            Some(SlashMenuMeta::Deactivate) => {
                tracing::debug!("slash menu deactivated");
                Self::init()
            }
            None => self.clone(),
        }
    }

    /// Start of the decorated range, including the trigger text
    pub fn range_start(&self) -> usize {
        self.query_start_pos
            .saturating_sub(self.trigger_character.chars().count())
    }

    /// Text typed after the trigger, if the cursor is still in the same block
    pub fn query(&self, state: &EditorState) -> String {
        let cursor = state.selection.from();
        if !self.active || cursor < self.query_start_pos {
            return String::new();
        }
        let (Ok(start), Ok(end)) = (
            state.doc.resolve(self.query_start_pos),
            state.doc.resolve(cursor),
        ) else {
            return String::new();
        };
        if start.indices() != end.indices() || !start.parent().is_textblock() {
            return String::new();
        }
        start
            .parent()
            .text_content()
            .chars()
            .skip(start.parent_offset)
            .take(end.parent_offset - start.parent_offset)
            .collect()
    }

    /// Items offered for the current query
    pub fn items(&self, state: &EditorState) -> Vec<&'static SlashMenuItem> {
        matching_items(&self.query(state))
    }

    /// The decoration drawn around the active suggestion, if any
    pub fn decoration(&self, state: &EditorState) -> Option<Decoration> {
        if !self.active {
            return None;
        }

        let attrs = DecorationAttrs {
            node_name: "span",
            class: "suggestion-decorator",
            decoration_id: self.decoration_id.clone(),
        };

        if self.trigger_character.is_empty() {
            // Opened without trigger text: the inline range would be empty,
            // so wrap the block holding the selection instead
            let resolved = state.doc.resolve(state.selection.from()).ok()?;
            let (pos, node) = resolved.find_ancestor(|node| node.is_textblock())?;
            return Some(Decoration::Node {
                from: pos,
                to: pos + node.node_size(),
                attrs,
            });
        }

        Some(Decoration::Inline {
            from: self.range_start(),
            to: self.query_start_pos,
            attrs,
        })
    }
}

/// Presentation attributes of a decoration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationAttrs {
    pub node_name: &'static str,
    pub class: &'static str,
    pub decoration_id: String,
}

/// A presentational annotation over a document range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    Inline {
        from: usize,
        to: usize,
        attrs: DecorationAttrs,
    },
    /// Wraps a whole node
    Node {
        from: usize,
        to: usize,
        attrs: DecorationAttrs,
    },
}
