//! Keyboard handling for the slash menu
//!
//! The menu sees key presses before the editor. A key it consumes comes back
//! as a transaction to dispatch; `None` lets the editor handle the key.

use super::{ItemAction, SlashMenuItem, SlashMenuMeta, SlashMenuState};
use crate::doc::{Attrs, EditorState, Meta, Node, Selection, StepError, Transaction};
use crate::input::{Key, KeyEvent};

pub fn handle_key_down(
    state: &EditorState,
    menu: &SlashMenuState,
    event: &KeyEvent,
    trigger_character: char,
) -> Option<Transaction> {
    if !menu.active {
        if event.text() != Some(trigger_character) {
            return None;
        }
        let mut tr = state.tr();
        if let Err(e) = tr.insert_text(&trigger_character.to_string()) {
            tracing::debug!("trigger typed outside a textblock: {}", e);
            return None;
        }
        tr.scroll_into_view().set_meta(Meta::SlashMenu(SlashMenuMeta::Activate {
            trigger_character: Some(trigger_character.to_string()),
        }));
        return Some(tr);
    }

    if event.mods.is_command() {
        return None;
    }

    let index = menu.keyboard_hovered_item_index as i64;
    let meta = match event.key {
        Key::Up => SlashMenuMeta::SelectedItemIndexChanged(index - 1),
        Key::Down => SlashMenuMeta::SelectedItemIndexChanged(index + 1),
        Key::Escape => SlashMenuMeta::Deactivate,
        Key::Enter => return Some(choose_item(state, menu)),
        _ => return None,
    };

    let mut tr = state.tr();
    tr.set_meta(Meta::SlashMenu(meta));
    Some(tr)
}

/// Run the highlighted item and close the menu
fn choose_item(state: &EditorState, menu: &SlashMenuState) -> Transaction {
    let items = menu.items(state);
    let mut tr = state.tr();

    match items.get(menu.keyboard_hovered_item_index) {
        Some(item) => {
            tracing::debug!(item = item.label, "slash menu item chosen");
            if let Err(e) = run_item(&mut tr, state, menu, item) {
                tracing::warn!("Slash menu item '{}' failed: {}", item.label, e);
                tr = state.tr();
            }
        }
        None => tracing::debug!("no slash menu item under the highlight"),
    }

    tr.scroll_into_view()
        .set_meta(Meta::SlashMenu(SlashMenuMeta::Deactivate));
    tr
}

fn run_item(
    tr: &mut Transaction,
    state: &EditorState,
    menu: &SlashMenuState,
    item: &SlashMenuItem,
) -> Result<(), StepError> {
    let (from, to) = (menu.range_start(), state.selection.from());
    if from < to {
        tr.delete(from, to)?;
    }

    let cursor = tr.selection().from();
    let (pos, block) = {
        let resolved = tr.doc().resolve(cursor)?;
        let (pos, block) = resolved
            .find_ancestor(Node::is_textblock)
            .ok_or_else(|| StepError::Unsupported("cursor is not in a textblock".to_string()))?;
        (pos, block.clone())
    };

    match item.action {
        ItemAction::SetBlockType { kind, level } => {
            tr.set_block_type(pos, kind, level)?;
        }
        ItemAction::WrapIn(kind) => {
            let wrapper = Node {
                kind,
                attrs: Attrs::default(),
                children: vec![block.clone()],
                text: None,
            };
            tr.replace_with(pos, pos + block.node_size(), vec![wrapper])?;
            tr.set_selection(Selection::cursor(cursor + 1));
        }
        ItemAction::InsertBlock(kind) => {
            let after = pos + block.node_size();
            tr.replace_with(after, after, vec![Node::leaf(kind)])?;
        }
    }
    Ok(())
}
