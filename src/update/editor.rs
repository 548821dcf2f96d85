//! Editor message handlers (keys, transactions, background clicks)

use crate::commands::{Cmd, DamageArea};
use crate::debounce::DebounceChannel;
use crate::doc::{Selection, StepError, Transaction};
use crate::input::{Key, KeyEvent};
use crate::messages::{EditorMsg, Msg};
use crate::model::AppModel;
use crate::outline::affects_headings;
use crate::slash_menu::handle_key_down;

pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        EditorMsg::KeyDown(event) => {
            let trigger = model.config.slash_menu.trigger_character;
            if let Some(tr) = handle_key_down(&model.editor, &model.slash_menu, &event, trigger) {
                return dispatch_transaction(model, tr);
            }

            match edit_for_key(model, &event) {
                Ok(Some(tr)) => dispatch_transaction(model, tr),
                Ok(None) => None,
                Err(e) => {
                    tracing::debug!(key = %event, "key not applied: {}", e);
                    None
                }
            }
        }

        EditorMsg::Dispatch(tr) => dispatch_transaction(model, tr),

        EditorMsg::BackgroundClicked => Some(Cmd::delay(
            model.config.background_click_delay_ms,
            Msg::Editor(EditorMsg::FocusDocumentEnd),
        )),

        EditorMsg::FocusDocumentEnd => {
            let mut tr = model.editor.tr();
            tr.set_selection(Selection::at_end(&model.editor.doc))
                .scroll_into_view();
            let cmd = dispatch_transaction(model, tr);
            model.ui.focus_editor();
            cmd
        }
    }
}

/// Plain editing for keys the slash menu passed on
fn edit_for_key(model: &AppModel, event: &KeyEvent) -> Result<Option<Transaction>, StepError> {
    let state = &model.editor;
    let mut tr = state.tr();

    if let Some(ch) = event.text() {
        tr.insert_text(&ch.to_string())?.scroll_into_view();
        return Ok(Some(tr));
    }
    if event.mods.is_command() {
        return Ok(None);
    }

    let (from, to) = (state.selection.from(), state.selection.to());
    match event.key {
        Key::Backspace if from < to => {
            tr.delete(from, to)?;
        }
        Key::Backspace => {
            // Joining blocks is not supported; stop at the block start
            let resolved = state.doc.resolve(from)?;
            if !resolved.parent().is_textblock() || resolved.parent_offset == 0 {
                return Ok(None);
            }
            tr.delete(from - 1, from)?;
        }
        Key::Delete if from < to => {
            tr.delete(from, to)?;
        }
        Key::Delete => {
            let resolved = state.doc.resolve(from)?;
            let parent = resolved.parent();
            if !parent.is_textblock() || resolved.parent_offset >= parent.content_size() {
                return Ok(None);
            }
            tr.delete(from, from + 1)?;
        }
        Key::Enter => {
            tr.split_block()?;
        }
        Key::Left if from > 0 => match Selection::near(&state.doc, from - 1, false) {
            Some(selection) => {
                tr.set_selection(selection);
            }
            None => return Ok(None),
        },
        Key::Right if to < state.doc.content_size() => {
            match Selection::near(&state.doc, to + 1, true) {
                Some(selection) => {
                    tr.set_selection(selection);
                }
                None => return Ok(None),
            }
        }
        _ => return Ok(None),
    }
    tr.scroll_into_view();
    Ok(Some(tr))
}

/// Apply a transaction to the editor and the slash menu, then feed the debouncer
pub fn dispatch_transaction(model: &mut AppModel, tr: Transaction) -> Option<Cmd> {
    let new_state = model.editor.apply(&tr);
    model.slash_menu = model.slash_menu.apply(&tr, &new_state);
    model.editor = new_state;

    if tr.is_scroll_into_view() {
        model.ui.request_scroll(model.editor.selection.from());
    }

    let mut cmds = vec![Cmd::RedrawAreas(vec![DamageArea::Editor])];
    if tr.doc_changed() {
        cmds.push(model.debouncer.schedule(DebounceChannel::DocumentTimestamp));
        if affects_headings(&tr) {
            tracing::trace!("heading edit, outline rebuild scheduled");
            cmds.push(model.debouncer.schedule(DebounceChannel::OutlineRebuild));
        }
    }
    Some(Cmd::batch(cmds))
}
