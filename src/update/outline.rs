//! Outline panel update handlers

use super::editor::dispatch_transaction;
use crate::commands::Cmd;
use crate::doc::Selection;
use crate::messages::{Msg, OutlineMsg};
use crate::model::AppModel;

/// Handle outline panel messages
pub fn update_outline(model: &mut AppModel, msg: OutlineMsg) -> Option<Cmd> {
    match msg {
        OutlineMsg::RowClicked { heading_id } => {
            // The click itself is consumed here; the jump happens after the delay
            Some(Cmd::delay(
                model.config.outline.click_delay_ms,
                Msg::Outline(OutlineMsg::ScrollToHeading { heading_id }),
            ))
        }

        OutlineMsg::ScrollToHeading { heading_id } => {
            // Resolve against the live document: the row may be stale
            let Some(selection) = model
                .editor
                .doc
                .find_heading_by_id(&heading_id)
                .and_then(|pos| Selection::node(&model.editor.doc, pos))
            else {
                tracing::debug!(%heading_id, "outline target no longer exists");
                return None;
            };

            let mut tr = model.editor.tr();
            tr.set_selection(selection).scroll_into_view();
            let cmd = dispatch_transaction(model, tr);
            model.ui.focus_editor();
            cmd
        }
    }
}
