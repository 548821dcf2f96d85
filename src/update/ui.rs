//! UI message handlers

use crate::commands::{Cmd, DamageArea};
use crate::messages::UiMsg;
use crate::model::AppModel;

pub fn update_ui(model: &mut AppModel, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::ToggleSidebar => {
            let folded = model.ui.toggle_sidebar();
            tracing::debug!(folded, "sidebar toggled");
            Some(Cmd::RedrawAreas(vec![DamageArea::Sidebar]))
        }
    }
}
