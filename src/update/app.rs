//! App message handlers (document lifecycle, exit)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::AppModel;

pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::OpenDocument { doc, loaded_at } => {
            model.open_document(doc, loaded_at);
            Some(Cmd::Redraw)
        }
        AppMsg::Quit => Some(Cmd::Quit),
    }
}
