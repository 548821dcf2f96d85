//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod editor;
mod outline;
mod timer;
mod ui;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use editor::{dispatch_transaction, update_editor};
pub use outline::update_outline;
pub use timer::update_timer;
pub use ui::update_ui;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Outline(m) => outline::update_outline(model, m),
        Msg::Timer(m) => timer::update_timer(model, m),
        Msg::Ui(m) => ui::update_ui(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Logs the message and the selection movement it caused.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let before = model.editor.selection;
    let result = update_inner(model, msg);
    let after = model.editor.selection;
    if before != after {
        debug!(target: "selection", ?before, ?after, "selection changed");
    }

    result
}

/// Get a display name for a message type
///
/// Transactions are summarized by step count rather than dumped.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{AppMsg, EditorMsg};

    match msg {
        Msg::Editor(EditorMsg::Dispatch(tr)) => {
            format!("Editor::Dispatch({} steps)", tr.steps().len())
        }
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::Outline(m) => format!("Outline::{:?}", m),
        Msg::Timer(m) => format!("Timer::{:?}", m),
        Msg::Ui(m) => format!("Ui::{:?}", m),
        Msg::App(AppMsg::OpenDocument { loaded_at, .. }) => {
            format!("App::OpenDocument(loaded_at={})", loaded_at)
        }
        Msg::App(m) => format!("App::{:?}", m),
    }
}
