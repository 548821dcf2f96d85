//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::debounce::{DebounceChannel, TimerToken};
use crate::doc::{Document, Transaction};
use crate::input::KeyEvent;

/// Editor messages (input and transactions)
#[derive(Debug, Clone)]
pub enum EditorMsg {
    /// A key press, offered to the slash menu before the document
    KeyDown(KeyEvent),
    /// Apply a transaction built elsewhere
    Dispatch(Transaction),
    /// Click on the empty editor area below the content
    BackgroundClicked,
    /// Move the cursor to the end of the document (delayed half of a background click)
    FocusDocumentEnd,
}

/// Outline panel messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineMsg {
    /// A row was clicked; scrolling follows after a short delay
    RowClicked { heading_id: String },
    /// Select and reveal the heading carrying this id
    ScrollToHeading { heading_id: String },
}

/// Debounce timer messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMsg {
    /// A timer started by `Cmd::StartTimer` ran out
    Fired {
        channel: DebounceChannel,
        token: TimerToken,
    },
}

/// UI state messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMsg {
    /// Fold or unfold the sidebar holding the outline
    ToggleSidebar,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Replace the open document; `loaded_at` is in Unix epoch seconds
    OpenDocument { doc: Document, loaded_at: u64 },
    /// Stop the runtime
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Editor(EditorMsg),
    Outline(OutlineMsg),
    Timer(TimerMsg),
    Ui(UiMsg),
    App(AppMsg),
}
