//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use epiphany::commands::Cmd;
use epiphany::config::EditorConfig;
use epiphany::debounce::DebounceChannel;
use epiphany::doc::{Document, Node, Selection};
use epiphany::input::{Key, KeyEvent};
use epiphany::messages::{EditorMsg, Msg, TimerMsg};
use epiphany::model::AppModel;
use epiphany::update::update;

/// A note with a heading hierarchy and body text
///
/// ```text
/// 0 <h1 a>1 Alpha 6</h>7
///   <p>8 one 11</p>12
///   <h2 b>13 Beta 17</h>18
///   <p>19 two 22</p>23
///   <h3 c>24 Gamma 29</h>30
/// ```
pub fn sample_doc() -> Document {
    Document::new(vec![
        Node::heading_with_id(1, "a", "Alpha"),
        Node::paragraph("one"),
        Node::heading_with_id(2, "b", "Beta"),
        Node::paragraph("two"),
        Node::heading_with_id(3, "c", "Gamma"),
    ])
}

/// Create a test model over `doc` with the cursor at `cursor`
pub fn test_model(doc: Document, cursor: usize) -> AppModel {
    let mut model = AppModel::with_loaded_at(doc, EditorConfig::default(), 1_000);
    model.editor.selection = Selection::cursor(cursor);
    model
}

/// Config with short quiet periods for tests that run real timers
pub fn fast_config() -> EditorConfig {
    let mut config = EditorConfig::default();
    config.outline.rebuild_debounce_ms = 30;
    config.outline.click_delay_ms = 5;
    config.timestamp_debounce_ms = 30;
    config.background_click_delay_ms = 5;
    config
}

pub fn key(model: &mut AppModel, key: Key) -> Option<Cmd> {
    update(model, Msg::Editor(EditorMsg::KeyDown(KeyEvent::key(key))))
}

pub fn type_text(model: &mut AppModel, text: &str) -> Vec<Cmd> {
    text.chars()
        .filter_map(|ch| update(model, Msg::Editor(EditorMsg::KeyDown(KeyEvent::char(ch)))))
        .collect()
}

/// Timer messages a command would eventually deliver
pub fn timer_messages(cmd: &Cmd) -> Vec<TimerMsg> {
    match cmd {
        Cmd::StartTimer { channel, token, .. } => vec![TimerMsg::Fired {
            channel: *channel,
            token: *token,
        }],
        Cmd::Batch(cmds) => cmds.iter().flat_map(timer_messages).collect(),
        _ => Vec::new(),
    }
}

pub fn timers_for(cmds: &[Cmd], channel: DebounceChannel) -> Vec<TimerMsg> {
    cmds.iter()
        .flat_map(timer_messages)
        .filter(|msg| matches!(msg, TimerMsg::Fired { channel: c, .. } if *c == channel))
        .collect()
}

/// Deliver every timer message in order, as if all had run out
pub fn fire_all(model: &mut AppModel, timers: Vec<TimerMsg>) {
    for msg in timers {
        update(model, Msg::Timer(msg));
    }
}

pub fn outline_labels(model: &AppModel) -> Vec<String> {
    model
        .outline
        .as_ref()
        .map(|outline| outline.rows.iter().map(|row| row.label.clone()).collect())
        .unwrap_or_default()
}
