//! Slash menu tests driven through update

mod common;

use common::{key, test_model, type_text};
use epiphany::config::EditorConfig;
use epiphany::doc::{Document, Meta, Node, NodeKind, Selection};
use epiphany::input::{Key, KeyEvent, Modifiers};
use epiphany::messages::{EditorMsg, Msg};
use epiphany::model::AppModel;
use epiphany::slash_menu::{Decoration, SlashMenuMeta};
use epiphany::update::update;

/// `0 <p>1 note 5</p>6`
fn note_model() -> AppModel {
    test_model(Document::new(vec![Node::paragraph("note")]), 5)
}

fn dispatch_meta(model: &mut AppModel, meta: SlashMenuMeta) {
    let mut tr = model.editor.tr();
    tr.set_meta(Meta::SlashMenu(meta));
    update(model, Msg::Editor(EditorMsg::Dispatch(tr)));
}

// ========================================================================
// Activation
// ========================================================================

#[test]
fn test_trigger_opens_menu_with_inline_decoration() {
    let mut model = note_model();
    type_text(&mut model, "\\");

    assert!(model.slash_menu.active);
    assert_eq!(model.slash_menu.query_start_pos, 6);
    assert_eq!(model.editor.doc.blocks()[0].text_content(), "note\\");
    assert_eq!(model.ui.scroll_target, Some(6));

    match model.decoration() {
        Some(Decoration::Inline { from, to, attrs }) => {
            assert_eq!((from, to), (5, 6));
            assert_eq!(attrs.node_name, "span");
            assert_eq!(attrs.class, "suggestion-decorator");
            assert_eq!(attrs.decoration_id, model.slash_menu.decoration_id);
        }
        other => panic!("expected inline decoration, got {:?}", other),
    }
}

#[test]
fn test_configured_trigger_character() {
    let mut config = EditorConfig::default();
    config.slash_menu.trigger_character = '/';
    let mut model = AppModel::with_loaded_at(Document::new(vec![Node::paragraph("")]), config, 0);

    type_text(&mut model, "\\");
    assert!(!model.slash_menu.active);

    type_text(&mut model, "/");
    assert!(model.slash_menu.active);
    assert_eq!(model.slash_menu.trigger_character, "/");
}

#[test]
fn test_command_modifier_does_not_trigger() {
    let mut model = note_model();
    update(
        &mut model,
        Msg::Editor(EditorMsg::KeyDown(KeyEvent::new(
            Key::Char('\\'),
            Modifiers::CTRL,
        ))),
    );
    assert!(!model.slash_menu.active);
    assert_eq!(model.editor.doc.blocks()[0].text_content(), "note");
}

#[test]
fn test_activate_meta_without_trigger_decorates_block() {
    let mut model = note_model();
    dispatch_meta(
        &mut model,
        SlashMenuMeta::Activate {
            trigger_character: None,
        },
    );
    assert!(model.slash_menu.active);
    assert_eq!(model.slash_menu.trigger_character, "");
    match model.decoration() {
        Some(Decoration::Node { from, to, .. }) => assert_eq!((from, to), (0, 6)),
        other => panic!("expected node decoration, got {:?}", other),
    }
}

#[test]
fn test_reactivation_overrides_open_menu() {
    let mut model = note_model();
    type_text(&mut model, "\\");
    key(&mut model, Key::Down);
    key(&mut model, Key::Down);
    let first_id = model.slash_menu.decoration_id.clone();
    assert_eq!(model.slash_menu.keyboard_hovered_item_index, 2);

    dispatch_meta(
        &mut model,
        SlashMenuMeta::Activate {
            trigger_character: Some("\\".to_string()),
        },
    );
    assert!(model.slash_menu.active);
    assert_eq!(model.slash_menu.keyboard_hovered_item_index, 0);
    assert_ne!(model.slash_menu.decoration_id, first_id);
}

// ========================================================================
// Navigation
// ========================================================================

#[test]
fn test_highlight_wraps_both_ways() {
    let mut model = note_model();
    type_text(&mut model, "\\");

    key(&mut model, Key::Up);
    assert_eq!(model.slash_menu.keyboard_hovered_item_index, 9);
    key(&mut model, Key::Down);
    assert_eq!(model.slash_menu.keyboard_hovered_item_index, 0);

    for _ in 0..9 {
        key(&mut model, Key::Down);
    }
    assert_eq!(model.slash_menu.keyboard_hovered_item_index, 9);
    key(&mut model, Key::Down);
    assert_eq!(model.slash_menu.keyboard_hovered_item_index, 0);
    assert_eq!(model.editor.doc.blocks()[0].text_content(), "note\\");
}

#[test]
fn test_query_filters_items() {
    let mut model = note_model();
    type_text(&mut model, "\\co");
    let labels: Vec<&str> = model.menu_items().iter().map(|item| item.label).collect();
    assert_eq!(labels, vec!["Code Block"]);
}

// ========================================================================
// Closing
// ========================================================================

#[test]
fn test_enter_applies_highlighted_item() {
    let mut model = note_model();
    type_text(&mut model, "\\head");
    key(&mut model, Key::Down);
    key(&mut model, Key::Enter);

    let block = &model.editor.doc.blocks()[0];
    assert_eq!(block.kind, NodeKind::Heading);
    assert_eq!(block.level(), 2);
    assert_eq!(block.text_content(), "note");
    assert!(!model.slash_menu.active);
    assert!(model.decoration().is_none());
}

#[test]
fn test_escape_keeps_typed_text() {
    let mut model = note_model();
    type_text(&mut model, "\\xy");
    key(&mut model, Key::Escape);

    assert!(!model.slash_menu.active);
    assert_eq!(model.editor.doc.blocks()[0].text_content(), "note\\xy");
    assert_eq!(model.editor.selection, Selection::cursor(8));
}

#[test]
fn test_highlight_past_matches_only_closes() {
    let mut model = note_model();
    type_text(&mut model, "\\quote");
    key(&mut model, Key::Down);
    key(&mut model, Key::Enter);

    assert!(!model.slash_menu.active);
    assert_eq!(model.editor.doc.blocks()[0].kind, NodeKind::Paragraph);
    assert_eq!(model.editor.doc.blocks()[0].text_content(), "note\\quote");
}
