//! Runtime tests with real timers
//!
//! These use short quiet periods so the timer threads finish quickly.

mod common;

use std::time::Duration;

use common::{fast_config, outline_labels, sample_doc};
use epiphany::doc::Selection;
use epiphany::messages::{AppMsg, EditorMsg, Msg, OutlineMsg, UiMsg};
use epiphany::model::AppModel;
use epiphany::replay::{parse_script, run_script};
use epiphany::runtime::Runtime;

const SETTLE: Duration = Duration::from_secs(5);

fn runtime_at(cursor: usize) -> Runtime {
    let mut model = AppModel::with_loaded_at(sample_doc(), fast_config(), 0);
    model.editor.selection = Selection::cursor(cursor);
    Runtime::new(model)
}

#[test]
fn test_heading_edit_settles_into_outline_and_timestamp() {
    let mut runtime = runtime_at(17);
    let steps = parse_script("type  again\n").unwrap();
    run_script(&mut runtime, &steps).unwrap();

    let model = runtime.model();
    assert_eq!(outline_labels(model), vec!["Alpha", "Beta again", "Gamma"]);
    assert!(model.last_updated.updated_at > 0);
    assert!(!model.debouncer.is_pending(epiphany::debounce::DebounceChannel::OutlineRebuild));
    assert_eq!(runtime.pending_timers(), 0);
}

#[test]
fn test_outline_waits_for_quiet_period() {
    let mut runtime = runtime_at(17);
    for ch in "xy".chars() {
        runtime.dispatch(Msg::Editor(EditorMsg::KeyDown(
            epiphany::input::KeyEvent::char(ch),
        )));
    }
    // Timers are still sleeping
    runtime.process_async_messages();
    assert_eq!(outline_labels(runtime.model()), vec!["Alpha", "Beta", "Gamma"]);

    runtime.run_until_idle(SETTLE).unwrap();
    assert_eq!(outline_labels(runtime.model()), vec!["Alpha", "Betaxy", "Gamma"]);
}

#[test]
fn test_burst_leaves_one_timer_per_channel() {
    let mut config = fast_config();
    config.outline.rebuild_debounce_ms = 400;
    config.timestamp_debounce_ms = 400;
    let mut model = AppModel::with_loaded_at(sample_doc(), config, 0);
    model.editor.selection = Selection::cursor(17);
    let mut runtime = Runtime::new(model);

    for ch in "burst".chars() {
        runtime.dispatch(Msg::Editor(EditorMsg::KeyDown(
            epiphany::input::KeyEvent::char(ch),
        )));
    }

    // Superseded timers are dropped as soon as the timer thread sees them
    let deadline = std::time::Instant::now() + Duration::from_millis(300);
    while runtime.pending_timers() > 2 && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(runtime.pending_timers(), 2);

    runtime.run_until_idle(SETTLE).unwrap();
    assert_eq!(outline_labels(runtime.model()), vec!["Alpha", "Betaburst", "Gamma"]);
}

#[test]
fn test_click_scrolls_after_delay() {
    let mut runtime = runtime_at(0);
    runtime.dispatch(Msg::Outline(OutlineMsg::RowClicked {
        heading_id: "b".to_string(),
    }));
    assert_eq!(runtime.model().editor.selection, Selection::cursor(0));

    runtime.run_until_idle(SETTLE).unwrap();
    let model = runtime.model();
    assert_eq!(model.editor.selection, Selection::Node { from: 12, to: 18 });
    assert!(model.ui.focused);
}

#[test]
fn test_background_click_focuses_document_end() {
    let mut runtime = runtime_at(0);
    let steps = parse_script("background\n").unwrap();
    run_script(&mut runtime, &steps).unwrap();

    let model = runtime.model();
    assert_eq!(model.editor.selection, Selection::at_end(&model.editor.doc));
    assert!(model.ui.focused);
}

#[test]
fn test_detached_outline_is_not_rebuilt() {
    let mut runtime = runtime_at(17);
    runtime.model_mut().detach_outline();

    let steps = parse_script("type z\n").unwrap();
    run_script(&mut runtime, &steps).unwrap();
    assert!(runtime.model().outline.is_none());
    assert_eq!(runtime.model().editor.doc.blocks()[2].text_content(), "Betaz");
}

#[test]
fn test_sidebar_toggle_and_quit() {
    let mut runtime = runtime_at(0);
    runtime.dispatch(Msg::Ui(UiMsg::ToggleSidebar));
    assert!(runtime.model().ui.sidebar_folded);
    assert_eq!(runtime.frames(), 1);

    runtime.dispatch(Msg::App(AppMsg::Quit));
    assert!(runtime.should_quit());
}

#[test]
fn test_slash_menu_script() {
    let mut runtime = runtime_at(22);
    let steps = parse_script(
        "key Enter\n\
         type Closing\n\
         type \\h1\n\
         key Enter\n",
    )
    .unwrap();
    run_script(&mut runtime, &steps).unwrap();

    assert!(!runtime.model().slash_menu.active);
    assert_eq!(
        outline_labels(runtime.model()),
        vec!["Alpha", "Beta", "Closing", "Gamma"]
    );
}
