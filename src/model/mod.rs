//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod last_updated;
pub mod ui;

pub use last_updated::{now_epoch_secs, LastUpdated};
pub use ui::UiState;

use crate::config::EditorConfig;
use crate::debounce::Debouncer;
use crate::doc::{Document, EditorState};
use crate::outline::{index_headings, render_outline, IndentRule, OutlineList};
use crate::slash_menu::{Decoration, SlashMenuItem, SlashMenuState};

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Document and selection
    pub editor: EditorState,
    /// Suggestion menu state, advanced by every transaction
    pub slash_menu: SlashMenuState,
    /// Outline panel rows; `None` while the panel is detached
    pub outline: Option<OutlineList>,
    /// Pending deferred work per channel
    pub debouncer: Debouncer,
    pub last_updated: LastUpdated,
    pub ui: UiState,
    pub config: EditorConfig,
}

impl AppModel {
    /// Open `doc`, stamped with the current time
    pub fn new(doc: Document, config: EditorConfig) -> Self {
        Self::with_loaded_at(doc, config, now_epoch_secs())
    }

    /// Open `doc`, stamped with `loaded_at` (Unix epoch seconds)
    pub fn with_loaded_at(doc: Document, config: EditorConfig, loaded_at: u64) -> Self {
        let mut model = Self {
            editor: EditorState::with_doc(doc),
            slash_menu: SlashMenuState::init(),
            outline: Some(OutlineList::default()),
            debouncer: Debouncer::from_config(&config),
            last_updated: LastUpdated::new(loaded_at),
            ui: UiState::default(),
            config,
        };
        model.rebuild_outline();
        model
    }

    /// Swap in another document, resetting per-document state
    pub fn open_document(&mut self, doc: Document, loaded_at: u64) {
        tracing::info!(blocks = doc.blocks().len(), "opening document");
        self.editor = EditorState::with_doc(doc);
        self.slash_menu = SlashMenuState::init();
        self.debouncer = Debouncer::from_config(&self.config);
        self.last_updated = LastUpdated::new(loaded_at);
        self.rebuild_outline();
    }

    pub fn document(&self) -> &Document {
        &self.editor.doc
    }

    pub fn indent_rule(&self) -> IndentRule {
        IndentRule::from(&self.config.outline)
    }

    /// Re-index headings and redraw the outline; false if the panel is detached
    pub fn rebuild_outline(&mut self) -> bool {
        let rule = self.indent_rule();
        let base_padding = self.config.outline.base_padding;
        let Some(container) = self.outline.as_mut() else {
            tracing::debug!("outline detached, rebuild skipped");
            return false;
        };
        let entries = index_headings(&self.editor.doc, rule);
        render_outline(&entries, container, base_padding);
        tracing::debug!(rows = entries.len(), "outline rebuilt");
        true
    }

    pub fn attach_outline(&mut self) {
        if self.outline.is_none() {
            self.outline = Some(OutlineList::default());
            self.rebuild_outline();
        }
    }

    pub fn detach_outline(&mut self) -> Option<OutlineList> {
        self.outline.take()
    }

    /// The suggestion decoration to draw, if the menu is open
    pub fn decoration(&self) -> Option<Decoration> {
        self.slash_menu.decoration(&self.editor)
    }

    /// Menu items offered for the current query (empty while closed)
    pub fn menu_items(&self) -> Vec<&'static SlashMenuItem> {
        if self.slash_menu.active {
            self.slash_menu.items(&self.editor)
        } else {
            Vec::new()
        }
    }
}
