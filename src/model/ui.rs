//! UI state - focus, sidebar fold and pending scroll requests

/// State of the surfaces around the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Whether the editor has keyboard focus
    pub focused: bool,
    /// Whether the sidebar holding the outline is folded away
    pub sidebar_folded: bool,
    /// Document position the view should bring into view, consumed by the renderer
    pub scroll_target: Option<usize>,
}

impl UiState {
    pub fn focus_editor(&mut self) {
        self.focused = true;
    }

    pub fn request_scroll(&mut self, pos: usize) {
        self.scroll_target = Some(pos);
    }

    /// Hand the pending scroll request to the renderer
    pub fn take_scroll_target(&mut self) -> Option<usize> {
        self.scroll_target.take()
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_folded = !self.sidebar_folded;
        self.sidebar_folded
    }
}
