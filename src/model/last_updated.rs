//! "Document updated" time shown above the editor

use std::time::SystemTime;

/// Seconds since the Unix epoch
pub fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Tracks when the document was last updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastUpdated {
    /// Unix epoch seconds
    pub updated_at: u64,
}

impl LastUpdated {
    pub fn new(updated_at: u64) -> Self {
        Self { updated_at }
    }

    pub fn document_updated(&mut self, at: u64) {
        tracing::debug!(at, "document updated");
        self.updated_at = at;
    }

    /// Human-readable time since the last update, relative to `now`
    pub fn time_ago(&self, now: u64) -> String {
        let diff = now.saturating_sub(self.updated_at);

        if diff < 60 {
            "just now".to_string()
        } else if diff < 3600 {
            let mins = diff / 60;
            format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
        } else if diff < 86400 {
            let hours = diff / 3600;
            format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
        } else if diff < 604800 {
            let days = diff / 86400;
            format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
        } else {
            let weeks = diff / 604800;
            format!("{} week{} ago", weeks, if weeks == 1 { "" } else { "s" })
        }
    }
}
