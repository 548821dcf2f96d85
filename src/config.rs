//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/epiphany/config.yaml`

use serde::{Deserialize, Serialize};

/// Outline panel settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Quiet period before the outline is rebuilt after heading edits
    pub rebuild_debounce_ms: u64,
    /// Delay between a row click and the scroll to its heading
    pub click_delay_ms: u64,
    /// Indentation added or removed per level transition
    pub indent_step: i32,
    /// Level treated as the top heading level
    pub baseline_level: u8,
    /// Left padding of an unindented row
    pub base_padding: i32,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            rebuild_debounce_ms: 3000,
            click_delay_ms: 100,
            indent_step: 10,
            baseline_level: 2,
            base_padding: 16,
        }
    }
}

/// Slash menu settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlashMenuConfig {
    /// Key that opens the menu
    pub trigger_character: char,
}

impl Default for SlashMenuConfig {
    fn default() -> Self {
        Self {
            trigger_character: '\\',
        }
    }
}

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub outline: OutlineConfig,

    #[serde(default)]
    pub slash_menu: SlashMenuConfig,

    /// Quiet period before the "document updated" time is refreshed
    #[serde(default = "default_timestamp_debounce_ms")]
    pub timestamp_debounce_ms: u64,

    /// Delay before a click on the empty editor area moves the cursor
    #[serde(default = "default_background_click_delay_ms")]
    pub background_click_delay_ms: u64,
}

fn default_timestamp_debounce_ms() -> u64 {
    3000
}

fn default_background_click_delay_ms() -> u64 {
    100
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            outline: OutlineConfig::default(),
            slash_menu: SlashMenuConfig::default(),
            timestamp_debounce_ms: default_timestamp_debounce_ms(),
            background_click_delay_ms: default_background_click_delay_ms(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
