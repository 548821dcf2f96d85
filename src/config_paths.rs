//! Centralized configuration paths for epiphany
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/epiphany/`
//! - Windows: `%APPDATA%\epiphany\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "epiphany";

/// Base config directory for epiphany
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/epiphany`
///   - Else: `~/.config/epiphany`
///
/// Windows:
///   - `%APPDATA%\epiphany`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/epiphany/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/epiphany/workspaces.json`
pub fn workspace_registry_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("workspaces.json"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure `~/.config/epiphany/logs/` exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = ensure_config_dir()?.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
