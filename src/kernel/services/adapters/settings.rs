//! `settings.json` in the per-user config directory.

use crate::kernel::services::ports::settings::Settings;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "slate";
const SETTINGS_FILE: &str = "settings.json";

/// `$XDG_CONFIG_HOME/slate` (else `~/.config/slate`), `~/Library/Preferences/slate` on
/// macOS, `%APPDATA%\slate` on Windows. Empty variables count as unset.
pub fn config_dir() -> Option<PathBuf> {
    let var = |key: &str| {
        std::env::var_os(key)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    };

    let base = if cfg!(windows) {
        var("APPDATA")
    } else if cfg!(target_os = "macos") {
        var("HOME").map(|home| home.join("Library").join("Preferences"))
    } else {
        var("XDG_CONFIG_HOME").or_else(|| var("HOME").map(|home| home.join(".config")))
    };
    base.map(|dir| dir.join(APP_DIR))
}

pub fn get_settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(SETTINGS_FILE))
}

/// Write the default settings on first run so users have something to edit.
pub fn ensure_settings_file() -> io::Result<PathBuf> {
    let path = get_settings_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

/// An existing file at `path` is left alone, even when it does not parse.
pub fn ensure_settings_file_at(path: &Path) -> io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(&Settings::default())?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), "wrote default settings");
    Ok(())
}

pub fn load_settings() -> Option<Settings> {
    let path = get_settings_path()?;
    load_settings_from(&path)
}

/// Missing or malformed files yield `None`; callers fall back to defaults.
pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring malformed settings");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
