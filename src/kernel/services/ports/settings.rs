use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::config::EditorConfig;

pub const DEFAULT_SESSION_FILE: &str = "opened_files.txt";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Snapshot of open paths. Relative paths resolve against the working directory.
    pub file: PathBuf,
    #[serde(alias = "restoreOnStartup")]
    pub restore_on_startup: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_SESSION_FILE),
            restore_on_startup: true,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
