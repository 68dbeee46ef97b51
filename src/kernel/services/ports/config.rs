use serde::{Deserialize, Serialize};

/// What `select_file` does with the buffer of the file being switched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectPolicy {
    /// Always re-read from disk; unsaved edits of the target are discarded.
    #[default]
    #[serde(alias = "reloadFromDisk")]
    ReloadFromDisk,
    /// Keep unsaved text in memory per file and restore it on selection.
    #[serde(alias = "keepEdits")]
    KeepEdits,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    #[serde(alias = "tabSize")]
    pub tab_size: u8,
    #[serde(alias = "showLineNumbers")]
    pub show_line_numbers: bool,
    #[serde(alias = "selectPolicy")]
    pub select_policy: SelectPolicy,
    /// Extensions offered by the "create file" command, without the dot.
    #[serde(alias = "newFileExtensions")]
    pub new_file_extensions: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            show_line_numbers: true,
            select_policy: SelectPolicy::ReloadFromDisk,
            new_file_extensions: ["cpp", "h", "java", "py"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl EditorConfig {
    /// Spaces inserted for a Tab key press.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.tab_size.max(1) as usize)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;
