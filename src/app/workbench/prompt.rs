//! Single-line path prompts standing in for file dialogs.

use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;

use crate::core::Key;
use crate::kernel::services::ports::Dialogs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    SavePath { extension: String },
    OpenFile,
    OpenFolder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Pending,
    Submit(PathBuf),
    Cancel,
}

#[derive(Debug, Clone)]
pub struct Prompt {
    kind: PromptKind,
    input: String,
    /// Char index into `input`.
    cursor: usize,
}

impl Prompt {
    /// Prefilled with `base` and a trailing separator so the user types only the name.
    pub fn new(kind: PromptKind, base: &Path) -> Self {
        let mut input = base.display().to_string();
        if !input.is_empty() && !input.ends_with(std::path::MAIN_SEPARATOR) {
            input.push(std::path::MAIN_SEPARATOR);
        }
        let cursor = input.chars().count();
        Self {
            kind,
            input,
            cursor,
        }
    }

    pub fn kind(&self) -> &PromptKind {
        &self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn title(&self) -> String {
        match &self.kind {
            PromptKind::SavePath { extension } => format!("New .{extension} file"),
            PromptKind::OpenFile => "Open file".to_string(),
            PromptKind::OpenFolder => "Open folder".to_string(),
        }
    }

    pub fn handle_key(&mut self, key: Key) -> PromptOutcome {
        if let Some(ch) = key.typed_char() {
            self.insert(ch);
            return PromptOutcome::Pending;
        }

        match key.code {
            KeyCode::Esc => PromptOutcome::Cancel,
            KeyCode::Enter => match resolve_input(&self.input) {
                Some(path) => PromptOutcome::Submit(path),
                None => PromptOutcome::Cancel,
            },
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.input.remove(at);
                }
                PromptOutcome::Pending
            }
            KeyCode::Delete => {
                if self.cursor < self.input.chars().count() {
                    let at = self.byte_index(self.cursor);
                    self.input.remove(at);
                }
                PromptOutcome::Pending
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                PromptOutcome::Pending
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
                PromptOutcome::Pending
            }
            KeyCode::Home => {
                self.cursor = 0;
                PromptOutcome::Pending
            }
            KeyCode::End => {
                self.cursor = self.input.chars().count();
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }

    /// Pasted text goes in up to its first line break.
    pub fn paste(&mut self, text: &str) {
        let line = text.lines().next().unwrap_or_default();
        for ch in line.chars() {
            self.insert(ch);
        }
    }

    fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.input.insert(at, ch);
        self.cursor += 1;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

/// Blank input counts as a cancel. A leading `~` expands to `$HOME`.
fn resolve_input(input: &str) -> Option<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input == "~" || input.starts_with("~/") {
        if let Ok(home) = std::env::var("HOME") {
            let rest = input.trim_start_matches('~').trim_start_matches('/');
            return Some(PathBuf::from(home).join(rest));
        }
    }

    Some(PathBuf::from(input))
}

/// Answers the next dialog with a path a prompt already collected.
pub struct PromptAnswer(Option<PathBuf>);

impl PromptAnswer {
    pub fn new(path: PathBuf) -> Self {
        Self(Some(path))
    }
}

impl Dialogs for PromptAnswer {
    fn choose_save_path(&mut self, _extension: &str) -> Option<PathBuf> {
        self.0.take()
    }

    fn choose_file(&mut self) -> Option<PathBuf> {
        self.0.take()
    }

    fn choose_directory(&mut self) -> Option<PathBuf> {
        self.0.take()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench/prompt.rs"]
mod tests;
