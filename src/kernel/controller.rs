//! Session controller: the only writer of the open-file session.
//!
//! Every operation either completes and leaves the session consistent, or fails without
//! touching it. `dispatch` is the frontend boundary: it turns each failure into exactly
//! one `Effect::Notify`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::{FsOp, Result, SessionError};
use super::services::adapters::LocalFileProvider;
use super::services::ports::{EditorConfig, FileProvider, SelectPolicy};
use super::{Action, EditAction, Effect, FileHandle, Session};
use crate::models::TextBuffer;

pub const NO_FILES_MESSAGE: &str = "No files found in the selected folder.";

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn rendered() -> Self {
        Self {
            effects: vec![Effect::Render],
            state_changed: true,
        }
    }
}

/// Last successful `list_folder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    pub dir: PathBuf,
    pub names: Vec<String>,
}

impl FolderListing {
    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        self.names
            .iter()
            .any(|n| n == name)
            .then(|| self.dir.join(name))
    }
}

pub struct SessionController {
    session: Session,
    buffer: TextBuffer,
    files: Box<dyn FileProvider>,
    config: EditorConfig,
    folder: Option<FolderListing>,
    /// Unsaved text of inactive files; only filled under `SelectPolicy::KeepEdits`.
    stash: HashMap<FileHandle, String>,
}

impl SessionController {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_provider(config, Box::new(LocalFileProvider::new()))
    }

    pub fn with_provider(config: EditorConfig, files: Box<dyn FileProvider>) -> Self {
        Self {
            session: Session::new(),
            buffer: TextBuffer::new(),
            files,
            config,
            folder: None,
            stash: HashMap::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn folder(&self) -> Option<&FolderListing> {
        self.folder.as_ref()
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        tracing::debug!(?action, "dispatch");
        match action {
            Action::CreateFile { path, extension } => match self.create_file(&path, &extension) {
                Ok(_) => DispatchResult::rendered(),
                Err(err) => fail(err),
            },
            Action::OpenFile { path } => match self.open_file(&path) {
                Ok(_) => DispatchResult::rendered(),
                Err(err) => fail(err),
            },
            Action::SelectFile { handle } => match self.select_file(&handle) {
                Ok(()) => DispatchResult::rendered(),
                Err(err) => fail(err),
            },
            Action::CloseFile { handle } => {
                if self.close_file(&handle) {
                    DispatchResult::rendered()
                } else {
                    DispatchResult::unchanged()
                }
            }
            Action::Save => match self.save() {
                Ok(()) => DispatchResult::rendered(),
                Err(err) => fail(err),
            },
            Action::MarkDirty => {
                if self.mark_dirty() {
                    DispatchResult::rendered()
                } else {
                    DispatchResult::unchanged()
                }
            }
            Action::ListFolder { dir } => match self.list_folder(&dir) {
                Ok(listing) => {
                    let mut effects = vec![Effect::RenderFolder {
                        dir: listing.dir.clone(),
                        names: listing.names.clone(),
                    }];
                    if listing.names.is_empty() {
                        effects.push(Effect::Notify(NO_FILES_MESSAGE.to_string()));
                    }
                    DispatchResult {
                        effects,
                        state_changed: true,
                    }
                }
                Err(err) => fail(err),
            },
            Action::Edit(edit) => {
                let was_unsaved = self.session.active_record().is_some_and(|r| r.unsaved);
                let changed = self.edit(edit);
                let now_unsaved = self.session.active_record().is_some_and(|r| r.unsaved);
                DispatchResult {
                    effects: if was_unsaved != now_unsaved {
                        vec![Effect::Render]
                    } else {
                        Vec::new()
                    },
                    state_changed: changed,
                }
            }
        }
    }

    /// Create an empty file at `path` and make it the active, clean file.
    ///
    /// `extension` is the save dialog's filter; it is appended when `path` has none.
    /// A dotfile named after the filter itself (`.py` under `py`) is taken as is.
    pub fn create_file(&mut self, path: &Path, extension: &str) -> Result<FileHandle> {
        let handle = FileHandle::new(with_filter_extension(path, extension));

        self.files
            .create_new_file(handle.path())
            .map_err(|e| SessionError::fs(FsOp::Create, handle.path(), e))?;
        tracing::info!(path = %handle, "file created");

        self.stash_active();
        self.buffer.clear();
        self.activate(handle.clone());
        Ok(handle)
    }

    /// Load `path` into the buffer. Re-opening an open file re-selects it and re-reads it.
    pub fn open_file(&mut self, path: &Path) -> Result<FileHandle> {
        let handle = FileHandle::new(path);
        let text = self.read_text(&handle)?;
        tracing::info!(path = %handle, "file opened");

        self.stash_active();
        self.buffer.replace_text(&text);
        self.activate(handle.clone());
        Ok(handle)
    }

    pub fn select_file(&mut self, handle: &FileHandle) -> Result<()> {
        if !self.session.is_open(handle) {
            return Err(SessionError::UnknownHandle(handle.path().to_path_buf()));
        }

        if self.config.select_policy == SelectPolicy::KeepEdits {
            if self.session.active() == Some(handle) {
                return Ok(());
            }
            if let Some(text) = self.stash.remove(handle) {
                self.stash_active();
                self.buffer.replace_text(&text);
                self.session.set_active(Some(handle.clone()));
                tracing::debug!(path = %handle, "restored unsaved edits");
                return Ok(());
            }
        }

        let text = self.read_text(handle)?;
        self.stash_active();
        self.buffer.replace_text(&text);
        self.activate(handle.clone());
        Ok(())
    }

    /// Returns whether anything was open under `handle`.
    pub fn close_file(&mut self, handle: &FileHandle) -> bool {
        let removed = self.session.records.remove(handle);
        self.stash.remove(handle);

        if self.session.active() == Some(handle) {
            self.buffer.clear();
            self.session.set_active(None);
        }

        if removed {
            tracing::info!(path = %handle, "file closed");
        }
        removed
    }

    pub fn save(&mut self) -> Result<()> {
        let handle = self
            .session
            .active()
            .cloned()
            .ok_or(SessionError::NoActiveFile)?;

        let text = self.buffer.text();
        self.files
            .write_file(handle.path(), &text)
            .map_err(|e| SessionError::fs(FsOp::Write, handle.path(), e))?;

        self.session.records.mark_unsaved(&handle, false)?;
        self.stash.remove(&handle);
        tracing::info!(path = %handle, bytes = text.len(), "file saved");
        Ok(())
    }

    /// Flag the active file as unsaved. Returns whether the flag flipped.
    pub fn mark_dirty(&mut self) -> bool {
        let Some(handle) = self.session.active().cloned() else {
            return false;
        };
        if self.session.records.is_unsaved(&handle) {
            return false;
        }
        match self.session.records.mark_unsaved(&handle, true) {
            Ok(()) => {
                tracing::debug!(path = %handle, "marked unsaved");
                true
            }
            Err(_) => false,
        }
    }

    /// Regular files directly inside `dir`, sorted case-insensitively.
    pub fn list_folder(&mut self, dir: &Path) -> Result<&FolderListing> {
        let entries = self
            .files
            .read_dir(dir)
            .map_err(|e| SessionError::fs(FsOp::List, dir, e))?;

        let mut names: Vec<String> = entries
            .into_iter()
            .filter(|e| e.is_file)
            .map(|e| e.name)
            .collect();
        names.sort_by_cached_key(|n| n.to_lowercase());
        tracing::debug!(dir = %dir.display(), count = names.len(), "folder listed");

        Ok(&*self.folder.insert(FolderListing {
            dir: dir.to_path_buf(),
            names,
        }))
    }

    /// Best-effort reopen of a persisted session. Paths that are gone or not regular
    /// files are skipped without a notification. Returns how many were reopened.
    pub fn restore(&mut self, paths: &[PathBuf]) -> usize {
        let mut restored = 0;
        for path in paths {
            if !self.files.is_file(path) {
                tracing::debug!(path = %path.display(), "skipping missing session entry");
                continue;
            }
            match self.open_file(path) {
                Ok(_) => restored += 1,
                Err(err) => tracing::debug!(error = %err, "skipping unreadable session entry"),
            }
        }
        tracing::info!(restored, total = paths.len(), "session restored");
        restored
    }

    /// Apply a buffer edit. Text mutations mark the active file unsaved.
    /// Returns whether the buffer changed (text or cursor).
    pub fn edit(&mut self, edit: EditAction) -> bool {
        if self.session.active().is_none() {
            return false;
        }
        let mutates = edit.mutates_text();
        let changed = match edit {
            EditAction::InsertChar(c) => {
                self.buffer.insert_char(c);
                true
            }
            EditAction::InsertText(text) => {
                if text.is_empty() {
                    return false;
                }
                self.buffer.insert_str(&text);
                true
            }
            EditAction::InsertNewline => {
                self.buffer.insert_char('\n');
                true
            }
            EditAction::InsertTab => {
                let unit = self.config.indent_unit();
                self.buffer.insert_str(&unit);
                true
            }
            EditAction::DeleteBackward => self.buffer.delete_backward(),
            EditAction::DeleteForward => self.buffer.delete_forward(),
            EditAction::MoveLeft => self.buffer.move_left(),
            EditAction::MoveRight => self.buffer.move_right(),
            EditAction::MoveUp => self.buffer.move_up(),
            EditAction::MoveDown => self.buffer.move_down(),
            EditAction::MoveLineStart => self.buffer.move_line_start(),
            EditAction::MoveLineEnd => self.buffer.move_line_end(),
        };

        if changed && mutates {
            self.mark_dirty();
        }
        changed
    }

    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.session.snapshot()
    }

    fn read_text(&self, handle: &FileHandle) -> Result<String> {
        let bytes = self
            .files
            .read_file_bytes(handle.path())
            .map_err(|e| SessionError::fs(FsOp::Read, handle.path(), e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Add or refresh `handle` as a clean record and make it active.
    fn activate(&mut self, handle: FileHandle) {
        if !self.session.records.open_clean(handle.clone()) {
            tracing::debug!(path = %handle, "refreshed open record");
        }
        self.stash.remove(&handle);
        self.session.set_active(Some(handle));
    }

    /// Under `KeepEdits`, park the active file's unsaved text before the buffer is reused.
    fn stash_active(&mut self) {
        if self.config.select_policy != SelectPolicy::KeepEdits {
            return;
        }
        let Some(record) = self.session.active_record() else {
            return;
        };
        if record.unsaved {
            self.stash.insert(record.handle.clone(), self.buffer.text());
        }
    }
}

fn with_filter_extension(path: &Path, extension: &str) -> PathBuf {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() || path.extension().is_some() {
        return path.to_path_buf();
    }
    let named_after_filter = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_prefix('.'))
        .is_some_and(|rest| rest == extension);
    if named_after_filter {
        return path.to_path_buf();
    }
    path.with_extension(extension)
}

fn fail(err: SessionError) -> DispatchResult {
    tracing::warn!(error = %err, "operation failed");
    DispatchResult {
        effects: vec![Effect::Notify(err.user_message().to_string())],
        state_changed: false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/controller.rs"]
mod tests;
