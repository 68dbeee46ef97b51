use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{
    Outcome, Overlay, Pane, Prompt, PromptKind, PromptOutcome, Workbench, UNSAVED_QUIT_WARNING,
};
use crate::core::event::InputEvent;
use crate::core::Key;
use crate::kernel::{Action, EditAction, UserCommand};

pub(super) fn handle_input(workbench: &mut Workbench, event: &InputEvent) -> Outcome {
    match event {
        InputEvent::Key(_) => match event.as_key_press() {
            Some(key_event) => workbench.handle_key_event(key_event),
            None => Outcome::Unchanged,
        },
        InputEvent::Paste(text) => workbench.handle_paste(text),
        InputEvent::Resize(_, _) => Outcome::Redraw,
        InputEvent::Other => Outcome::Unchanged,
    }
}

/// Ctrl+Shift+Left/Right walk the strip mark.
fn is_mark_key(key: Key) -> bool {
    key.is_ctrl()
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && matches!(key.code, KeyCode::Left | KeyCode::Right)
}

fn consumed_if(changed: bool) -> Outcome {
    if changed {
        Outcome::Redraw
    } else {
        Outcome::Unchanged
    }
}

impl Workbench {
    fn handle_key_event(&mut self, event: &KeyEvent) -> Outcome {
        let key = Key::from(event);

        let is_quit = key == Key::ctrl(KeyCode::Char('q'));
        if !is_quit {
            self.quit_armed = false;
        }
        if !is_mark_key(key) && key != Key::ctrl(KeyCode::Char('w')) {
            self.marked = None;
        }
        // A notice lives until the next key press.
        let had_message = self.view.message.take().is_some();

        if self.overlay.is_some() {
            self.handle_overlay_key(key);
            return Outcome::Redraw;
        }

        if let Some(result) = self.handle_global_key(key) {
            return result;
        }

        let result = match self.area {
            Pane::Folder => self.handle_folder_key(key),
            Pane::Editor => self.handle_editor_key(key),
        };
        if had_message && result.is_unchanged() {
            return Outcome::Redraw;
        }
        result
    }

    fn handle_global_key(&mut self, key: Key) -> Option<Outcome> {
        if !key.is_ctrl() {
            return None;
        }

        let result = match key.code {
            KeyCode::Char('q') => self.request_quit(),
            KeyCode::Char('s') => {
                self.run_command(UserCommand::Save, None);
                Outcome::Redraw
            }
            KeyCode::Char('o') => {
                self.open_prompt(PromptKind::OpenFile);
                Outcome::Redraw
            }
            KeyCode::Char('d') => {
                self.open_prompt(PromptKind::OpenFolder);
                Outcome::Redraw
            }
            KeyCode::Char('n') => {
                if self.shell.controller().config().new_file_extensions.is_empty() {
                    return Some(Outcome::Unchanged);
                }
                self.overlay = Some(Overlay::ExtensionMenu { selected: 0 });
                Outcome::Redraw
            }
            KeyCode::Char('w') => self.close_marked_or_active(),
            KeyCode::Char('l') => {
                self.area = self.area.toggled();
                Outcome::Redraw
            }
            KeyCode::Left if is_mark_key(key) => self.mark_relative(-1),
            KeyCode::Right if is_mark_key(key) => self.mark_relative(1),
            KeyCode::Left => self.select_relative(-1),
            KeyCode::Right => self.select_relative(1),
            _ => return None,
        };
        Some(result)
    }

    fn request_quit(&mut self) -> Outcome {
        let unsaved = self.shell.controller().session().store().has_unsaved();
        if unsaved && !self.quit_armed {
            self.quit_armed = true;
            self.view.message = Some(UNSAVED_QUIT_WARNING.to_string());
            return Outcome::Redraw;
        }
        Outcome::Quit
    }

    /// Wraps around the open-files strip.
    fn select_relative(&mut self, step: isize) -> Outcome {
        let len = self.view.files.len();
        if len == 0 {
            return Outcome::Unchanged;
        }

        let next = match self.active_index() {
            Some(current) => (current as isize + step).rem_euclid(len as isize) as usize,
            None if step < 0 => len - 1,
            None => 0,
        };
        if Some(next) == self.active_index() {
            return Outcome::Unchanged;
        }

        let handle = self.view.files[next].handle.clone();
        self.run_command(UserCommand::Select(handle), None);
        Outcome::Redraw
    }

    /// Moves the strip mark without touching the buffer or the active file.
    fn mark_relative(&mut self, step: isize) -> Outcome {
        let len = self.view.files.len();
        if len == 0 {
            return Outcome::Unchanged;
        }

        let from = self
            .marked
            .as_ref()
            .and_then(|handle| self.strip_index(handle))
            .or_else(|| self.active_index());
        let next = match from {
            Some(current) => (current as isize + step).rem_euclid(len as isize) as usize,
            None if step < 0 => len - 1,
            None => 0,
        };
        self.marked = Some(self.view.files[next].handle.clone());
        Outcome::Redraw
    }

    fn close_marked_or_active(&mut self) -> Outcome {
        let marked = self
            .marked
            .take()
            .filter(|handle| self.strip_index(handle).is_some());
        match marked.or_else(|| self.view.active.clone()) {
            Some(handle) => consumed_if(self.run_command(UserCommand::Close(handle), None)),
            None => Outcome::Unchanged,
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        let base = self.prompt_base();
        self.overlay = Some(Overlay::Prompt(Prompt::new(kind, &base)));
    }

    fn handle_overlay_key(&mut self, key: Key) {
        let Some(overlay) = self.overlay.take() else {
            return;
        };

        match overlay {
            Overlay::ExtensionMenu { selected } => {
                let extensions = self.shell.controller().config().new_file_extensions.clone();
                let count = extensions.len();
                let picked = match key.code {
                    KeyCode::Esc => return,
                    KeyCode::Enter => Some(selected),
                    KeyCode::Char(ch) if !key.is_ctrl() => ch
                        .to_digit(10)
                        .map(|d| d as usize)
                        .filter(|d| (1..=count).contains(d))
                        .map(|d| d - 1),
                    _ => None,
                };

                if let Some(index) = picked {
                    if let Some(extension) = extensions.get(index).cloned() {
                        self.open_prompt(PromptKind::SavePath { extension });
                    }
                    return;
                }

                let selected = match key.code {
                    KeyCode::Up => selected.checked_sub(1).unwrap_or(count.saturating_sub(1)),
                    KeyCode::Down if count > 0 => (selected + 1) % count,
                    _ => selected,
                };
                self.overlay = Some(Overlay::ExtensionMenu { selected });
            }
            Overlay::Prompt(mut prompt) => match prompt.handle_key(key) {
                PromptOutcome::Pending => self.overlay = Some(Overlay::Prompt(prompt)),
                PromptOutcome::Cancel => {}
                PromptOutcome::Submit(path) => self.submit_prompt(prompt.kind().clone(), path),
            },
        }
    }

    fn submit_prompt(&mut self, kind: PromptKind, path: std::path::PathBuf) {
        let command = match kind {
            PromptKind::SavePath { extension } => UserCommand::CreateFile { extension },
            PromptKind::OpenFile => UserCommand::OpenFile,
            PromptKind::OpenFolder => UserCommand::OpenFolder,
        };
        let opens_file = !matches!(command, UserCommand::OpenFolder);

        if self.run_command(command, Some(path)) {
            self.area = if opens_file {
                Pane::Editor
            } else {
                Pane::Folder
            };
        }
    }

    fn handle_folder_key(&mut self, key: Key) -> Outcome {
        let Some(folder) = self.view.folder.as_mut() else {
            if key.code == KeyCode::Esc {
                self.area = Pane::Editor;
                return Outcome::Redraw;
            }
            return Outcome::Unchanged;
        };

        match key.code {
            KeyCode::Up => {
                folder.selected = folder.selected.saturating_sub(1);
                Outcome::Redraw
            }
            KeyCode::Down => {
                if folder.selected + 1 < folder.names.len() {
                    folder.selected += 1;
                }
                Outcome::Redraw
            }
            KeyCode::Home => {
                folder.selected = 0;
                Outcome::Redraw
            }
            KeyCode::End => {
                folder.selected = folder.names.len().saturating_sub(1);
                Outcome::Redraw
            }
            KeyCode::Enter => {
                let Some(name) = folder.names.get(folder.selected).cloned() else {
                    return Outcome::Unchanged;
                };
                if self.run_command(UserCommand::OpenListed { name }, None) {
                    self.area = Pane::Editor;
                }
                Outcome::Redraw
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.area = Pane::Editor;
                Outcome::Redraw
            }
            _ => Outcome::Unchanged,
        }
    }

    fn handle_editor_key(&mut self, key: Key) -> Outcome {
        if !self.has_active_file() {
            return Outcome::Unchanged;
        }

        let edit = if let Some(ch) = key.typed_char() {
            EditAction::InsertChar(ch)
        } else {
            if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                return Outcome::Unchanged;
            }
            match key.code {
                KeyCode::Enter => EditAction::InsertNewline,
                KeyCode::Tab => EditAction::InsertTab,
                KeyCode::Backspace => EditAction::DeleteBackward,
                KeyCode::Delete => EditAction::DeleteForward,
                KeyCode::Left => EditAction::MoveLeft,
                KeyCode::Right => EditAction::MoveRight,
                KeyCode::Up => EditAction::MoveUp,
                KeyCode::Down => EditAction::MoveDown,
                KeyCode::Home => EditAction::MoveLineStart,
                KeyCode::End => EditAction::MoveLineEnd,
                _ => return Outcome::Unchanged,
            }
        };

        consumed_if(self.dispatch(Action::Edit(edit)))
    }

    fn handle_paste(&mut self, text: &str) -> Outcome {
        if let Some(Overlay::Prompt(prompt)) = self.overlay.as_mut() {
            prompt.paste(text);
            return Outcome::Redraw;
        }
        if self.overlay.is_some() || self.area != Pane::Editor || !self.has_active_file() {
            return Outcome::Unchanged;
        }

        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        consumed_if(self.dispatch(Action::Edit(EditAction::InsertText(text))))
    }
}
