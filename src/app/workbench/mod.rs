//! Workbench: owns the shell, mirrors what the session projects, routes input.

use std::path::{Path, PathBuf};

use ratatui::layout::Rect;
use ratatui::Frame;

use super::theme::UiTheme;
use crate::core::event::InputEvent;
use crate::kernel::services::adapters::SessionFile;
use crate::kernel::services::ports::{Settings, UiProjection};
use crate::kernel::{Action, FileHandle, FileRecord, SessionController, Shell, UserCommand};

mod input;
mod prompt;
mod render;

pub use prompt::{Prompt, PromptAnswer, PromptKind, PromptOutcome};

const HEADER_HEIGHT: u16 = 1;
const STRIP_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const FOLDER_WIDTH_PERCENT: u16 = 25;
const FOLDER_MIN_WIDTH: u16 = 16;

pub const UNSAVED_QUIT_WARNING: &str = "Unsaved changes. Press Ctrl+Q again to quit.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripEntry {
    pub handle: FileHandle,
    pub name: String,
    pub unsaved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPane {
    pub dir: PathBuf,
    pub names: Vec<String>,
    pub selected: usize,
}

/// Last state the shell projected. Rendering reads only this plus the controller's buffer.
#[derive(Debug, Default)]
pub struct Projection {
    pub files: Vec<StripEntry>,
    pub active: Option<FileHandle>,
    pub folder: Option<FolderPane>,
    pub message: Option<String>,
}

impl UiProjection for Projection {
    fn render_files(&mut self, records: &[FileRecord], active: Option<&FileHandle>) {
        self.files = records
            .iter()
            .map(|r| StripEntry {
                handle: r.handle.clone(),
                name: r.handle.name(),
                unsaved: r.unsaved,
            })
            .collect();
        self.active = active.cloned();
    }

    fn render_folder(&mut self, dir: &Path, names: &[String]) {
        self.folder = Some(FolderPane {
            dir: dir.to_path_buf(),
            names: names.to_vec(),
            selected: 0,
        });
    }

    fn notify(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }
}

/// What the event loop does after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    Unchanged,
    Quit,
}

impl Outcome {
    pub fn redraws(self) -> bool {
        self == Outcome::Redraw
    }

    pub fn is_unchanged(self) -> bool {
        self == Outcome::Unchanged
    }

    pub fn is_quit(self) -> bool {
        self == Outcome::Quit
    }
}

/// Which pane receives plain keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Editor,
    Folder,
}

impl Pane {
    pub fn toggled(self) -> Self {
        match self {
            Pane::Editor => Pane::Folder,
            Pane::Folder => Pane::Editor,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Overlay {
    ExtensionMenu { selected: usize },
    Prompt(Prompt),
}

pub struct Workbench {
    shell: Shell,
    view: Projection,
    theme: UiTheme,
    area: Pane,
    overlay: Option<Overlay>,
    quit_armed: bool,
    /// Strip entry picked for closing with Ctrl+W. Any other key drops it.
    marked: Option<FileHandle>,
    /// First buffer row / display column shown in the editor pane.
    scroll: (usize, usize),
    cursor_screen_pos: Option<(u16, u16)>,
}

impl Workbench {
    /// Restores the persisted session (if enabled) and lists `folder` when given.
    pub fn new(settings: &Settings, folder: Option<&Path>) -> Self {
        let controller = SessionController::new(settings.editor.clone());
        let session_file = SessionFile::new(settings.session.file.clone());
        Self::with_shell(
            Shell::new(controller, session_file),
            settings.session.restore_on_startup,
            folder,
        )
    }

    pub fn with_shell(mut shell: Shell, restore: bool, folder: Option<&Path>) -> Self {
        let mut view = Projection::default();
        shell.startup(&mut view, restore);
        if let Some(dir) = folder {
            shell.dispatch(
                Action::ListFolder {
                    dir: dir.to_path_buf(),
                },
                &mut view,
            );
        }

        Self {
            shell,
            view,
            theme: UiTheme::default(),
            area: Pane::Editor,
            overlay: None,
            quit_armed: false,
            marked: None,
            scroll: (0, 0),
            cursor_screen_pos: None,
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn projection(&self) -> &Projection {
        &self.view
    }

    pub fn area(&self) -> Pane {
        self.area
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn marked(&self) -> Option<&FileHandle> {
        self.marked.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.view.message.as_deref()
    }

    /// Persist the session. On failure the message stays in the status line.
    pub fn shutdown(&mut self) -> bool {
        self.shell.shutdown(&mut self.view)
    }

    fn run_command(&mut self, command: UserCommand, answer: Option<PathBuf>) -> bool {
        let changed = match answer {
            Some(path) => self
                .shell
                .run(command, &mut PromptAnswer::new(path), &mut self.view),
            None => self.shell.run(command, &mut NoDialogs, &mut self.view),
        };
        if changed {
            self.scroll = (0, 0);
        }
        changed
    }

    fn dispatch(&mut self, action: Action) -> bool {
        self.shell.dispatch(action, &mut self.view)
    }

    /// Directory prompts start from: the listed folder, else the working directory.
    fn prompt_base(&self) -> PathBuf {
        self.view
            .folder
            .as_ref()
            .map(|f| f.dir.clone())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
    }

    fn strip_index(&self, handle: &FileHandle) -> Option<usize> {
        self.view.files.iter().position(|e| &e.handle == handle)
    }

    fn active_index(&self) -> Option<usize> {
        self.strip_index(self.view.active.as_ref()?)
    }

    fn has_active_file(&self) -> bool {
        self.view.active.is_some()
    }
}

/// For commands that never open a dialog.
struct NoDialogs;

impl crate::kernel::services::ports::Dialogs for NoDialogs {
    fn choose_save_path(&mut self, _extension: &str) -> Option<PathBuf> {
        None
    }

    fn choose_file(&mut self) -> Option<PathBuf> {
        None
    }

    fn choose_directory(&mut self) -> Option<PathBuf> {
        None
    }
}

impl Workbench {
    pub fn handle_input(&mut self, event: &InputEvent) -> Outcome {
        input::handle_input(self, event)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        render::render(self, frame, area);
    }

    /// Terminal cell for the hardware cursor after the last `render`.
    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        self.cursor_screen_pos
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench.rs"]
mod tests;
