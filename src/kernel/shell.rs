//! Glue between user commands, the UI collaborator and the session controller.

use super::controller::{DispatchResult, SessionController};
use super::services::adapters::SessionFile;
use super::services::ports::{Dialogs, UiProjection};
use super::{Action, Effect, FileHandle};

/// Menu / keyboard level commands. Each maps to one controller operation, some after a
/// dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    CreateFile { extension: String },
    OpenFile,
    OpenFolder,
    /// Open an entry of the current folder listing by name.
    OpenListed { name: String },
    Save,
    Select(FileHandle),
    Close(FileHandle),
}

pub struct Shell {
    controller: SessionController,
    session_file: SessionFile,
}

impl Shell {
    pub fn new(controller: SessionController, session_file: SessionFile) -> Self {
        Self {
            controller,
            session_file,
        }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Reopen the persisted session (if `restore`) and draw the initial strip.
    pub fn startup(&mut self, ui: &mut dyn UiProjection, restore: bool) {
        if restore {
            let paths = self.session_file.load();
            self.controller.restore(&paths);
        }
        self.project(ui);
    }

    /// Returns whether controller state changed.
    pub fn run(
        &mut self,
        command: UserCommand,
        dialogs: &mut dyn Dialogs,
        ui: &mut dyn UiProjection,
    ) -> bool {
        let action = match command {
            UserCommand::CreateFile { extension } => {
                let Some(path) = dialogs.choose_save_path(&extension) else {
                    return false;
                };
                Action::CreateFile { path, extension }
            }
            UserCommand::OpenFile => {
                let Some(path) = dialogs.choose_file() else {
                    return false;
                };
                Action::OpenFile { path }
            }
            UserCommand::OpenFolder => {
                let Some(dir) = dialogs.choose_directory() else {
                    return false;
                };
                Action::ListFolder { dir }
            }
            UserCommand::OpenListed { name } => {
                let Some(path) = self.controller.folder().and_then(|f| f.path_of(&name)) else {
                    tracing::debug!(%name, "not in current folder listing");
                    return false;
                };
                Action::OpenFile { path }
            }
            UserCommand::Save => Action::Save,
            UserCommand::Select(handle) => Action::SelectFile { handle },
            UserCommand::Close(handle) => Action::CloseFile { handle },
        };

        self.dispatch(action, ui)
    }

    pub fn dispatch(&mut self, action: Action, ui: &mut dyn UiProjection) -> bool {
        let result = self.controller.dispatch(action);
        self.apply(result, ui)
    }

    /// Persist the open-file set. A failure is shown to the user and logged; the caller
    /// still exits. Returns whether the snapshot was written.
    pub fn shutdown(&mut self, ui: &mut dyn UiProjection) -> bool {
        match self.session_file.save(&self.controller.snapshot()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "could not persist session");
                ui.notify(err.user_message());
                false
            }
        }
    }

    fn project(&self, ui: &mut dyn UiProjection) {
        let session = self.controller.session();
        ui.render_files(session.records(), session.active());
    }

    fn apply(&self, result: DispatchResult, ui: &mut dyn UiProjection) -> bool {
        for effect in result.effects {
            match effect {
                Effect::Render => self.project(ui),
                Effect::RenderFolder { dir, names } => ui.render_folder(&dir, &names),
                Effect::Notify(message) => ui.notify(&message),
            }
        }
        result.state_changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/shell.rs"]
mod tests;
