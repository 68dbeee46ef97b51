use std::path::PathBuf;

use super::FileHandle;

/// Intents the frontend sends to the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateFile { path: PathBuf, extension: String },
    OpenFile { path: PathBuf },
    SelectFile { handle: FileHandle },
    CloseFile { handle: FileHandle },
    Save,
    MarkDirty,
    ListFolder { dir: PathBuf },
    Edit(EditAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    InsertChar(char),
    InsertText(String),
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MoveLineStart,
    MoveLineEnd,
}

impl EditAction {
    pub fn mutates_text(&self) -> bool {
        matches!(
            self,
            EditAction::InsertChar(_)
                | EditAction::InsertText(_)
                | EditAction::InsertNewline
                | EditAction::InsertTab
                | EditAction::DeleteBackward
                | EditAction::DeleteForward
        )
    }
}
