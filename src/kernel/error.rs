use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::kernel::services::ports::FileError;

/// Which disk operation a [`SessionError::FileSystem`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    Create,
    Read,
    Write,
    List,
    Persist,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            FsOp::Create => "create",
            FsOp::Read => "read",
            FsOp::Write => "write",
            FsOp::List => "list",
            FsOp::Persist => "persist session to",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not {op} {}: {source}", .path.display())]
    FileSystem {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: FileError,
    },
    #[error("file is not open: {}", .0.display())]
    UnknownHandle(PathBuf),
    #[error("no file is currently open")]
    NoActiveFile,
    #[error("file is already open: {}", .0.display())]
    DuplicateHandle(PathBuf),
}

impl SessionError {
    pub fn fs(op: FsOp, path: impl Into<PathBuf>, source: FileError) -> Self {
        SessionError::FileSystem {
            op,
            path: path.into(),
            source,
        }
    }

    /// The single line shown to the user when this error reaches the controller boundary.
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::FileSystem { op, .. } => match op {
                FsOp::Create => "Could not create the file.",
                FsOp::Read => "Could not open the file.",
                FsOp::Write => "Could not save the file.",
                FsOp::List => "Could not open the folder.",
                FsOp::Persist => "Could not save opened files.",
            },
            SessionError::UnknownHandle(_) => "The file is not open.",
            SessionError::NoActiveFile => "No file is currently open.",
            SessionError::DuplicateHandle(_) => "The file is already open.",
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
