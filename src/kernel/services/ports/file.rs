//! Disk access contract used by the session controller.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("Already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),
}

impl FileError {
    /// Classify an `io::Error` for `path`, keeping the path for the common kinds.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => FileError::AlreadyExists(path.to_path_buf()),
            _ => FileError::Io(err),
        }
    }
}

/// One child of a listed directory. `is_file` follows symlinks; anything that is not a
/// regular file (directories, sockets, devices) reports `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_file: bool,
}

pub trait FileProvider {
    /// Whole-file read. Fails with `NotFound` / `NotAFile` before touching contents.
    fn read_file_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Truncating write of an existing or new file.
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    /// Create an empty file; fails with `AlreadyExists` rather than truncating.
    fn create_new_file(&self, path: &Path) -> Result<()>;

    /// Immediate children of `path`, unsorted.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    fn is_file(&self, path: &Path) -> bool;
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/file.rs"]
mod tests;
