//! Open-files snapshot: one absolute path per line, UTF-8, no header.

use std::path::PathBuf;

use super::LocalFileProvider;
use crate::kernel::error::{FsOp, Result, SessionError};
use crate::kernel::services::ports::{FileError, FileProvider};

pub struct SessionFile {
    path: PathBuf,
    files: Box<dyn FileProvider>,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_provider(path, Box::new(LocalFileProvider::new()))
    }

    pub fn with_provider(path: impl Into<PathBuf>, files: Box<dyn FileProvider>) -> Self {
        Self {
            path: path.into(),
            files,
        }
    }

    /// Overwrite the snapshot with `paths`, in order.
    pub fn save(&self, paths: &[PathBuf]) -> Result<()> {
        let mut out = String::new();
        for path in paths {
            let line = path.to_string_lossy();
            if line.contains('\n') {
                tracing::warn!(path = %path.display(), "skipping path with newline in session file");
                continue;
            }
            out.push_str(&line);
            out.push('\n');
        }

        self.files
            .write_file(&self.path, &out)
            .map_err(|e| SessionError::fs(FsOp::Persist, &self.path, e))?;

        tracing::info!(path = %self.path.display(), count = paths.len(), "session saved");
        Ok(())
    }

    /// Paths from the last snapshot. A missing or unreadable file means no session.
    pub fn load(&self) -> Vec<PathBuf> {
        let bytes = match self.files.read_file_bytes(&self.path) {
            Ok(bytes) => bytes,
            Err(FileError::NotFound(_)) => return Vec::new(),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "could not read session file, starting empty"
                );
                return Vec::new();
            }
        };

        String::from_utf8_lossy(&bytes)
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/session_file.rs"]
mod tests;
