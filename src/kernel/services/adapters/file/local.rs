//! Local filesystem provider.

use crate::kernel::services::ports::file::{DirEntry, FileError, FileProvider, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub struct LocalFileProvider;

impl LocalFileProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProvider for LocalFileProvider {
    fn read_file_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::read(path).map_err(|e| FileError::from_io(path, e))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if path.is_dir() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::write(path, content).map_err(|e| FileError::from_io(path, e))
    }

    fn create_new_file(&self, path: &Path) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| FileError::from_io(path, e))?;
        file.flush().map_err(|e| FileError::from_io(path, e))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !path.exists() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FileError::NotADirectory(path.to_path_buf()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| FileError::from_io(path, e))? {
            let entry = entry?;
            // Follows symlinks, so a link to a regular file lists as a file.
            let Ok(metadata) = fs::metadata(entry.path()) else {
                continue;
            };

            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path(),
                is_file: metadata.is_file(),
            });
        }

        Ok(entries)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/local.rs"]
mod tests;
