//! Open-file records: handle → unsaved flag, iterated in open order.

use super::error::{Result, SessionError};
use super::FileHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub handle: FileHandle,
    pub unsaved: bool,
}

impl FileRecord {
    pub fn new(handle: FileHandle) -> Self {
        Self {
            handle,
            unsaved: false,
        }
    }
}

/// Insertion-ordered record set. Open sessions hold a handful of files, so lookups are
/// linear scans over the `Vec`.
#[derive(Debug, Clone, Default)]
pub struct FileRecordStore {
    records: Vec<FileRecord>,
}

impl FileRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, handle: FileHandle) -> Result<()> {
        if self.has(&handle) {
            return Err(SessionError::DuplicateHandle(handle.path().to_path_buf()));
        }
        self.records.push(FileRecord::new(handle));
        Ok(())
    }

    /// Add `handle` clean, or reset its existing record to clean in place.
    /// Returns whether a new record was added.
    pub fn open_clean(&mut self, handle: FileHandle) -> bool {
        match self.records.iter_mut().find(|r| r.handle == handle) {
            Some(record) => {
                record.unsaved = false;
                false
            }
            None => {
                self.records.push(FileRecord::new(handle));
                true
            }
        }
    }

    /// Returns whether a record was removed. Removing an absent handle is fine.
    pub fn remove(&mut self, handle: &FileHandle) -> bool {
        let before = self.records.len();
        self.records.retain(|r| &r.handle != handle);
        self.records.len() != before
    }

    pub fn mark_unsaved(&mut self, handle: &FileHandle, value: bool) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| &r.handle == handle)
            .ok_or_else(|| SessionError::UnknownHandle(handle.path().to_path_buf()))?;
        record.unsaved = value;
        Ok(())
    }

    pub fn has(&self, handle: &FileHandle) -> bool {
        self.records.iter().any(|r| &r.handle == handle)
    }

    pub fn get(&self, handle: &FileHandle) -> Option<&FileRecord> {
        self.records.iter().find(|r| &r.handle == handle)
    }

    pub fn is_unsaved(&self, handle: &FileHandle) -> bool {
        self.get(handle).is_some_and(|r| r.unsaved)
    }

    pub fn has_unsaved(&self) -> bool {
        self.records.iter().any(|r| r.unsaved)
    }

    pub fn all(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/records.rs"]
mod tests;
