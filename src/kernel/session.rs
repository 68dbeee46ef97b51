use std::path::PathBuf;

use super::records::{FileRecord, FileRecordStore};
use super::FileHandle;

/// Open files plus the active selection.
///
/// `active`, when set, always names a handle in `records`. Only the controller holds a
/// `&mut Session`; everything else sees it through `&Session`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(super) records: FileRecordStore,
    pub(super) active: Option<FileHandle>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[FileRecord] {
        self.records.all()
    }

    pub fn store(&self) -> &FileRecordStore {
        &self.records
    }

    pub fn active(&self) -> Option<&FileHandle> {
        self.active.as_ref()
    }

    pub fn active_record(&self) -> Option<&FileRecord> {
        self.active.as_ref().and_then(|h| self.records.get(h))
    }

    pub fn is_open(&self, handle: &FileHandle) -> bool {
        self.records.has(handle)
    }

    /// Open paths in open order, as written to the session file.
    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.records
            .all()
            .iter()
            .map(|r| r.handle.path().to_path_buf())
            .collect()
    }

    pub(super) fn set_active(&mut self, handle: Option<FileHandle>) {
        debug_assert!(handle.as_ref().map_or(true, |h| self.records.has(h)));
        self.active = handle;
    }
}
