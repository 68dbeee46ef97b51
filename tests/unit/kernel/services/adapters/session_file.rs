use super::*;
use crate::kernel::services::ports::{DirEntry, FileResult};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tempfile::tempdir;

#[test]
fn save_writes_one_path_per_line_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("opened_files.txt");
    let file = SessionFile::new(&path);

    file.save(&[PathBuf::from("/w/a.py"), PathBuf::from("/w/b.h")])
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "/w/a.py\n/w/b.h\n");
}

#[test]
fn save_overwrites_previous_snapshot() {
    let dir = tempdir().unwrap();
    let file = SessionFile::new(dir.path().join("opened_files.txt"));

    file.save(&[PathBuf::from("/w/a.py"), PathBuf::from("/w/b.py")])
        .unwrap();
    file.save(&[PathBuf::from("/w/c.py")]).unwrap();

    assert_eq!(file.load(), vec![PathBuf::from("/w/c.py")]);
}

#[test]
fn save_empty_session_leaves_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("opened_files.txt");
    let file = SessionFile::new(&path);

    file.save(&[]).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert!(file.load().is_empty());
}

#[test]
fn load_preserves_order_and_skips_blank_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("opened_files.txt");
    std::fs::write(&path, "/w/c.py\n\n/w/a.py\r\n/w/b.py").unwrap();

    let loaded = SessionFile::new(&path).load();
    assert_eq!(
        loaded,
        vec![
            PathBuf::from("/w/c.py"),
            PathBuf::from("/w/a.py"),
            PathBuf::from("/w/b.py"),
        ]
    );
}

#[test]
fn load_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let file = SessionFile::new(dir.path().join("absent.txt"));
    assert!(file.load().is_empty());
}

#[test]
fn load_unreadable_file_is_empty() {
    let dir = tempdir().unwrap();
    // A directory exists but cannot be read as text.
    let file = SessionFile::new(dir.path());
    assert!(file.load().is_empty());
}

#[test]
fn save_failure_is_filesystem_error() {
    let dir = tempdir().unwrap();
    let file = SessionFile::new(dir.path().join("missing").join("opened_files.txt"));

    let err = file.save(&[PathBuf::from("/w/a.py")]).unwrap_err();
    assert!(matches!(
        err,
        SessionError::FileSystem {
            op: FsOp::Persist,
            ..
        }
    ));
    assert_eq!(err.user_message(), "Could not save opened files.");
}

/// In-memory disk shared with the test so writes can be inspected.
#[derive(Default, Clone)]
struct MemoryDisk {
    written: Rc<RefCell<Vec<(PathBuf, String)>>>,
    stored: Option<Vec<u8>>,
}

impl FileProvider for MemoryDisk {
    fn read_file_bytes(&self, path: &Path) -> FileResult<Vec<u8>> {
        self.stored
            .clone()
            .ok_or_else(|| FileError::NotFound(path.to_path_buf()))
    }

    fn write_file(&self, path: &Path, content: &str) -> FileResult<()> {
        self.written
            .borrow_mut()
            .push((path.to_path_buf(), content.to_string()));
        Ok(())
    }

    fn create_new_file(&self, path: &Path) -> FileResult<()> {
        Err(FileError::PermissionDenied(path.to_path_buf()))
    }

    fn read_dir(&self, path: &Path) -> FileResult<Vec<DirEntry>> {
        Err(FileError::NotADirectory(path.to_path_buf()))
    }

    fn is_file(&self, _path: &Path) -> bool {
        self.stored.is_some()
    }
}

#[test]
fn snapshot_goes_through_injected_provider() {
    let disk = MemoryDisk::default();
    let file = SessionFile::with_provider("/state/opened_files.txt", Box::new(disk.clone()));

    file.save(&[PathBuf::from("/w/a.py"), PathBuf::from("/w/b.py")])
        .unwrap();

    assert_eq!(
        *disk.written.borrow(),
        [(
            PathBuf::from("/state/opened_files.txt"),
            "/w/a.py\n/w/b.py\n".to_string()
        )]
    );
    assert!(file.load().is_empty());
}

#[test]
fn load_decodes_provider_bytes_lossily() {
    let disk = MemoryDisk {
        stored: Some(b"/w/a.py\n/w/\xffb.py\n".to_vec()),
        ..MemoryDisk::default()
    };
    let file = SessionFile::with_provider("/state/opened_files.txt", Box::new(disk));

    assert_eq!(
        file.load(),
        vec![PathBuf::from("/w/a.py"), PathBuf::from("/w/\u{fffd}b.py")]
    );
}
