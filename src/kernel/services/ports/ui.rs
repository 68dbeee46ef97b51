//! Contract between the session core and whatever draws it.

use std::path::{Path, PathBuf};

use crate::kernel::{FileHandle, FileRecord};

/// Modal choosers. `None` means the user cancelled.
pub trait Dialogs {
    /// Pick a path for a new file, filtered to `extension` (no leading dot).
    fn choose_save_path(&mut self, extension: &str) -> Option<PathBuf>;

    fn choose_file(&mut self) -> Option<PathBuf>;

    fn choose_directory(&mut self) -> Option<PathBuf>;
}

pub trait UiProjection {
    /// Open-files strip: every record in open order plus the active one.
    fn render_files(&mut self, records: &[FileRecord], active: Option<&FileHandle>);

    /// Flat folder listing. Entries are file names relative to `dir`.
    fn render_folder(&mut self, dir: &Path, names: &[String]);

    fn notify(&mut self, message: &str);
}
