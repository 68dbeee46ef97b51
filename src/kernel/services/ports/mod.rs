//! Service ports: traits + data contracts.

pub mod config;
pub mod file;
pub mod settings;
pub mod ui;

pub use config::{EditorConfig, SelectPolicy};
pub use file::{DirEntry, FileError, FileProvider, Result as FileResult};
pub use settings::{SessionSettings, Settings, DEFAULT_SESSION_FILE};
pub use ui::{Dialogs, UiProjection};
