//! Service adapters: OS specific implementations of the ports.

pub mod file;
pub mod session_file;
pub mod settings;

pub use file::LocalFileProvider;
pub use session_file::SessionFile;
pub use settings::{
    config_dir, ensure_settings_file, ensure_settings_file_at, get_settings_path, load_settings,
    load_settings_from,
};
