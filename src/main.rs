use std::path::PathBuf;

use slate::kernel::services::adapters::{ensure_settings_file, load_settings};

mod logging;

fn main() -> std::io::Result<()> {
    let logging = logging::init();

    if let Err(err) = ensure_settings_file() {
        tracing::warn!(error = %err, "could not write default settings");
    }
    let settings = load_settings().unwrap_or_default();

    // Optional folder to list on startup.
    let folder = std::env::args_os().nth(1).map(PathBuf::from);
    tracing::info!(
        folder = ?folder,
        session_file = %settings.session.file.display(),
        log_dir = ?logging.as_ref().map(|g| g.log_dir().to_path_buf()),
        "starting"
    );

    slate::app::run(&settings, folder.as_deref())
}
