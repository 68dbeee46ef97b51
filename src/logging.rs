use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const APP_DIR: &str = "slate";
const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "slate.log";
const DEFAULT_FILTER: &str = "slate=info";

/// Keeps the non-blocking writer flushing until dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// `$XDG_DATA_HOME/slate/logs` (else `~/.local/share/slate/logs`), the platform data dir
/// on macOS and Windows, then the temp dir. The first one that can be created wins.
fn log_dir_candidates() -> Vec<PathBuf> {
    let var = |key: &str| {
        std::env::var_os(key)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    };

    let data_home = if cfg!(windows) {
        var("APPDATA")
    } else if cfg!(target_os = "macos") {
        var("HOME").map(|home| home.join("Library").join("Application Support"))
    } else {
        var("XDG_DATA_HOME").or_else(|| var("HOME").map(|home| home.join(".local").join("share")))
    };

    data_home
        .into_iter()
        .chain(Some(std::env::temp_dir()))
        .map(|base| base.join(APP_DIR).join(LOG_DIR))
        .collect()
}

/// Route `tracing` to a daily rolling file. The terminal belongs to the UI, so nothing is
/// written to stdout/stderr. Returns `None` when no log directory is usable.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = log_dir_candidates()
        .into_iter()
        .find(|dir| std::fs::create_dir_all(dir).is_ok())?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
