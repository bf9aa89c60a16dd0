use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config;

/// Install a file-backed tracing subscriber. The terminal belongs to the TUI,
/// so nothing is written to stdout/stderr. Returns the log path on success.
///
/// Failures are swallowed: running without a log is fine.
pub fn init(default_filter: &str) -> Option<PathBuf> {
    let dir = config::project_dirs()?.cache_dir().to_path_buf();
    std::fs::create_dir_all(&dir).ok()?;

    let path = dir.join("film-reel.log");
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    Some(path)
}
