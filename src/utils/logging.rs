//! Optional file logging.
//!
//! The terminal belongs to the UI, so log output goes to
//! `<cache dir>/superfile/superfile.log`. Nothing is installed unless `SUPERFILE_LOG`
//! holds a filter such as `debug` or `superfile_tui::app=trace`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SUPERFILE_LOG";

pub fn log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("superfile")
        .join("superfile.log")
}

/// Installs the global subscriber. Returns the log file path when logging is on.
pub fn init() -> io::Result<Option<PathBuf>> {
    let Ok(spec) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };
    let filter = EnvFilter::try_new(spec.trim()).unwrap_or_else(|e| {
        eprintln!("[superfile] Invalid {} filter: {}", LOG_ENV, e);
        EnvFilter::new("info")
    });

    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(Some(path))
}
