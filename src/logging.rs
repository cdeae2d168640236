//! File-backed tracing setup.
//!
//! The TUI owns the terminal, so logs can never go to stdout or stderr.
//! They land in `~/.stride/stride.log` instead; `RUST_LOG` controls the
//! filter (default `info`). Initialization failures are swallowed: a client
//! without logs is still a working client.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

const LOG_DIR: &str = ".stride";
const LOG_FILE: &str = "stride.log";

/// Path of the log file, if a home directory exists.
pub fn log_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(LOG_DIR).join(LOG_FILE))
}

/// Install the global subscriber. Safe to call once at startup.
pub fn init() {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .try_init();
}
