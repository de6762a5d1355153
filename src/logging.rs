//! Tracing setup.
//!
//! The menu owns the terminal, so log lines go to a file instead of
//! stderr. `RUST_LOG` overrides the level chosen on the command line.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::error::MenuError;

/// Map a level name to a tracing level. Unknown names mean INFO.
pub fn parse_level(name: &str) -> Level {
    match name.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Filter directive for this crate at the given level.
pub fn filter_directive(level: Level) -> String {
    format!("keymenu={}", level.as_str().to_lowercase())
}

/// Install the global subscriber, appending to `log_file`.
///
/// Creates the parent directory if needed.
pub fn init(level_name: &str, log_file: &Path) -> Result<(), MenuError> {
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(parse_level(level_name))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| MenuError::Logging(e.to_string()))
}
