//! Environment detection: terminal width, node name, default paths.
//!
//! Structure:
//! - Constants: fallbacks and well-known names (documented invariants)
//! - Types: detection states (sum type)
//! - Pure functions: path construction, name resolution
//! - Effect functions: terminal and environment queries

use std::path::{Path, PathBuf};

// ============================================================================
// CONSTANTS (Documented Invariants)
// ============================================================================

/// Column count used when the terminal size cannot be queried
/// (output piped, no controlling terminal).
pub const DEFAULT_WIDTH: usize = 80;

/// Environment variable naming this machine in the menu header.
pub const NODE_NAME_ENV: &str = "NODE_NAME";

/// Header node name when neither config nor environment provide one.
pub const DEFAULT_NODE_NAME: &str = "KEYMENU";

/// Directory name under the platform config/data roots.
pub const APP_DIR: &str = "keymenu";

/// Config filename inside the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Log filename inside the data directory.
pub const LOG_FILENAME: &str = "keymenu.log";

// ============================================================================
// TYPES (State Representation)
// ============================================================================

/// Outcome of asking the terminal for its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalWidth {
    /// The terminal reported its column count.
    Detected(usize),
    /// No usable answer; [`DEFAULT_WIDTH`] applies.
    Fallback,
}

impl TerminalWidth {
    /// Column count to lay frames out in.
    pub fn columns(self) -> usize {
        match self {
            TerminalWidth::Detected(cols) => cols,
            TerminalWidth::Fallback => DEFAULT_WIDTH,
        }
    }
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Config file path under a config root.
pub fn config_path_in(root: &Path) -> PathBuf {
    root.join(APP_DIR).join(CONFIG_FILENAME)
}

/// Log file path under a data root.
pub fn log_path_in(root: &Path) -> PathBuf {
    root.join(APP_DIR).join(LOG_FILENAME)
}

/// Pick the header node name: configured value, then environment, then default.
///
/// Blank values are skipped at every step.
pub fn resolve_node_name<F>(configured: Option<&str>, env_lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    configured
        .map(str::to_string)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| env_lookup(NODE_NAME_ENV).filter(|s| !s.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_NODE_NAME.to_string())
}

/// Interpret a raw column count; zero means the terminal did not know.
pub fn width_from_columns(cols: u16) -> TerminalWidth {
    match cols {
        0 => TerminalWidth::Fallback,
        n => TerminalWidth::Detected(usize::from(n)),
    }
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Ask the terminal for its width.
pub fn detect_width() -> TerminalWidth {
    match crossterm::terminal::size() {
        Ok((cols, _rows)) => width_from_columns(cols),
        Err(_) => TerminalWidth::Fallback,
    }
}

/// Default config file location, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|root| config_path_in(&root))
}

/// Default log file location.
///
/// Falls back to the working directory when no data directory exists.
pub fn default_log_path() -> PathBuf {
    let root = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    log_path_in(&root)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_width_is_eighty() {
        assert_eq!(TerminalWidth::Fallback.columns(), 80);
        assert_eq!(TerminalWidth::Detected(132).columns(), 132);
    }

    #[test]
    fn zero_columns_means_fallback() {
        assert_eq!(width_from_columns(0), TerminalWidth::Fallback);
        assert_eq!(width_from_columns(100), TerminalWidth::Detected(100));
    }

    #[test]
    fn paths_live_under_app_dir() {
        let root = Path::new("/home/user/.config");
        assert_eq!(
            config_path_in(root),
            PathBuf::from("/home/user/.config/keymenu/config.toml")
        );
        assert_eq!(
            log_path_in(Path::new("/data")),
            PathBuf::from("/data/keymenu/keymenu.log")
        );
    }

    #[test]
    fn configured_node_name_wins() {
        let name = resolve_node_name(Some("forge-01"), |_| Some("from-env".to_string()));
        assert_eq!(name, "forge-01");
    }

    #[test]
    fn env_node_name_used_when_not_configured() {
        let name = resolve_node_name(None, |key| {
            (key == NODE_NAME_ENV).then(|| "from-env".to_string())
        });
        assert_eq!(name, "from-env");
    }

    #[test]
    fn blank_values_fall_through_to_default() {
        let name = resolve_node_name(Some("  "), |_| Some(String::new()));
        assert_eq!(name, DEFAULT_NODE_NAME);
    }
}
