//! Configuration loading.
//!
//! A small TOML file plus the `NODE_NAME` environment variable. Every
//! field is optional; a missing default file means defaults. An explicit
//! `--config` path must exist.
//!
//! ```toml
//! node_name = "forge-01"
//! width = 100
//! log_file = "/var/log/keymenu.log"
//! log_level = "debug"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::platform::{default_config_path, default_log_path, resolve_node_name};

/// Narrowest frame that still leaves room for a key and a short label.
pub const MIN_WIDTH: usize = 24;

/// Log level when neither flag nor file set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub node_name: Option<String>,
    pub width: Option<usize>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Resolved configuration used by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Shown in the header status line.
    pub node_name: String,
    /// Forced frame width; `None` follows the terminal.
    pub width: Option<usize>,
    /// Where tracing output goes.
    pub log_file: PathBuf,
    /// Default log level (overridden by `--log-level`).
    pub log_level: String,
    /// File the config was read from, if any.
    pub source: Option<PathBuf>,
}

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from `--config`).
pub fn load_config(path_override: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        default_config_path,
    )
}

pub(crate) fn load_config_from_sources<FRead, FEnv, FDefault>(
    path_override: Option<&Path>,
    read_file: FRead,
    env_lookup: FEnv,
    default_path: FDefault,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> io::Result<String>,
    FEnv: Fn(&str) -> Option<String>,
    FDefault: Fn() -> Option<PathBuf>,
{
    let (file, source) = match path_override {
        Some(path) => {
            let text = read_file(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            (toml::from_str::<FileConfig>(&text)?, Some(path.to_path_buf()))
        }
        None => match default_path() {
            Some(path) => match read_file(&path) {
                Ok(text) => (toml::from_str::<FileConfig>(&text)?, Some(path)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => (FileConfig::default(), None),
                Err(source) => return Err(ConfigError::Read { path, source }),
            },
            None => (FileConfig::default(), None),
        },
    };

    resolve(file, source, env_lookup)
}

fn resolve<F>(file: FileConfig, source: Option<PathBuf>, env_lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(width) = file.width {
        if width < MIN_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "width must be at least {MIN_WIDTH} columns, got {width}"
            )));
        }
    }

    Ok(Config {
        node_name: resolve_node_name(file.node_name.as_deref(), env_lookup),
        width: file.width,
        log_file: file.log_file.unwrap_or_else(default_log_path),
        log_level: file
            .log_level
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_default_file_yields_defaults() {
        let config = load_config_from_sources(
            None,
            |_| Err(io::Error::from(io::ErrorKind::NotFound)),
            no_env,
            || Some(PathBuf::from("/nonexistent/keymenu/config.toml")),
        )
        .unwrap();

        assert_eq!(config.node_name, "KEYMENU");
        assert_eq!(config.width, None);
        assert_eq!(config.log_level, "info");
        assert!(config.source.is_none());
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("menu.toml");
        fs::write(
            &path,
            "node_name = \"forge-01\"\nwidth = 100\nlog_level = \"debug\"\nlog_file = \"/tmp/k.log\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.node_name, "forge-01");
        assert_eq!(config.width, Some(100));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, PathBuf::from("/tmp/k.log"));
        assert_eq!(config.source, Some(path));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn env_fills_node_name() {
        let config = load_config_from_sources(
            None,
            |_| Ok(String::new()),
            |key| (key == "NODE_NAME").then(|| "rack-7".to_string()),
            || Some(PathBuf::from("config.toml")),
        )
        .unwrap();
        assert_eq!(config.node_name, "rack-7");
    }

    #[test]
    fn narrow_width_is_rejected() {
        let err = load_config_from_sources(
            None,
            |_| Ok("width = 10\n".to_string()),
            no_env,
            || Some(PathBuf::from("config.toml")),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = load_config_from_sources(
            None,
            |_| Ok("colour = \"pink\"\n".to_string()),
            no_env,
            || Some(PathBuf::from("config.toml")),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
