//! Error types for keymenu.
//!
//! Construction problems (bad option tables) fail fast as `MenuError`.
//! Bad user input is never an error here: the engine reports it inline
//! and re-prompts.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for menu construction and the engine loop.
#[derive(Error, Debug)]
pub enum MenuError {
    /// A screen was built without any declared options.
    #[error("menu '{0}' must declare at least one option")]
    EmptyOptions(String),

    /// A selection key was blank after normalization.
    #[error("menu '{menu}' declares an empty selection key")]
    EmptyKey { menu: String },

    /// Two declared keys collide after case normalization.
    #[error("menu '{menu}' declares key '{key}' more than once")]
    DuplicateKey { menu: String, key: String },

    /// A declared key shadows a back or exit synonym.
    #[error("menu '{menu}' may not declare reserved key '{key}'")]
    ReservedKey { menu: String, key: String },

    /// Terminal or stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Describe output could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("logging error: {0}")]
    Logging(String),
}

/// Errors when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML for our schema.
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
