//! keymenu: keyboard-navigable terminal menus with nested screens.

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod report;
pub mod synonyms;
pub mod tui;
pub mod types;
