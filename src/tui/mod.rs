//! Interactive menu engine.
//!
//! Organized along FP/Unix boundaries:
//! - `input`: key acquisition (raw mode, escape sequences) and pure decoding
//! - `state`: runtime screen state, transitions, diagnostics
//! - `update`: pure key resolution
//! - `view`: pure frame layout, `text` and `theme` support it
//! - `run`: effects (screen stack, drawing, dispatch)
//! - `confirm`: yes/no prompts over cooked line input

pub mod confirm;
pub mod input;
pub mod run;
pub mod state;
pub mod text;
pub mod theme;
pub mod update;
pub mod view;

pub use confirm::{Answer, ConfirmSpec, confirm};
pub use input::{KeyEvent, KeySource, ScriptedKeys, TerminalKeys};
pub use run::Navigator;
