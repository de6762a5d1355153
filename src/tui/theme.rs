//! Frame colors, glyphs, and styling helpers.
//!
//! Color semantics:
//! - Magenta: title box (border and menu name)
//! - Grey: header status line
//! - Dark grey: option box border, unselected options
//! - Cyan: selected option, input prompt
//! - Red: diagnostics
//!
//! Styling goes through crossterm, which embeds ANSI sequences in the
//! returned strings. Width math must use `text::visible_width`.

use crossterm::style::{Color, Stylize};

// ============================================================================
// COLORS
// ============================================================================

pub const COLOR_TITLE_BORDER: Color = Color::Magenta;
pub const COLOR_TITLE: Color = Color::Magenta;
pub const COLOR_TITLE_INFO: Color = Color::Grey;
pub const COLOR_OPTIONS_BORDER: Color = Color::DarkGrey;
pub const COLOR_OPTION: Color = Color::DarkGrey;
pub const COLOR_SELECTED: Color = Color::Cyan;
pub const COLOR_PROMPT: Color = Color::Cyan;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_NOTICE: Color = Color::Grey;

// ============================================================================
// GLYPHS
// ============================================================================

pub const TOP_LEFT: char = '┌';
pub const TOP_RIGHT: char = '┐';
pub const BOTTOM_LEFT: char = '└';
pub const BOTTOM_RIGHT: char = '┘';
pub const HORIZONTAL: char = '─';
pub const VERTICAL: char = '│';

/// Leading marker on the highlighted option.
pub const INDICATOR_SELECTED: &str = "➤ ";

/// Same width as [`INDICATOR_SELECTED`], so columns stay aligned.
pub const INDICATOR_BLANK: &str = "  ";

// ============================================================================
// HELPERS
// ============================================================================

pub fn paint(text: &str, color: Color) -> String {
    text.with(color).to_string()
}

pub fn paint_bold(text: &str, color: Color) -> String {
    text.with(color).bold().to_string()
}

// ============================================================================
// TESTS
// ============================================================================
