//! Pure rendering: menu state in, display lines out.
//!
//! Layout of one frame:
//!
//! ```text
//!   ┌──────────────────────────────┐     title box, margin 2
//!   │                              │
//!   │          Main Menu           │     centered
//!   │   NODE  ::  2026-01-01T...   │
//!   │                              │
//!   └──────────────────────────────┘
//!    ┌────────────────────────────┐      option box, margin 3
//!    │                            │
//!    │   ➤ 1 | System info        │      left-justified
//!    │                            │      spacer before back group
//!    │     B | Back to ...        │
//!    │                            │      spacer before exit group
//!    │     X | Exit Menu          │
//!    │                            │      trailing spacer
//!    │   [?] Select an option ... │
//!    └────────────────────────────┘
//! ```
//!
//! Every line is exactly `width` visible columns. Text is fitted before
//! it is styled, so ANSI sequences never count against the budget.

use crossterm::style::Color;

use super::state::{EntryKind, MenuState};
use super::text::{center, pad_right, truncate, visible_width};
use super::theme::{self, paint, paint_bold};

// ============================================================================
// LAYOUT CONSTANTS
// ============================================================================

/// Outer margin of the title box.
pub const TITLE_MARGIN: usize = 2;

/// Outer margin of the option box.
pub const OPTIONS_MARGIN: usize = 3;

/// Padding between a vertical border and the content.
pub const GUTTER: &str = "   ";

// ============================================================================
// FRAME INPUT
// ============================================================================

/// Which block of the option list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionGroup {
    Declared,
    Back,
    Exit,
}

impl From<&EntryKind> for OptionGroup {
    fn from(kind: &EntryKind) -> Self {
        match kind {
            EntryKind::Declared(_) => OptionGroup::Declared,
            EntryKind::Back => OptionGroup::Back,
            EntryKind::Exit => OptionGroup::Exit,
        }
    }
}

/// One option row as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOption<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub group: OptionGroup,
}

/// Everything one frame depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    pub title: &'a str,
    pub status: &'a str,
    pub options: Vec<FrameOption<'a>>,
    pub selection: usize,
    pub prompt: &'a str,
    pub width: usize,
}

impl<'a> Frame<'a> {
    /// Frame for a screen's current state.
    pub fn for_state(state: &'a MenuState, status: &'a str, prompt: &'a str, width: usize) -> Self {
        Frame {
            title: &state.name,
            status,
            options: state
                .resolved
                .iter()
                .map(|o| FrameOption {
                    key: &o.key,
                    label: &o.label,
                    group: OptionGroup::from(&o.kind),
                })
                .collect(),
            selection: state.selection,
            prompt,
            width,
        }
    }
}

/// Prompt line shown under the options.
pub fn prompt_line(state: &MenuState) -> String {
    format!("[?] Select an option ({}): {}", state.accepted_keys(), state.typed)
}

// ============================================================================
// BOX STYLES
// ============================================================================

struct BoxStyle {
    margin: usize,
    border: Color,
    text: Color,
    bold: bool,
    centered: bool,
}

const TITLE_BOX: BoxStyle = BoxStyle {
    margin: TITLE_MARGIN,
    border: theme::COLOR_TITLE_BORDER,
    text: theme::COLOR_TITLE,
    bold: true,
    centered: true,
};

const TITLE_INFO_BOX: BoxStyle = BoxStyle {
    margin: TITLE_MARGIN,
    border: theme::COLOR_TITLE_BORDER,
    text: theme::COLOR_TITLE_INFO,
    bold: false,
    centered: true,
};

const OPTION_BOX: BoxStyle = BoxStyle {
    margin: OPTIONS_MARGIN,
    border: theme::COLOR_OPTIONS_BORDER,
    text: theme::COLOR_OPTION,
    bold: false,
    centered: false,
};

const SELECTED_BOX: BoxStyle = BoxStyle {
    margin: OPTIONS_MARGIN,
    border: theme::COLOR_OPTIONS_BORDER,
    text: theme::COLOR_SELECTED,
    bold: true,
    centered: false,
};

const PROMPT_BOX: BoxStyle = BoxStyle {
    margin: OPTIONS_MARGIN,
    border: theme::COLOR_OPTIONS_BORDER,
    text: theme::COLOR_PROMPT,
    bold: false,
    centered: false,
};

#[derive(Clone, Copy)]
enum Edge {
    Top,
    Bottom,
}

// ============================================================================
// RENDERING
// ============================================================================

/// Lay out a full frame.
pub fn render(frame: &Frame) -> Vec<String> {
    let width = frame.width;
    let mut lines = Vec::with_capacity(frame.options.len() + 14);

    // Title box
    lines.push(border_line(width, &TITLE_BOX, Edge::Top));
    lines.push(box_line("", &TITLE_BOX, width));
    lines.push(box_line(frame.title, &TITLE_BOX, width));
    lines.push(box_line(frame.status, &TITLE_INFO_BOX, width));
    lines.push(box_line("", &TITLE_BOX, width));
    lines.push(border_line(width, &TITLE_BOX, Edge::Bottom));

    // Option box
    lines.push(border_line(width, &OPTION_BOX, Edge::Top));
    lines.push(box_line("", &OPTION_BOX, width));

    let mut group = OptionGroup::Declared;
    for (i, option) in frame.options.iter().enumerate() {
        if option.group != OptionGroup::Declared && option.group != group {
            lines.push(box_line("", &OPTION_BOX, width));
        }
        group = option.group;

        let selected = i == frame.selection;
        let indicator = if selected {
            theme::INDICATOR_SELECTED
        } else {
            theme::INDICATOR_BLANK
        };
        let text = format!("{indicator}{} | {}", option.key, option.label);
        let style = if selected { &SELECTED_BOX } else { &OPTION_BOX };
        lines.push(box_line(&text, style, width));
    }

    lines.push(box_line("", &OPTION_BOX, width));
    lines.push(box_line(frame.prompt, &PROMPT_BOX, width));
    lines.push(border_line(width, &OPTION_BOX, Edge::Bottom));

    lines
}

fn border_line(width: usize, style: &BoxStyle, edge: Edge) -> String {
    let margin = " ".repeat(style.margin);
    let (left, right) = match edge {
        Edge::Top => (theme::TOP_LEFT, theme::TOP_RIGHT),
        Edge::Bottom => (theme::BOTTOM_LEFT, theme::BOTTOM_RIGHT),
    };
    let inner = width.saturating_sub(2 * style.margin + 2);
    let rule: String = std::iter::repeat_n(theme::HORIZONTAL, inner).collect();
    paint(&format!("{margin}{left}{rule}{right}{margin}"), style.border)
}

fn box_line(text: &str, style: &BoxStyle, width: usize) -> String {
    let margin = " ".repeat(style.margin);
    let left = paint(&format!("{margin}{}{GUTTER}", theme::VERTICAL), style.border);
    let right = paint(&format!("{GUTTER}{}{margin}", theme::VERTICAL), style.border);
    let available = width.saturating_sub(visible_width(&left) + visible_width(&right));

    let fitted = truncate(text, available);
    let styled = match (fitted.is_empty(), style.bold) {
        (true, _) => fitted,
        (false, true) => paint_bold(&fitted, style.text),
        (false, false) => paint(&fitted, style.text),
    };
    let body = if style.centered {
        center(&styled, available)
    } else {
        pad_right(&styled, available)
    };

    format!("{left}{body}{right}")
}

// ============================================================================
// TESTS
// ============================================================================
