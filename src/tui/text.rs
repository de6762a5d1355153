//! Width-aware text helpers.
//!
//! Styled strings carry ANSI sequences that take bytes but no columns.
//! Every width computation here measures the text with those sequences
//! removed.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

static ANSI_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B(?:\[[0-?]*[ -/]*[@-~]|[@-Z\\-_])").expect("static ANSI pattern is valid")
});

/// Remove ANSI escape sequences.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_SEQUENCE.replace_all(text, "")
}

/// Columns a string occupies once styling is ignored.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

/// Fit plain text into `available` columns.
///
/// Overlong text keeps `available - 3` characters and gains [`ELLIPSIS`],
/// so the result is exactly `available` wide. Apply styling afterwards.
pub fn truncate(text: &str, available: usize) -> String {
    if text.chars().count() <= available {
        return text.to_string();
    }
    if available < ELLIPSIS.len() {
        return ELLIPSIS.chars().take(available).collect();
    }
    let kept: String = text.chars().take(available - ELLIPSIS.len()).collect();
    format!("{kept}{ELLIPSIS}")
}

/// Left-justify a (possibly styled) string to `width` visible columns.
pub fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(text));
    format!("{text}{}", " ".repeat(fill))
}

/// Center a (possibly styled) string in `width` visible columns.
///
/// Odd leftover space goes to the right.
pub fn center(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(text));
    let left = fill / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(fill - left))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const STYLED: &str = "\x1b[1m\x1b[38;5;13mMain Menu\x1b[0m";

    #[test]
    fn strip_removes_sgr_sequences() {
        assert_eq!(strip_ansi(STYLED), "Main Menu");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn visible_width_ignores_styling() {
        assert_eq!(visible_width(STYLED), 9);
        assert!(STYLED.len() > 9);
    }

    #[test]
    fn visible_width_counts_characters_not_bytes() {
        assert_eq!(visible_width("➤ 1 | Go"), 8);
        assert_eq!(visible_width("┌──┐"), 4);
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate("Do A", 10), "Do A");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn long_text_truncates_to_available_width() {
        let text = "a label that is far too long for the box";
        let out = truncate(text, 12);
        assert_eq!(out.chars().count(), 12);
        assert!(out.ends_with("..."));
        assert_eq!(out, "a label t...");
    }

    #[test]
    fn styling_after_truncation_keeps_visible_width() {
        let out = truncate("another label that is too long", 15);
        let styled = format!("\x1b[36m\x1b[1m{out}\x1b[0m");
        assert_eq!(visible_width(&styled), 15);
    }

    #[test]
    fn tiny_widths_still_fit() {
        assert_eq!(truncate("abcdef", 2), "..");
        assert_eq!(truncate("abcdef", 0), "");
    }

    #[test]
    fn pad_right_uses_visible_width() {
        let padded = pad_right(STYLED, 12);
        assert_eq!(visible_width(&padded), 12);
        assert!(padded.ends_with("   "));
    }

    #[test]
    fn center_splits_space() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("ab", 7), "  ab   ");
        assert_eq!(visible_width(&center(STYLED, 20)), 20);
    }

    #[test]
    fn overwide_text_is_not_padded() {
        assert_eq!(pad_right("abcdef", 3), "abcdef");
        assert_eq!(center("abcdef", 3), "abcdef");
    }
}
