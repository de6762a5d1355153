//! Reserved navigation vocabulary and key normalization.
//!
//! Pure functions and constants. These sets are process-wide and never
//! mutated; callers that need a narrowed set build a local copy.

/// Key of the synthesized exit entry.
pub const EXIT_KEY: &str = "X";

/// Key of the synthesized back entry.
pub const BACK_KEY: &str = "B";

/// Label of the synthesized exit entry.
pub const EXIT_LABEL: &str = "Exit Menu";

/// Printed once when a session terminates on request.
pub const EXIT_NOTICE: &str = "[+] Exiting menu.";

/// Inputs that terminate the session, after normalization.
///
/// The empty string is included; an absent input (end of stream) is also
/// an exit request, see [`is_exit_input`].
pub const EXIT_SYNONYMS: &[&str] = &["X", "EXIT", "QUIT", "Q", ""];

/// Inputs that return to the previous screen, after normalization.
pub const BACK_SYNONYMS: &[&str] = &["B", "BACK", "RETURN", "<", "<<", "PREVIOUS"];

/// Tokens a confirmation treats as "yes" unless the caller overrides them.
pub const DEFAULT_POSITIVE: &[&str] = &["y", "yes", "1", "true", ""];

/// Tokens a confirmation treats as "no" unless the caller overrides them.
///
/// End of input is a negative answer as well; see `tui::confirm::Token`.
pub const DEFAULT_NEGATIVE: &[&str] = &["n", "no", "0", "false", ""];

/// Normalize a menu selection key: trimmed, uppercase.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize a confirmation token: trimmed, lowercase.
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check a normalized key against the exit synonyms.
pub fn is_exit_synonym(key: &str) -> bool {
    EXIT_SYNONYMS.contains(&key)
}

/// Exit check that also covers an absent input.
pub fn is_exit_input(key: Option<&str>) -> bool {
    key.is_none_or(is_exit_synonym)
}

/// Check a normalized key against the back synonyms.
pub fn is_back_synonym(key: &str) -> bool {
    BACK_SYNONYMS.contains(&key)
}

/// A screen may not declare a key the engine reserves for navigation.
pub fn is_reserved(key: &str) -> bool {
    is_exit_synonym(key) || is_back_synonym(key)
}

/// Render the non-empty exit synonyms as "X, EXIT, QUIT, Q".
pub fn exit_words() -> String {
    EXIT_SYNONYMS
        .iter()
        .filter(|w| !w.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// TESTS
// ============================================================================
