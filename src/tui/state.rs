//! Navigation state algebra.
//!
//! A `MenuState` is the runtime form of one screen: its declared options
//! plus the synthesized back and exit entries, a cursor, and a typed
//! buffer. Screens live on a stack owned by the navigator; a child knows
//! its parent only through a `ScreenHandle`, a plain index into that
//! stack, so neither screen owns the other.

use std::collections::HashSet;
use std::fmt;

use crate::error::MenuError;
use crate::synonyms::{self, BACK_KEY, EXIT_KEY, EXIT_LABEL, normalize_key};
use crate::types::{Action, MenuDefinition};

// ============================================================================
// HANDLES AND ENTRIES
// ============================================================================

/// Non-owning reference to a screen on the navigator's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenHandle(usize);

impl ScreenHandle {
    pub fn new(index: usize) -> Self {
        ScreenHandle(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// What selecting a resolved entry does.
#[derive(Debug, Clone)]
pub enum EntryKind {
    /// A collaborator-declared option.
    Declared(Action),
    /// Synthesized: return to the previous screen.
    Back,
    /// Synthesized: terminate.
    Exit,
}

/// One row of the resolved option table.
#[derive(Debug, Clone)]
pub struct ResolvedOption {
    /// Normalized (uppercase) selection key.
    pub key: String,
    pub label: String,
    pub kind: EntryKind,
}

// ============================================================================
// SCREEN STATE
// ============================================================================

/// Runtime state of one active screen.
#[derive(Debug)]
pub struct MenuState {
    /// Display title.
    pub name: String,
    /// Declared options, then back (if any), then exit.
    pub resolved: Vec<ResolvedOption>,
    /// Screen this one returns to.
    pub previous: Option<ScreenHandle>,
    /// Highlighted row, always `< resolved.len()`.
    pub selection: usize,
    /// Characters typed since the last reset.
    pub typed: String,
}

impl MenuState {
    /// Build a top-level screen (no back entry).
    pub fn root(definition: MenuDefinition) -> Result<Self, MenuError> {
        Self::build(definition, None)
    }

    /// Build a screen that returns to `parent` (named `parent_name`).
    pub fn child(
        definition: MenuDefinition,
        parent: ScreenHandle,
        parent_name: &str,
    ) -> Result<Self, MenuError> {
        Self::build(definition, Some((parent, parent_name)))
    }

    fn build(
        definition: MenuDefinition,
        parent: Option<(ScreenHandle, &str)>,
    ) -> Result<Self, MenuError> {
        let MenuDefinition { name, options } = definition;

        if options.is_empty() {
            return Err(MenuError::EmptyOptions(name));
        }

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(options.len() + 2);

        for option in options {
            let key = normalize_key(&option.key);
            if key.is_empty() {
                return Err(MenuError::EmptyKey { menu: name });
            }
            if synonyms::is_reserved(&key) {
                return Err(MenuError::ReservedKey { menu: name, key });
            }
            if !seen.insert(key.clone()) {
                return Err(MenuError::DuplicateKey { menu: name, key });
            }
            resolved.push(ResolvedOption {
                key,
                label: option.label,
                kind: EntryKind::Declared(option.action),
            });
        }

        if let Some((_, parent_name)) = parent {
            resolved.push(ResolvedOption {
                key: BACK_KEY.to_string(),
                label: format!("Back to {parent_name}"),
                kind: EntryKind::Back,
            });
        }

        resolved.push(ResolvedOption {
            key: EXIT_KEY.to_string(),
            label: EXIT_LABEL.to_string(),
            kind: EntryKind::Exit,
        });

        Ok(MenuState {
            name,
            resolved,
            previous: parent.map(|(handle, _)| handle),
            selection: 0,
            typed: String::new(),
        })
    }

    /// Number of resolved entries.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Always false: a screen has at least its exit entry.
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Resolved keys in display order.
    pub fn keys(&self) -> Vec<&str> {
        self.resolved.iter().map(|o| o.key.as_str()).collect()
    }

    /// Index of the entry with this key (case-insensitive).
    pub fn find(&self, key: &str) -> Option<usize> {
        let key = normalize_key(key);
        self.resolved.iter().position(|o| o.key == key)
    }

    pub fn back_index(&self) -> Option<usize> {
        self.resolved
            .iter()
            .position(|o| matches!(o.kind, EntryKind::Back))
    }

    pub fn exit_index(&self) -> usize {
        self.resolved
            .iter()
            .position(|o| matches!(o.kind, EntryKind::Exit))
            .unwrap_or(self.resolved.len() - 1)
    }

    /// Move the cursor up one row, wrapping to the bottom.
    pub fn select_previous(&mut self) {
        let count = self.len();
        self.selection = (self.selection + count - 1) % count;
    }

    /// Move the cursor down one row, wrapping to the top.
    pub fn select_next(&mut self) {
        self.selection = (self.selection + 1) % self.len();
    }

    /// Resolved keys as "1, G, B, X" for prompts and diagnostics.
    pub fn accepted_keys(&self) -> String {
        self.keys().join(", ")
    }
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Outcome of resolving one key against a screen.
///
/// Pure code produces these; the run loop carries them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Re-draw the current screen.
    Render,
    /// Select the entry at this index of `resolved`.
    Dispatch(usize),
    /// Pop to the previous screen without dispatching.
    Navigate,
    /// Show a recoverable diagnostic, wait for a key, re-draw.
    Reprompt(Diagnostic),
}

/// Recoverable problems reported inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Input matched no key or synonym.
    InvalidInput { input: String, accepted: String },
    /// A back synonym on a screen with nowhere to go back to.
    NoPrevious,
    /// The selected option has no action bound.
    Unbound { key: String, label: String },
    /// A pushed screen could not be built.
    BadScreen(String),
    /// A transient read failure.
    InputError(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidInput { input, accepted } => write!(
                f,
                "[!] Invalid input '{}'. {}",
                input.escape_debug(),
                accepted_hint(accepted)
            ),
            Diagnostic::NoPrevious => write!(f, "[!] No previous menu to return to."),
            Diagnostic::Unbound { key, label } => write!(
                f,
                "[!] Option '{key}' ({label}) is not implemented."
            ),
            Diagnostic::BadScreen(reason) => write!(f, "[!] Could not open menu: {reason}"),
            Diagnostic::InputError(reason) => write!(f, "[!] Could not read input: {reason}"),
        }
    }
}

impl Diagnostic {
    /// Full message for display on a screen whose accepted keys are
    /// `accepted`. Every diagnostic ends with the accepted-input set.
    pub fn message(&self, accepted: &str) -> String {
        match self {
            Diagnostic::InvalidInput { .. } => self.to_string(),
            _ => format!("{self} {}", accepted_hint(accepted)),
        }
    }
}

fn accepted_hint(accepted: &str) -> String {
    format!(
        "Please choose from: ({accepted}) to proceed or ({}) to exit.",
        synonyms::exit_words()
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Flow;

    fn def(keys: &[&str]) -> MenuDefinition {
        keys.iter().fold(MenuDefinition::new("Test"), |d, k| {
            d.option(*k, format!("Option {k}"), || Flow::Stay)
        })
    }

    #[test]
    fn root_appends_exit_only() {
        let state = MenuState::root(def(&["1", "A", "g"])).unwrap();
        assert_eq!(state.keys(), vec!["1", "A", "G", "X"]);
        assert_eq!(state.len(), 4);
        assert!(state.previous.is_none());
        assert!(state.back_index().is_none());
    }

    #[test]
    fn child_appends_back_then_exit() {
        let state = MenuState::child(def(&["G"]), ScreenHandle::new(0), "Root").unwrap();
        assert_eq!(state.keys(), vec!["G", "B", "X"]);
        assert_eq!(state.resolved[1].label, "Back to Root");
        assert_eq!(state.previous, Some(ScreenHandle::new(0)));
        assert_eq!(state.back_index(), Some(1));
        assert_eq!(state.exit_index(), 2);
    }

    #[test]
    fn resolved_sizes_follow_previous() {
        for n in 1..6 {
            let keys: Vec<String> = (1..=n).map(|i| i.to_string()).collect();
            let refs: Vec<&str> = keys.iter().map(String::as_str).collect();

            let root = MenuState::root(def(&refs)).unwrap();
            assert_eq!(root.len(), n + 1);

            let child = MenuState::child(def(&refs), ScreenHandle::new(0), "P").unwrap();
            assert_eq!(child.len(), n + 2);

            let unique: HashSet<&str> = child.keys().into_iter().collect();
            assert_eq!(unique.len(), child.len());
        }
    }

    #[test]
    fn empty_definition_fails_fast() {
        let err = MenuState::root(MenuDefinition::new("Empty")).unwrap_err();
        assert!(matches!(err, MenuError::EmptyOptions(name) if name == "Empty"));
    }

    #[test]
    fn duplicate_keys_after_normalization_fail() {
        let err = MenuState::root(def(&["a", "A"])).unwrap_err();
        assert!(matches!(err, MenuError::DuplicateKey { key, .. } if key == "A"));
    }

    #[test]
    fn reserved_keys_fail() {
        for key in ["x", "Q", "back", "<"] {
            let err = MenuState::root(def(&[key])).unwrap_err();
            assert!(matches!(err, MenuError::ReservedKey { .. }), "{key} should be reserved");
        }
    }

    #[test]
    fn blank_key_fails() {
        let err = MenuState::root(def(&["  "])).unwrap_err();
        assert!(matches!(err, MenuError::EmptyKey { .. }));
    }

    #[test]
    fn find_is_case_insensitive() {
        let state = MenuState::root(def(&["G", "10"])).unwrap();
        assert_eq!(state.find("g"), Some(0));
        assert_eq!(state.find("10"), Some(1));
        assert_eq!(state.find("x"), Some(2));
        assert_eq!(state.find("Z"), None);
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut state = MenuState::root(def(&["1", "2"])).unwrap();
        state.select_previous();
        assert_eq!(state.selection, 2);
        state.select_next();
        assert_eq!(state.selection, 0);
    }

    #[test]
    fn accepted_keys_lists_resolved_order() {
        let state = MenuState::child(def(&["1", "A"]), ScreenHandle::new(0), "Root").unwrap();
        assert_eq!(state.accepted_keys(), "1, A, B, X");
    }

    #[test]
    fn invalid_input_message_lists_accepted_set() {
        let msg = Diagnostic::InvalidInput {
            input: "2".to_string(),
            accepted: "1, X".to_string(),
        }
        .to_string();
        assert_eq!(
            msg,
            "[!] Invalid input '2'. Please choose from: (1, X) to proceed or (X, EXIT, QUIT, Q) to exit."
        );
    }

    #[test]
    fn invalid_input_escapes_control_characters() {
        let msg = Diagnostic::InvalidInput {
            input: "\u{1b}".to_string(),
            accepted: "1, X".to_string(),
        }
        .to_string();
        assert!(msg.contains("'\\u{1b}'"));
    }

    #[test]
    fn every_diagnostic_message_lists_accepted_set() {
        let diagnostics = [
            Diagnostic::NoPrevious,
            Diagnostic::Unbound {
                key: "1".to_string(),
                label: "Soon".to_string(),
            },
            Diagnostic::BadScreen("empty".to_string()),
            Diagnostic::InputError("eof".to_string()),
            Diagnostic::InvalidInput {
                input: "2".to_string(),
                accepted: "1, X".to_string(),
            },
        ];
        for diagnostic in diagnostics {
            let msg = diagnostic.message("1, X");
            assert!(msg.starts_with(&diagnostic.to_string()), "{msg}");
            assert_eq!(msg.matches("(1, X)").count(), 1, "{msg}");
            assert!(msg.ends_with("(X, EXIT, QUIT, Q) to exit."), "{msg}");
        }
    }

    #[test]
    fn no_previous_message_reads_as_one_line() {
        assert_eq!(
            Diagnostic::NoPrevious.message("1, X"),
            "[!] No previous menu to return to. Please choose from: (1, X) to proceed or (X, EXIT, QUIT, Q) to exit."
        );
    }
}
