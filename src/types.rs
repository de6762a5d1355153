//! Domain types for keymenu.
//!
//! A collaborator describes a screen as a `MenuDefinition`: a title plus
//! an ordered list of selection keys bound to actions. The engine never
//! mutates a definition; it builds its own runtime state from it.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

// ============================================================================
// ACTIONS
// ============================================================================

/// A zero-argument callback bound to a selection key.
pub type ActionFn = Rc<dyn Fn() -> Flow>;

/// What a selection key is bound to.
///
/// Resolved by key lookup at dispatch time. `Unbound` lets a screen list
/// an entry before its behavior exists; selecting it reports a visible,
/// non-fatal message.
#[derive(Clone)]
pub enum Action {
    /// Callable action.
    Bound(ActionFn),
    /// Declared label with no behavior attached.
    Unbound,
}

impl Action {
    /// Wrap a closure as a bound action.
    pub fn bound(f: impl Fn() -> Flow + 'static) -> Self {
        Action::Bound(Rc::new(f))
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Action::Bound(_))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Bound(_) => f.write_str("Action::Bound(..)"),
            Action::Unbound => f.write_str("Action::Unbound"),
        }
    }
}

/// How control returns to the engine after an action finishes.
#[derive(Debug)]
pub enum Flow {
    /// Re-render the current screen.
    Stay,
    /// Launch a child screen whose back entry returns here.
    Push(MenuDefinition),
    /// Return to the parent screen.
    Back,
    /// Terminate the whole menu session.
    Exit,
}

// ============================================================================
// DEFINITIONS
// ============================================================================

/// One declared entry: selection key, label, action.
#[derive(Debug, Clone)]
pub struct MenuOption {
    /// Short selection key, matched case-insensitively ("1", "A", "G").
    pub key: String,
    /// Text shown next to the key.
    pub label: String,
    /// Behavior bound to the key.
    pub action: Action,
}

/// A screen as supplied by a collaborator.
///
/// Back and exit entries are added by the engine and must not be declared
/// here; see [`crate::synonyms`] for the reserved vocabulary.
#[derive(Debug, Clone)]
pub struct MenuDefinition {
    /// Display title.
    pub name: String,
    /// Declared options, in display order.
    pub options: Vec<MenuOption>,
}

impl MenuDefinition {
    /// Start a definition with no options.
    ///
    /// At least one option must be added before the engine will accept it.
    pub fn new(name: impl Into<String>) -> Self {
        MenuDefinition {
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Add an option bound to a closure.
    pub fn option(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        f: impl Fn() -> Flow + 'static,
    ) -> Self {
        self.options.push(MenuOption {
            key: key.into(),
            label: label.into(),
            action: Action::bound(f),
        });
        self
    }

    /// Add an option with no behavior yet.
    pub fn unbound(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(MenuOption {
            key: key.into(),
            label: label.into(),
            action: Action::Unbound,
        });
        self
    }
}

// ============================================================================
// DESCRIPTIONS
// ============================================================================

/// Where a resolved entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionRole {
    /// Declared by the screen.
    Declared,
    /// Synthesized back entry.
    Back,
    /// Synthesized exit entry.
    Exit,
}

/// One resolved entry, as reported by `describe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDescription {
    pub key: String,
    pub label: String,
    pub role: OptionRole,
    /// False only for declared options with no action.
    pub bound: bool,
}

/// A screen's resolved option table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuDescription {
    pub name: String,
    pub has_previous: bool,
    pub options: Vec<OptionDescription>,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for `describe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
