//! Resolved option tables as text.
//!
//! Pure functions: (MenuDefinition, OutputFormat) → String.
//! No I/O, no side effects.

use crate::error::MenuError;
use crate::synonyms;
use crate::tui::state::{EntryKind, MenuState, ScreenHandle};
use crate::types::{
    MenuDefinition, MenuDescription, OptionDescription, OptionRole, OutputFormat,
};

/// Resolve a definition the way the engine would and format the result.
///
/// `previous_name` adds a back entry labelled after the parent screen.
pub fn describe(
    definition: MenuDefinition,
    previous_name: Option<&str>,
    format: OutputFormat,
) -> Result<String, MenuError> {
    let state = match previous_name {
        Some(parent) => MenuState::child(definition, ScreenHandle::new(0), parent)?,
        None => MenuState::root(definition)?,
    };
    format_menu(&describe_state(&state), format)
}

/// Snapshot of a screen's resolved entries.
pub fn describe_state(state: &MenuState) -> MenuDescription {
    MenuDescription {
        name: state.name.clone(),
        has_previous: state.previous.is_some(),
        options: state
            .resolved
            .iter()
            .map(|o| {
                let (role, bound) = match &o.kind {
                    EntryKind::Declared(action) => (OptionRole::Declared, action.is_bound()),
                    EntryKind::Back => (OptionRole::Back, true),
                    EntryKind::Exit => (OptionRole::Exit, true),
                };
                OptionDescription {
                    key: o.key.clone(),
                    label: o.label.clone(),
                    role,
                    bound,
                }
            })
            .collect(),
    }
}

pub fn format_menu(menu: &MenuDescription, format: OutputFormat) -> Result<String, MenuError> {
    match format {
        OutputFormat::Human => Ok(format_human(menu)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(menu)?),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(menu: &MenuDescription) -> String {
    let key_width = menu
        .options
        .iter()
        .map(|o| o.key.chars().count())
        .max()
        .unwrap_or(1);

    let mut out = format!("=== {} ===\n", menu.name);
    for option in &menu.options {
        let marker = if option.bound { "" } else { "  (not implemented)" };
        out.push_str(&format!(
            "  {:<key_width$}  {}{}\n",
            option.key, option.label, marker
        ));
    }

    let keys: Vec<&str> = menu.options.iter().map(|o| o.key.as_str()).collect();
    out.push('\n');
    out.push_str(&format!("Accepted keys: {}\n", keys.join(", ")));
    out.push_str(&format!("Exit words:    {}\n", synonyms::exit_words()));
    if menu.has_previous {
        out.push_str(&format!(
            "Back words:    {}\n",
            synonyms::BACK_SYNONYMS.join(", ")
        ));
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Flow;

    fn sample() -> MenuDefinition {
        MenuDefinition::new("Tools")
            .option("1", "Echo", || Flow::Stay)
            .option("10", "Nested", || Flow::Stay)
            .unbound("9", "Later")
    }

    #[test]
    fn human_lists_resolved_entries_in_order() {
        let text = describe(sample(), Some("Main Menu"), OutputFormat::Human).unwrap();
        let expected = "\
=== Tools ===
  1   Echo
  10  Nested
  9   Later  (not implemented)
  B   Back to Main Menu
  X   Exit Menu

Accepted keys: 1, 10, 9, B, X
Exit words:    X, EXIT, QUIT, Q
Back words:    B, BACK, RETURN, <, <<, PREVIOUS
";
        assert_eq!(text, expected);
    }

    #[test]
    fn root_has_no_back_entry() {
        let text = describe(sample(), None, OutputFormat::Human).unwrap();
        assert!(!text.contains("Back to"));
        assert!(!text.contains("Back words"));
    }

    #[test]
    fn json_carries_roles_and_binding() {
        let text = describe(sample(), Some("Main Menu"), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["name"], "Tools");
        assert_eq!(value["has_previous"], true);

        let options = value["options"].as_array().unwrap();
        assert_eq!(options.len(), 5);
        assert_eq!(options[2]["bound"], false);
        assert_eq!(options[3]["role"], "back");
        assert_eq!(options[4]["role"], "exit");
        assert_eq!(options[4]["key"], "X");
    }

    #[test]
    fn invalid_definition_is_an_error() {
        let err = describe(MenuDefinition::new("Empty"), None, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, MenuError::EmptyOptions(_)));
    }
}
