//! Pure key resolution: (MenuState, KeyEvent) → Transition.
//!
//! The only mutation is to the screen's own cursor and typed buffer.
//! Nothing here touches the terminal or runs an action.

use tracing::debug;

use crate::synonyms::{self, normalize_key};

use super::input::KeyEvent;
use super::state::{Diagnostic, EntryKind, MenuState, Transition};

/// Resolve one keystroke against the current screen.
pub fn update(state: &mut MenuState, key: KeyEvent) -> Transition {
    match key {
        KeyEvent::ArrowUp => {
            state.select_previous();
            Transition::Render
        }
        KeyEvent::ArrowDown => {
            state.select_next();
            Transition::Render
        }
        KeyEvent::ArrowLeft | KeyEvent::ArrowRight => Transition::Render,
        KeyEvent::Enter => {
            let typed = std::mem::take(&mut state.typed);
            if typed.is_empty() {
                Transition::Dispatch(state.selection)
            } else {
                resolve_input(state, &typed)
            }
        }
        KeyEvent::Backspace => {
            if state.previous.is_some() {
                state.typed.clear();
                Transition::Navigate
            } else {
                Transition::Render
            }
        }
        KeyEvent::Escape => {
            state.typed.clear();
            Transition::Render
        }
        KeyEvent::Interrupt => {
            state.typed.clear();
            Transition::Dispatch(state.exit_index())
        }
        KeyEvent::Character(_) | KeyEvent::Digit(_) => match key.as_text() {
            Some(text) => update_typed(state, &text),
            None => Transition::Render,
        },
    }
}

/// Typed input: an exact key dispatches, anything else is invalid.
///
/// The only exception is a strict prefix of a declared multi-character
/// key ("1" when "10" exists), which is held in the buffer.
fn update_typed(state: &mut MenuState, text: &str) -> Transition {
    let text = normalize_key(text);
    if text.is_empty() {
        // Whitespace alone selects nothing, not even the empty exit synonym
        return Transition::Render;
    }

    if !state.typed.is_empty() {
        let candidate = format!("{}{}", std::mem::take(&mut state.typed), text);
        if state.find(&candidate).is_some() {
            return resolve_input(state, &candidate);
        }
        if extends_declared_key(state, &candidate) {
            state.typed = candidate;
            return Transition::Render;
        }
    }

    if state.find(&text).is_some() {
        return resolve_input(state, &text);
    }
    if extends_declared_key(state, &text) {
        state.typed = text;
        return Transition::Render;
    }

    resolve_input(state, &text)
}

/// Validate a complete input and pick the entry it selects.
///
/// Accepted: resolved keys, back synonyms, exit synonyms. Anything else
/// is reported with the accepted set and never ends the session.
pub fn resolve_input(state: &MenuState, raw: &str) -> Transition {
    let key = normalize_key(raw);
    debug!(menu = %state.name, input = %key, "validating input");

    if let Some(index) = state.find(&key) {
        return Transition::Dispatch(index);
    }
    if synonyms::is_exit_synonym(&key) {
        return Transition::Dispatch(state.exit_index());
    }
    if synonyms::is_back_synonym(&key) {
        return match state.back_index() {
            Some(index) => Transition::Dispatch(index),
            None => Transition::Reprompt(Diagnostic::NoPrevious),
        };
    }

    Transition::Reprompt(Diagnostic::InvalidInput {
        input: key,
        accepted: state.accepted_keys(),
    })
}

fn extends_declared_key(state: &MenuState, text: &str) -> bool {
    state.resolved.iter().any(|o| {
        matches!(o.kind, EntryKind::Declared(_))
            && o.key.len() > text.len()
            && o.key.starts_with(text)
    })
}

// ============================================================================
// TESTS
// ============================================================================
