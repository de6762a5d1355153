//! Effects boundary: screen stack, drawing, action dispatch.
//!
//! This is the only part of the engine that writes to the terminal or
//! runs collaborator code. Key resolution (`update`) and layout (`view`)
//! stay pure; the navigator reads a key, asks `update` what it means,
//! and carries the resulting transition out.
//!
//! All screens live on one stack owned by the navigator. Pushing a child
//! records the parent's stack index in the child; popping truncates the
//! stack back to that index.

use std::io::{self, Write};

use chrono::{Local, NaiveDateTime};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, error, info, warn};

use crate::error::MenuError;
use crate::platform::{DEFAULT_NODE_NAME, detect_width};
use crate::synonyms::EXIT_NOTICE;
use crate::types::{Action, Flow, MenuDefinition};

use super::input::{KeySource, TerminalKeys};
use super::state::{Diagnostic, EntryKind, MenuState, ScreenHandle, Transition};
use super::theme::{self, paint};
use super::update::{resolve_input, update};
use super::view::{Frame, prompt_line, render};

/// Shown under every recoverable diagnostic.
pub const ACKNOWLEDGE_PROMPT: &str = "Press any key to continue...";

/// Whether the session goes on after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Terminate,
}

/// Header status line: node name and local time to the second.
pub fn status_line(node_name: &str, now: NaiveDateTime) -> String {
    format!("{node_name}  ::  {}", now.format("%Y-%m-%dT%H:%M:%S"))
}

// ============================================================================
// NAVIGATOR
// ============================================================================

/// Drives a tree of menu screens from a key source to a writer.
pub struct Navigator<K: KeySource, W: Write> {
    keys: K,
    out: W,
    stack: Vec<MenuState>,
    width: Option<usize>,
    node_name: String,
}

impl<K: KeySource, W: Write> Navigator<K, W> {
    pub fn new(keys: K, out: W) -> Self {
        Navigator {
            keys,
            out,
            stack: Vec::new(),
            width: None,
            node_name: DEFAULT_NODE_NAME.to_string(),
        }
    }

    /// Name shown in the header.
    pub fn with_node_name(mut self, node_name: impl Into<String>) -> Self {
        self.node_name = node_name.into();
        self
    }

    /// Force a frame width instead of asking the terminal.
    pub fn with_width(mut self, width: Option<usize>) -> Self {
        self.width = width;
        self
    }

    /// Screens currently on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The screen that would be drawn next.
    pub fn current(&self) -> Option<&MenuState> {
        self.stack.last()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run a session rooted at `root` until exit is selected.
    ///
    /// A non-blank `preselect` is resolved like typed input and carried
    /// out before the first frame. Returns `Ok` on a requested exit and
    /// an error when the definition is invalid or input is unusable.
    pub fn launch(&mut self, root: MenuDefinition, preselect: Option<&str>) -> Result<(), MenuError> {
        self.stack.clear();
        self.stack.push(MenuState::root(root)?);
        info!(menu = %self.top().name, "menu session started");

        if let Some(key) = preselect.filter(|k| !k.trim().is_empty()) {
            debug!(key, "preselected option");
            let transition = resolve_input(self.top(), key);
            if self.apply(transition)? == Control::Terminate {
                return Ok(());
            }
        }

        loop {
            self.draw()?;

            let key = match self.keys.read_key() {
                Ok(key) => key,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    self.report(&Diagnostic::InputError(e.to_string()))?;
                    continue;
                }
                Err(e) => {
                    error!(error = %e, "input stream failed");
                    return Err(e.into());
                }
            };
            debug!(?key, menu = %self.top().name, "key read");

            let transition = update(self.top_mut(), key);
            if self.apply(transition)? == Control::Terminate {
                return Ok(());
            }
        }
    }

    // launch() pushes the root before any access and pops never remove it
    fn top(&self) -> &MenuState {
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut MenuState {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    fn apply(&mut self, transition: Transition) -> Result<Control, MenuError> {
        match transition {
            Transition::Render => Ok(Control::Continue),
            Transition::Dispatch(index) => self.dispatch(index),
            Transition::Navigate => self.follow(Flow::Back),
            Transition::Reprompt(diagnostic) => {
                self.report(&diagnostic)?;
                Ok(Control::Continue)
            }
        }
    }

    fn dispatch(&mut self, index: usize) -> Result<Control, MenuError> {
        let Some(option) = self.top().resolved.get(index).cloned() else {
            warn!(index, "selection out of range");
            return Ok(Control::Continue);
        };

        match option.kind {
            EntryKind::Exit => self.follow(Flow::Exit),
            EntryKind::Back => self.follow(Flow::Back),
            EntryKind::Declared(Action::Unbound) => {
                self.report(&Diagnostic::Unbound {
                    key: option.key,
                    label: option.label,
                })?;
                Ok(Control::Continue)
            }
            EntryKind::Declared(Action::Bound(action)) => {
                info!(
                    menu = %self.top().name,
                    key = %option.key,
                    label = %option.label,
                    "launching option"
                );
                writeln!(self.out)?;
                self.out.flush()?;
                let flow = action();
                self.follow(flow)
            }
        }
    }

    fn follow(&mut self, flow: Flow) -> Result<Control, MenuError> {
        match flow {
            Flow::Stay => {}
            Flow::Exit => {
                info!(menu = %self.top().name, "exit selected");
                writeln!(self.out, "{EXIT_NOTICE}")?;
                self.out.flush()?;
                return Ok(Control::Terminate);
            }
            Flow::Back => match self.top().previous {
                Some(parent) => self.pop_to(parent),
                None => self.report(&Diagnostic::NoPrevious)?,
            },
            Flow::Push(definition) => {
                let parent = ScreenHandle::new(self.stack.len() - 1);
                let parent_name = self.top().name.clone();
                match MenuState::child(definition, parent, &parent_name) {
                    Ok(child) => {
                        info!(menu = %child.name, depth = self.stack.len() + 1, "menu pushed");
                        self.stack.push(child);
                    }
                    Err(e) => self.report(&Diagnostic::BadScreen(e.to_string()))?,
                }
            }
        }
        Ok(Control::Continue)
    }

    fn pop_to(&mut self, parent: ScreenHandle) {
        self.stack.truncate(parent.index() + 1);
        self.top_mut().typed.clear();
        info!(menu = %self.top().name, depth = self.stack.len(), "returned to menu");
    }

    // ========================================================================
    // OUTPUT
    // ========================================================================

    fn draw(&mut self) -> Result<(), MenuError> {
        let width = self.width.unwrap_or_else(|| detect_width().columns());
        let status = status_line(&self.node_name, Local::now().naive_local());
        let state = self.top();
        let prompt = prompt_line(state);
        let lines = render(&Frame::for_state(state, &status, &prompt, width));

        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Show a recoverable problem and wait for any key.
    fn report(&mut self, diagnostic: &Diagnostic) -> Result<(), MenuError> {
        warn!(%diagnostic, "recoverable error");
        writeln!(self.out)?;
        let message = diagnostic.message(&self.top().accepted_keys());
        writeln!(self.out, "{}", paint(&message, theme::COLOR_ERROR))?;
        write!(self.out, "{}", paint(ACKNOWLEDGE_PROMPT, theme::COLOR_NOTICE))?;
        self.out.flush()?;
        self.keys.read_key()?;
        Ok(())
    }
}

// ============================================================================
// TERMINAL ENTRY POINT
// ============================================================================

/// Restore cooked mode before the default panic output.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        original_hook(panic_info);
    }));
}

/// Run a session on the process's own terminal.
pub fn run(
    root: MenuDefinition,
    preselect: Option<&str>,
    node_name: &str,
    width: Option<usize>,
) -> Result<(), MenuError> {
    install_panic_hook();
    Navigator::new(TerminalKeys::new(), io::stdout())
        .with_node_name(node_name)
        .with_width(width)
        .launch(root, preselect)
}

// ============================================================================
// TESTS
// ============================================================================
