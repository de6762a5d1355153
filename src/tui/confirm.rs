//! Yes/no confirmation over cooked line input.
//!
//! Token sets are merged per call from the caller's tokens and the
//! process-wide defaults. The exit set used by one call is a local copy
//! of the global one, narrowed so it never shadows a yes or no token.

use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::iter;

use tracing::{debug, info, warn};

use crate::synonyms::{
    DEFAULT_NEGATIVE, DEFAULT_POSITIVE, EXIT_NOTICE, EXIT_SYNONYMS, normalize_token,
};

use super::theme::{self, paint};

/// Prompt used when the caller supplies none.
pub const DEFAULT_PROMPT: &str = "[?] Are you sure? (Y/n) or X to exit: ";

// ============================================================================
// TOKENS
// ============================================================================

/// One normalized answer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Token {
    /// A line of input, trimmed and lowercased. May be empty.
    Word(String),
    /// End of input.
    Absent,
}

impl Token {
    pub fn word(raw: &str) -> Self {
        Token::Word(normalize_token(raw))
    }

    /// Token for one line read, `None` being end of input.
    pub fn from_line(line: Option<&str>) -> Self {
        line.map_or(Token::Absent, Token::word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) if w.is_empty() => f.write_str("<enter>"),
            Token::Word(w) => f.write_str(w),
            Token::Absent => f.write_str("<eof>"),
        }
    }
}

/// Outcome of a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Exit,
}

// ============================================================================
// TOKEN SETS
// ============================================================================

/// Effective token sets for one confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmSpec {
    pub positive: BTreeSet<Token>,
    pub negative: BTreeSet<Token>,
    pub exit: BTreeSet<Token>,
}

impl Default for ConfirmSpec {
    fn default() -> Self {
        Self::merge(iter::empty::<&str>(), iter::empty::<&str>())
    }
}

impl ConfirmSpec {
    /// Merge caller tokens with the defaults.
    ///
    /// A token the caller lists as both positive and negative is dropped
    /// from both, and the defaults do not bring it back.
    pub fn merge<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let caller_positive = words(positive);
        let caller_negative = words(negative);

        let conflicts: BTreeSet<Token> = caller_positive
            .intersection(&caller_negative)
            .cloned()
            .collect();
        for token in &conflicts {
            warn!(token = %token, "confirmation token is both positive and negative, ignoring it");
        }

        let caller_negative: BTreeSet<Token> =
            caller_negative.difference(&conflicts).cloned().collect();

        let mut positive: BTreeSet<Token> =
            caller_positive.difference(&conflicts).cloned().collect();
        positive.extend(
            default_positive()
                .filter(|t| !caller_negative.contains(t) && !conflicts.contains(t)),
        );

        let mut negative = caller_negative;
        negative.extend(
            default_negative().filter(|t| !positive.contains(t) && !conflicts.contains(t)),
        );

        let exit = global_exit()
            .filter(|t| !negative.contains(t) && !positive.contains(t))
            .collect();

        ConfirmSpec {
            positive,
            negative,
            exit,
        }
    }

    pub fn classify(&self, token: &Token) -> Option<Answer> {
        if self.exit.contains(token) {
            Some(Answer::Exit)
        } else if self.negative.contains(token) {
            Some(Answer::No)
        } else if self.positive.contains(token) {
            Some(Answer::Yes)
        } else {
            None
        }
    }

    /// Message shown for an answer in none of the sets.
    pub fn invalid_message(&self) -> String {
        format!(
            "[!] Invalid input. Please choose from: {} for yes, {} for no ({}) to exit.",
            list(&self.positive),
            list(&self.negative),
            list(&self.exit)
        )
    }
}

fn words<I>(tokens: I) -> BTreeSet<Token>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tokens.into_iter().map(|t| Token::word(t.as_ref())).collect()
}

fn default_positive() -> impl Iterator<Item = Token> {
    DEFAULT_POSITIVE.iter().map(|t| Token::word(t))
}

fn default_negative() -> impl Iterator<Item = Token> {
    DEFAULT_NEGATIVE
        .iter()
        .map(|t| Token::word(t))
        .chain(iter::once(Token::Absent))
}

fn global_exit() -> impl Iterator<Item = Token> {
    EXIT_SYNONYMS
        .iter()
        .map(|t| Token::word(t))
        .chain(iter::once(Token::Absent))
}

fn list(tokens: &BTreeSet<Token>) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// LINE I/O
// ============================================================================

/// Read one line; `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

/// Block until the user presses Enter (or input ends).
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<()> {
    write!(out, "{}", paint("Press Enter to continue...", theme::COLOR_NOTICE))?;
    out.flush()?;
    read_line(input)?;
    writeln!(out)
}

/// Ask until the answer falls in one of the sets.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    spec: &ConfirmSpec,
) -> io::Result<Answer> {
    loop {
        write!(out, "{}", paint(prompt, theme::COLOR_PROMPT))?;
        out.flush()?;

        let token = Token::from_line(read_line(input)?.as_deref());
        debug!(token = %token, "confirmation answer");

        if let Some(answer) = spec.classify(&token) {
            return Ok(answer);
        }

        writeln!(out)?;
        writeln!(out, "{}", paint(&spec.invalid_message(), theme::COLOR_ERROR))?;
        wait_for_enter(input, out)?;
    }
}

/// Confirm on the real terminal.
///
/// Empty token lists use the defaults. An exit answer terminates the
/// process.
pub fn confirm(prompt: Option<&str>, positive: &[&str], negative: &[&str]) -> io::Result<bool> {
    let spec = ConfirmSpec::merge(positive, negative);
    let mut out = io::stdout();
    let answer = ask(
        &mut io::stdin().lock(),
        &mut out,
        prompt.unwrap_or(DEFAULT_PROMPT),
        &spec,
    )?;

    match answer {
        Answer::Yes => Ok(true),
        Answer::No => Ok(false),
        Answer::Exit => {
            info!("exit requested from confirmation");
            writeln!(out, "{EXIT_NOTICE}")?;
            out.flush()?;
            std::process::exit(0)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
