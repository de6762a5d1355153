//! Key acquisition and decoding.
//!
//! Raw mode is held only for the duration of a single read, through
//! [`RawModeGuard`]. Actions run between reads and therefore always see
//! the terminal in cooked mode, ready for line input.
//!
//! Decoding is a pure function of the bytes read; acquisition is the
//! only part that touches the terminal.

use std::collections::VecDeque;
use std::io::{self, Read};

use tracing::debug;

/// Escape byte; starts arrow-key sequences.
pub const ESC: u8 = 0x1b;

/// ETX byte; what Ctrl+C sends in raw mode.
pub const CTRL_C: u8 = 0x03;

/// Delete byte; what the Backspace key sends in raw mode.
pub const DEL: u8 = 0x7f;

/// How long to wait after ESC for the rest of a sequence.
///
/// Terminals send a whole sequence in one write, so anything arriving
/// later than this is a separate keystroke.
pub const ESCAPE_SEQUENCE_WAIT_MS: i32 = 50;

/// Recognized 3-byte escape sequences.
const ESCAPE_TABLE: [([u8; 3], KeyEvent); 4] = [
    ([ESC, b'[', b'A'], KeyEvent::ArrowUp),
    ([ESC, b'[', b'B'], KeyEvent::ArrowDown),
    ([ESC, b'[', b'C'], KeyEvent::ArrowRight),
    ([ESC, b'[', b'D'], KeyEvent::ArrowLeft),
];

// ============================================================================
// KEY EVENTS
// ============================================================================

/// One logical keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Backspace,
    Escape,
    /// Ctrl+C. Raw mode suppresses SIGINT, so it arrives as a key.
    Interrupt,
    /// Any other character. Letters arrive uppercased.
    Character(char),
    /// A single decimal digit, 0-9.
    Digit(u8),
}

impl KeyEvent {
    /// The typed text this key contributes, if it is a character or digit.
    pub fn as_text(&self) -> Option<String> {
        match self {
            KeyEvent::Character(c) => Some(c.to_string()),
            KeyEvent::Digit(d) => Some(d.to_string()),
            _ => None,
        }
    }
}

/// Anything the engine can pull keystrokes from.
pub trait KeySource {
    /// Block until one keystroke is available.
    fn read_key(&mut self) -> io::Result<KeyEvent>;
}

// ============================================================================
// PURE DECODING
// ============================================================================

/// Classify the bytes of one keystroke.
///
/// Never fails: unmapped input becomes a `Character` built from its first
/// byte. An unknown 3-byte escape sequence is returned as
/// `Character('\x1b')`. An empty slice means nothing was read and is
/// treated as Escape.
pub fn decode(bytes: &[u8]) -> KeyEvent {
    match bytes {
        [] | [ESC] => KeyEvent::Escape,
        [ESC, ..] => ESCAPE_TABLE
            .iter()
            .find(|(seq, _)| seq.as_slice() == bytes)
            .map(|(_, key)| *key)
            .unwrap_or(KeyEvent::Character(char::from(ESC))),
        [b'\n'] | [b'\r'] => KeyEvent::Enter,
        [DEL] => KeyEvent::Backspace,
        [CTRL_C] => KeyEvent::Interrupt,
        [b] if b.is_ascii_alphabetic() => KeyEvent::Character(char::from(b.to_ascii_uppercase())),
        [b] if b.is_ascii_digit() => KeyEvent::Digit(b - b'0'),
        [b] => KeyEvent::Character(char::from(*b)),
        [first, ..] => decode_utf8(bytes).unwrap_or(KeyEvent::Character(char::from(*first))),
    }
}

fn decode_utf8(bytes: &[u8]) -> Option<KeyEvent> {
    let text = std::str::from_utf8(bytes).ok()?;
    let mut chars = text.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_alphabetic() {
        Some(KeyEvent::Character(c.to_uppercase().next().unwrap_or(c)))
    } else {
        Some(KeyEvent::Character(c))
    }
}

/// Length of a UTF-8 sequence given its lead byte (1 for ASCII or junk).
fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

// ============================================================================
// STREAM READING
// ============================================================================

/// Read and decode one keystroke from a byte stream.
///
/// After an ESC byte, `pending` reports whether more input is already
/// waiting. If not, the key was a bare Escape; otherwise exactly two more
/// bytes are read and looked up as a sequence.
pub fn read_key_from<R, P>(reader: &mut R, mut pending: P) -> io::Result<KeyEvent>
where
    R: Read,
    P: FnMut() -> io::Result<bool>,
{
    let mut first = [0u8; 1];
    reader.read_exact(&mut first)?;
    let lead = first[0];

    let key = if lead == ESC {
        if pending()? {
            let mut seq = [ESC, 0, 0];
            reader.read_exact(&mut seq[1..])?;
            decode(&seq)
        } else {
            KeyEvent::Escape
        }
    } else {
        let width = utf8_width(lead);
        let mut buf = [lead, 0, 0, 0];
        if width > 1 {
            reader.read_exact(&mut buf[1..width])?;
        }
        decode(&buf[..width])
    };

    debug!(?key, "decoded key");
    Ok(key)
}

// ============================================================================
// TERMINAL
// ============================================================================

/// Switch between raw and cooked input.
pub trait TerminalMode {
    fn is_raw(&self) -> io::Result<bool>;
    fn set_raw(&self, raw: bool) -> io::Result<()>;
}

/// The controlling terminal, through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn is_raw(&self) -> io::Result<bool> {
        crossterm::terminal::is_raw_mode_enabled()
    }

    fn set_raw(&self, raw: bool) -> io::Result<()> {
        if raw {
            crossterm::terminal::enable_raw_mode()
        } else {
            crossterm::terminal::disable_raw_mode()
        }
    }
}

/// Scoped raw mode.
///
/// Restores the mode that was active before acquisition when dropped,
/// including on error paths out of the read.
pub struct RawModeGuard<M: TerminalMode = CrosstermMode> {
    mode: M,
    was_raw: bool,
}

impl RawModeGuard<CrosstermMode> {
    pub fn acquire() -> io::Result<Self> {
        Self::acquire_with(CrosstermMode)
    }
}

impl<M: TerminalMode> RawModeGuard<M> {
    pub fn acquire_with(mode: M) -> io::Result<Self> {
        let was_raw = mode.is_raw()?;
        if !was_raw {
            mode.set_raw(true)?;
        }
        Ok(RawModeGuard { mode, was_raw })
    }
}

impl<M: TerminalMode> Drop for RawModeGuard<M> {
    fn drop(&mut self) {
        if !self.was_raw {
            // Best effort: nothing useful to do if restoring fails
            let _ = self.mode.set_raw(false);
        }
    }
}

/// Read one key with `mode` held raw for exactly the duration of the read.
pub fn read_key_raw<M, R, P>(mode: M, reader: &mut R, pending: P) -> io::Result<KeyEvent>
where
    M: TerminalMode,
    R: Read,
    P: FnMut() -> io::Result<bool>,
{
    let _raw = RawModeGuard::acquire_with(mode)?;
    read_key_from(reader, pending)
}

/// Keystrokes from the process's standard input.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        TerminalKeys
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<KeyEvent> {
        read_key_raw(CrosstermMode, &mut UnbufferedStdin, || {
            stdin_pending(ESCAPE_SEQUENCE_WAIT_MS)
        })
    }
}

/// Byte-at-a-time stdin.
///
/// `std::io::Stdin` buffers ahead, which would hide the tail of an escape
/// sequence from `poll`. Reading the descriptor directly keeps every
/// unread byte in the kernel where `poll` can see it.
#[cfg(unix)]
struct UnbufferedStdin;

#[cfg(unix)]
impl Read for UnbufferedStdin {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // SAFETY: buf is a valid, writable region of buf.len() bytes.
        let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(n as usize)
        }
    }
}

#[cfg(unix)]
fn stdin_pending(timeout_ms: i32) -> io::Result<bool> {
    let mut fds = libc::pollfd {
        fd: libc::STDIN_FILENO,
        events: libc::POLLIN,
        revents: 0,
    };
    // SAFETY: one valid pollfd, count matches.
    let rc = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    if rc < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(rc > 0 && (fds.revents & libc::POLLIN) != 0)
}

#[cfg(not(unix))]
struct UnbufferedStdin;

#[cfg(not(unix))]
impl Read for UnbufferedStdin {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        io::stdin().read(buf)
    }
}

#[cfg(not(unix))]
fn stdin_pending(_timeout_ms: i32) -> io::Result<bool> {
    Ok(true)
}

// ============================================================================
// SCRIPTED INPUT
// ============================================================================

/// A fixed sequence of keys, for tests and non-interactive drivers.
///
/// Once exhausted, every read fails with `UnexpectedEof`, which the
/// engine treats as an unusable input stream.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        ScriptedKeys {
            keys: keys.into_iter().collect(),
        }
    }

    /// Keys not yet consumed.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<KeyEvent> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys"))
    }
}

// ============================================================================
// TESTS
// ============================================================================
