//! Keyboard input decoding
//!
//! Bytes arrive one at a time from a [`ByteSource`] that waits a bounded time
//! for each one. [`read_key`] turns them into exactly one [`Key`] per call,
//! assembling the three-byte `ESC [ A..D` arrow sequences.
//!
//! # Escape resolution
//!
//! After an ESC byte both follow-up bytes are awaited, each with one bounded
//! read, before the sequence is classified. A timeout at either position means
//! the user pressed Escape on its own, and the key resolves immediately. Any
//! complete triple other than `ESC [ A..D` is one Escape key; its bytes are
//! dropped and nothing is carried over to the next call.

use std::collections::VecDeque;
use std::os::fd::AsFd;
use std::os::unix::io::AsRawFd;

use nix::errno::Errno;
use nix::libc;

use crate::editor::Direction;
use crate::term::{TermError, TermResult, TerminationFlag};

/// The escape byte that starts every control sequence
pub const ESC: u8 = 0x1b;

/// Byte produced by holding Ctrl with `k`
pub const fn ctrl_key(k: u8) -> u8 {
    k & 0x1f
}

/// Ctrl+Q
pub const QUIT: u8 = ctrl_key(b'q');

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Any byte that is not the start of an escape sequence
    Char(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// A lone ESC, or a sequence we do not recognise
    Escape,
}

impl Key {
    /// Movement direction for arrow keys
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            Key::Char(_) | Key::Escape => None,
        }
    }
}

/// A stream of input bytes with a bounded wait per byte
pub trait ByteSource {
    /// Read one byte
    ///
    /// `Ok(None)` means the wait elapsed with no data; that is not an error
    /// and the caller may try again.
    fn read_byte(&mut self) -> TermResult<Option<u8>>;
}

/// Decode one key press from `source`
///
/// Blocks, re-polling through timeouts, until the first byte arrives. Any read
/// error other than a timeout is returned.
pub fn read_key<S: ByteSource + ?Sized>(source: &mut S) -> TermResult<Key> {
    let byte = loop {
        if let Some(b) = source.read_byte()? {
            break b;
        }
    };

    if byte != ESC {
        tracing::trace!(byte, "key");
        return Ok(Key::Char(byte));
    }

    let key = read_escape_tail(source)?;
    tracing::trace!(?key, "escape key");
    Ok(key)
}

/// Resolve the bytes following an ESC
fn read_escape_tail<S: ByteSource + ?Sized>(source: &mut S) -> TermResult<Key> {
    let Some(introducer) = source.read_byte()? else {
        return Ok(Key::Escape);
    };
    let Some(final_byte) = source.read_byte()? else {
        tracing::debug!(introducer, "escape sequence timed out");
        return Ok(Key::Escape);
    };

    Ok(match (introducer, final_byte) {
        (b'[', b'A') => Key::ArrowUp,
        (b'[', b'B') => Key::ArrowDown,
        (b'[', b'C') => Key::ArrowRight,
        (b'[', b'D') => Key::ArrowLeft,
        _ => {
            tracing::debug!(introducer, final_byte, "unrecognised escape sequence");
            Key::Escape
        },
    })
}

/// Byte source over a raw-mode terminal
///
/// Relies on the terminal's VMIN=0/VTIME read timeout: a read returning zero
/// bytes is a timeout. If a [`TerminationFlag`] is attached, a pending
/// termination signal is reported as `TermError::Terminated` at the next
/// timeout.
pub struct TtyInput<F: AsFd> {
    fd: F,
    termination: Option<TerminationFlag>,
}

impl<F: AsFd> TtyInput<F> {
    pub fn new(fd: F) -> Self {
        Self {
            fd,
            termination: None,
        }
    }

    /// Report termination requests recorded in `flag`
    pub fn with_termination(mut self, flag: TerminationFlag) -> Self {
        self.termination = Some(flag);
        self
    }

    fn timed_out(&self) -> TermResult<Option<u8>> {
        match self.termination.and_then(|flag| flag.pending()) {
            Some(signal) => Err(TermError::Terminated(signal)),
            None => Ok(None),
        }
    }
}

impl<F: AsFd> ByteSource for TtyInput<F> {
    fn read_byte(&mut self) -> TermResult<Option<u8>> {
        let mut byte = 0u8;
        // SAFETY: reads at most one byte into a local the kernel may write
        let n = unsafe {
            libc::read(
                self.fd.as_fd().as_raw_fd(),
                (&mut byte as *mut u8).cast(),
                1,
            )
        };

        match n {
            1 => Ok(Some(byte)),
            0 => self.timed_out(),
            _ => match Errno::last() {
                // EAGAIN and EWOULDBLOCK are the same value on Linux
                Errno::EAGAIN | Errno::EINTR => self.timed_out(),
                e => Err(TermError::Read(e)),
            },
        }
    }
}

/// One step of scripted input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scripted {
    Byte(u8),
    Timeout,
}

/// In-memory byte source for tests and headless runs
///
/// Yields the scripted bytes and timeouts in order, then reports
/// `TermError::InputClosed`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    steps: VecDeque<Scripted>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script that delivers `bytes` back to back
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new().bytes(bytes)
    }

    /// Queue `bytes`, each arriving without delay
    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.steps.extend(bytes.iter().copied().map(Scripted::Byte));
        self
    }

    /// Queue one read that times out
    pub fn timeout(mut self) -> Self {
        self.steps.push_back(Scripted::Timeout);
        self
    }

    /// Steps not yet consumed
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl ByteSource for ScriptedInput {
    fn read_byte(&mut self) -> TermResult<Option<u8>> {
        match self.steps.pop_front() {
            Some(Scripted::Byte(b)) => Ok(Some(b)),
            Some(Scripted::Timeout) => Ok(None),
            None => Err(TermError::InputClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::AtomicI32;

    fn decode(input: &mut ScriptedInput) -> Key {
        read_key(input).expect("decode")
    }

    #[test]
    fn test_plain_bytes() {
        let mut input = ScriptedInput::from_bytes(b"a\x11");
        assert_eq!(decode(&mut input), Key::Char(b'a'));
        assert_eq!(decode(&mut input), Key::Char(QUIT));
    }

    #[test]
    fn test_ctrl_key() {
        assert_eq!(ctrl_key(b'q'), 0x11);
        assert_eq!(ctrl_key(b'a'), 0x01);
    }

    #[test]
    fn test_timeouts_before_first_byte_are_skipped() {
        let mut input = ScriptedInput::new().timeout().timeout().bytes(b"x");
        assert_eq!(decode(&mut input), Key::Char(b'x'));
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_arrow_keys() {
        let mut input = ScriptedInput::from_bytes(b"\x1b[A\x1b[B\x1b[C\x1b[D");
        assert_eq!(decode(&mut input), Key::ArrowUp);
        assert_eq!(decode(&mut input), Key::ArrowDown);
        assert_eq!(decode(&mut input), Key::ArrowRight);
        assert_eq!(decode(&mut input), Key::ArrowLeft);
    }

    #[test]
    fn test_lone_escape_resolves_on_first_timeout() {
        let mut input = ScriptedInput::new().bytes(b"\x1b").timeout().bytes(b"k");
        assert_eq!(decode(&mut input), Key::Escape);
        assert_eq!(decode(&mut input), Key::Char(b'k'));
    }

    #[test]
    fn test_timeout_after_csi_is_escape() {
        let mut input = ScriptedInput::new().bytes(b"\x1b[").timeout().bytes(b"A");
        assert_eq!(decode(&mut input), Key::Escape);
        // The late byte is an ordinary key, not half of an arrow
        assert_eq!(decode(&mut input), Key::Char(b'A'));
    }

    #[test]
    fn test_unknown_introducer_consumes_whole_triple() {
        let mut input = ScriptedInput::from_bytes(b"\x1bOzk");
        assert_eq!(decode(&mut input), Key::Escape);
        assert_eq!(decode(&mut input), Key::Char(b'k'));
    }

    #[test]
    fn test_ss3_arrow_does_not_leak_final_byte() {
        let mut input = ScriptedInput::from_bytes(b"\x1bOd\x1bOA");
        assert_eq!(decode(&mut input), Key::Escape);
        assert_eq!(decode(&mut input), Key::Escape);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_timeout_after_unknown_introducer_is_escape() {
        let mut input = ScriptedInput::new().bytes(b"\x1bO").timeout().bytes(b"x");
        assert_eq!(decode(&mut input), Key::Escape);
        assert_eq!(decode(&mut input), Key::Char(b'x'));
    }

    #[test]
    fn test_unknown_final_byte_is_escape() {
        let mut input = ScriptedInput::from_bytes(b"\x1b[Zq");
        assert_eq!(decode(&mut input), Key::Escape);
        assert_eq!(decode(&mut input), Key::Char(b'q'));
    }

    #[test]
    fn test_closed_source_is_error() {
        let mut input = ScriptedInput::from_bytes(b"\x1b[");
        assert!(matches!(read_key(&mut input), Err(TermError::InputClosed)));
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(Key::ArrowUp.direction(), Some(Direction::Up));
        assert_eq!(Key::ArrowLeft.direction(), Some(Direction::Left));
        assert_eq!(Key::Char(b'w').direction(), None);
        assert_eq!(Key::Escape.direction(), None);
    }

    #[test]
    fn test_tty_input_reads_from_pty() {
        use nix::pty::openpty;
        use nix::sys::termios;

        let pty = openpty(None, None).expect("Failed to open pty");
        let original = termios::tcgetattr(&pty.slave).expect("tcgetattr");
        let raw = crate::term::raw_attributes(&original, 1);
        termios::tcsetattr(pty.slave.as_fd(), termios::SetArg::TCSANOW, &raw).expect("tcsetattr");

        let mut master = std::fs::File::from(pty.master);
        master.write_all(b"\x1b[C").expect("write");
        let mut input = TtyInput::new(&pty.slave);
        assert_eq!(read_key(&mut input).expect("decode"), Key::ArrowRight);

        // Nothing queued: the read times out instead of blocking
        assert_eq!(input.read_byte().expect("read"), None);
    }

    #[test]
    fn test_tty_input_reports_termination_on_timeout() {
        use nix::pty::openpty;
        use nix::sys::signal::Signal;
        use nix::sys::termios;

        static SLOT: AtomicI32 = AtomicI32::new(0);
        let flag = TerminationFlag::from_static(&SLOT);

        let pty = openpty(None, None).expect("Failed to open pty");
        let original = termios::tcgetattr(&pty.slave).expect("tcgetattr");
        let raw = crate::term::raw_attributes(&original, 1);
        termios::tcsetattr(pty.slave.as_fd(), termios::SetArg::TCSANOW, &raw).expect("tcsetattr");

        let mut input = TtyInput::new(&pty.slave).with_termination(flag);
        flag.request(Signal::SIGTERM);
        assert!(matches!(
            input.read_byte(),
            Err(TermError::Terminated(Signal::SIGTERM))
        ));
    }
}
