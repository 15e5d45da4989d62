//! ANSI/VT100 output sequences
//!
//! Only the handful of sequences the editor emits: erase display, home,
//! erase line, and absolute cursor placement.

use std::io::Write;

/// ESC [ 2 J - erase the whole display
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";

/// ESC [ H - move the cursor to row 1, column 1
pub const CURSOR_HOME: &[u8] = b"\x1b[H";

/// ESC [ K - erase from the cursor to the end of the line
pub const CLEAR_LINE: &[u8] = b"\x1b[K";

/// Row separator inside a frame
pub const CRLF: &[u8] = b"\r\n";

/// Longest cursor-position sequence we ever build: ESC [ 65536 ; 65536 H
const CUP_CAPACITY: usize = 32;

/// ESC [ row ; col H, stored inline
///
/// Row and column are 1-indexed on the wire. Anything that would not fit the
/// inline buffer is truncated.
#[derive(Clone, Copy)]
pub struct CursorPosition {
    buf: [u8; CUP_CAPACITY],
    len: usize,
}

impl CursorPosition {
    /// Encode a move to the 0-indexed cell (`row`, `col`)
    pub fn new(row: usize, col: usize) -> Self {
        let mut buf = [0u8; CUP_CAPACITY];
        let mut slice = &mut buf[..];
        // A full slice only cuts the sequence short
        let _ = write!(slice, "\x1b[{};{}H", row + 1, col + 1);
        let len = CUP_CAPACITY - slice.len();
        Self { buf, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl std::fmt::Debug for CursorPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CursorPosition({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}
