//! Frame composition
//!
//! A frame is: cursor home, one line per screen row (a `~` filler, or the
//! centered banner on the row a third of the way down), each followed by
//! erase-to-end-of-line, then the cursor placed at its current cell. The
//! frame is built in an [`AppendBuffer`] and written in one call.

use std::io::{self, Write};

use crate::buffer::AppendBuffer;
use crate::editor::Cursor;
use crate::escape::{self, CursorPosition};
use crate::term::WindowSize;

/// Welcome text shown near the vertical center
pub const BANNER: &str = "Kilo editor -- version 0.0.1";

/// Marker drawn at the start of rows past the end of the (empty) document
pub const FILLER: &[u8] = b"~";

/// Row that carries the banner
pub fn banner_row(size: WindowSize) -> usize {
    usize::from(size.rows) / 3
}

/// Append the banner line, truncated to `cols` and centered
fn draw_banner(ab: &mut AppendBuffer, cols: usize) {
    let text = &BANNER.as_bytes()[..BANNER.len().min(cols)];
    let padding = (cols - text.len()) / 2;

    ab.append(FILLER);
    for _ in 1..padding {
        ab.append(b" ");
    }
    ab.append(text);
}

/// Append every screen row
pub fn draw_rows(ab: &mut AppendBuffer, size: WindowSize) {
    let rows = usize::from(size.rows);
    let cols = usize::from(size.cols);
    let banner_at = banner_row(size);

    for y in 0..rows {
        if y == banner_at {
            draw_banner(ab, cols);
        } else {
            ab.append(FILLER);
        }

        ab.append(escape::CLEAR_LINE);
        if y + 1 < rows {
            ab.append(escape::CRLF);
        }
    }
}

/// Build one complete frame into `ab`
pub fn compose_frame(ab: &mut AppendBuffer, size: WindowSize, cursor: Cursor) {
    ab.append(escape::CURSOR_HOME);
    draw_rows(ab, size);
    ab.append(CursorPosition::new(cursor.cy, cursor.cx).as_bytes());
}

/// Compose a frame and write it to `out` in a single write
pub fn refresh<W: Write>(out: &mut W, size: WindowSize, cursor: Cursor) -> io::Result<()> {
    let mut ab = AppendBuffer::new();
    compose_frame(&mut ab, size, cursor);
    let result = ab.flush_to(out);
    ab.release();
    result
}
