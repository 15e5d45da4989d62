//! Editor state and the main event loop
//!
//! The loop is: draw a frame, decode one key, act on it, repeat. Ctrl+Q
//! clears the screen and ends the loop; arrow keys move the cursor; anything
//! else is ignored.

mod cursor;

use std::io::Write;

pub use cursor::{Cursor, Direction};

use crate::escape;
use crate::input::{read_key, ByteSource, Key, QUIT};
use crate::screen;
use crate::term::{TermResult, WindowSize};

/// Everything a frame is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorState {
    pub size: WindowSize,
    pub cursor: Cursor,
}

/// Outcome of handling one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// The editor: state plus key dispatch
#[derive(Debug)]
pub struct Editor {
    state: EditorState,
    /// Also move with w/a/s/d
    wasd_navigation: bool,
}

impl Editor {
    /// Create an editor for a screen of `size`, cursor at home
    pub fn new(size: WindowSize) -> Self {
        Self {
            state: EditorState {
                size,
                cursor: Cursor::new(),
            },
            wasd_navigation: false,
        }
    }

    pub fn with_wasd_navigation(mut self, enabled: bool) -> Self {
        self.wasd_navigation = enabled;
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    fn direction_for(&self, key: Key) -> Option<Direction> {
        if let Some(dir) = key.direction() {
            return Some(dir);
        }
        if !self.wasd_navigation {
            return None;
        }
        match key {
            Key::Char(b'w') => Some(Direction::Up),
            Key::Char(b'a') => Some(Direction::Left),
            Key::Char(b's') => Some(Direction::Down),
            Key::Char(b'd') => Some(Direction::Right),
            _ => None,
        }
    }

    /// Apply one key to the editor state
    pub fn process_key(&mut self, key: Key) -> Action {
        if key == Key::Char(QUIT) {
            return Action::Quit;
        }

        if let Some(dir) = self.direction_for(key) {
            self.state.cursor.move_by(dir, self.state.size);
            tracing::trace!(cx = self.state.cursor.cx, cy = self.state.cursor.cy, "cursor moved");
        }
        Action::Continue
    }

    /// Run until the quit key
    ///
    /// Each iteration writes one full frame to `out`, then blocks on `input`
    /// for one key. On quit the screen is cleared and the cursor sent home;
    /// no further frame is drawn.
    pub fn run<S, W>(&mut self, input: &mut S, out: &mut W) -> TermResult<()>
    where
        S: ByteSource + ?Sized,
        W: Write,
    {
        loop {
            screen::refresh(out, self.state.size, self.state.cursor)?;

            let key = read_key(input)?;
            if self.process_key(key) == Action::Quit {
                tracing::info!("quit requested");
                clear_screen(out)?;
                return Ok(());
            }
        }
    }
}

/// Erase the display and home the cursor
pub fn clear_screen<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.write_all(escape::CLEAR_SCREEN)?;
    out.write_all(escape::CURSOR_HOME)?;
    out.flush()
}
