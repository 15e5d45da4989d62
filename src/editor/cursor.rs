//! Cursor position and directional movement

use crate::term::WindowSize;

/// One-cell movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Cursor cell, 0-indexed
///
/// Movement is clamped to `[0, rows-1] × [0, cols-1]`, so the position is
/// always a cell that exists on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Column
    pub cx: usize,
    /// Row
    pub cy: usize,
}

impl Cursor {
    /// Create a cursor at the home position
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cursor at (`cx`, `cy`)
    pub fn at(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }

    /// Move one cell in `direction`, stopping at the screen edge
    pub fn move_by(&mut self, direction: Direction, size: WindowSize) {
        let max_row = usize::from(size.rows).saturating_sub(1);
        let max_col = usize::from(size.cols).saturating_sub(1);

        match direction {
            Direction::Up => self.cy = self.cy.saturating_sub(1),
            Direction::Down => self.cy = (self.cy + 1).min(max_row),
            Direction::Left => self.cx = self.cx.saturating_sub(1),
            Direction::Right => self.cx = (self.cx + 1).min(max_col),
        }
    }
}
