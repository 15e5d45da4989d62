//! Terminal control for Unix ttys
//!
//! This module owns everything that talks to the terminal driver directly:
//! switching between cooked and raw line discipline, querying the window
//! size, and reacting to termination requests while raw mode is active.

mod mode;
pub mod signal;

use std::os::unix::io::AsRawFd;

use nix::errno::Errno;
use nix::libc;

pub use mode::{raw_attributes, ModePhase, TerminalMode};
pub use signal::TerminationFlag;

/// Error type for terminal operations
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("Failed to get terminal attributes: {0}")]
    GetAttr(#[source] nix::Error),

    #[error("Failed to set terminal attributes: {0}")]
    SetAttr(#[source] nix::Error),

    #[error("Failed to get window size: {0}")]
    WindowSize(#[source] nix::Error),

    #[error("Terminal reported an empty window ({rows}x{cols})")]
    EmptyWindow { rows: u16, cols: u16 },

    #[error("Failed to read input: {0}")]
    Read(#[source] nix::Error),

    #[error("Failed to install signal handler: {0}")]
    Signal(#[source] nix::Error),

    #[error("Input source closed")]
    InputClosed,

    #[error("Terminated by {}", .0.as_str())]
    Terminated(nix::sys::signal::Signal),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for terminal operations
pub type TermResult<T> = Result<T, TermError>;

/// Screen dimensions in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub cols: u16,
}

impl WindowSize {
    /// Create a new window size
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Query the window size of the terminal behind `fd`
    ///
    /// A zero row or column count is reported as an error; callers have no
    /// fallback size to use instead.
    pub fn query<Fd: AsRawFd>(fd: &Fd) -> TermResult<Self> {
        let mut ws = libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };

        // SAFETY: TIOCGWINSZ only writes into the winsize we pass in
        let result = unsafe { libc::ioctl(fd.as_raw_fd(), libc::TIOCGWINSZ, &mut ws) };

        if result == -1 {
            return Err(TermError::WindowSize(Errno::last()));
        }
        if ws.ws_row == 0 || ws.ws_col == 0 {
            return Err(TermError::EmptyWindow {
                rows: ws.ws_row,
                cols: ws.ws_col,
            });
        }

        Ok(Self::new(ws.ws_row, ws.ws_col))
    }
}
