//! Raw-mode lifecycle for a terminal file descriptor
//!
//! `TerminalMode` captures the driver's line-discipline settings once, switches
//! the terminal to raw mode, and puts the captured settings back exactly once.
//! A value only exists after a successful capture, so a restore can never run
//! against attributes that were never read.

use std::os::fd::AsFd;

use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};

use super::{TermError, TermResult};

/// Where the terminal is in its cooked → raw → restored lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModePhase {
    /// Original attributes captured, terminal untouched
    Cooked,
    /// Raw attributes applied
    Raw,
    /// Original attributes reapplied; final
    Restored,
}

/// Owner of a terminal's original attribute state
///
/// Dropping a `TerminalMode` restores the original attributes if they have not
/// been restored already, so every exit path that unwinds the stack leaves the
/// terminal in the state it was found in.
pub struct TerminalMode<F: AsFd> {
    fd: F,
    original: Termios,
    phase: ModePhase,
}

impl<F: AsFd> TerminalMode<F> {
    /// Capture the current attributes of the terminal behind `fd`
    pub fn capture(fd: F) -> TermResult<Self> {
        let original = termios::tcgetattr(fd.as_fd()).map_err(TermError::GetAttr)?;
        tracing::debug!("captured original terminal attributes");

        Ok(Self {
            fd,
            original,
            phase: ModePhase::Cooked,
        })
    }

    /// Switch the terminal to raw mode
    ///
    /// Reads return after at most `timeout_ds` tenths of a second, possibly
    /// with no bytes. A timeout of 0 is raised to 1 so reads never spin.
    pub fn enter_raw(&mut self, timeout_ds: u8) -> TermResult<()> {
        match self.phase {
            ModePhase::Raw => return Ok(()),
            ModePhase::Restored => {
                tracing::warn!("refusing to re-enter raw mode after restore");
                return Ok(());
            },
            ModePhase::Cooked => {},
        }

        let raw = raw_attributes(&self.original, timeout_ds);
        termios::tcsetattr(self.fd.as_fd(), SetArg::TCSAFLUSH, &raw)
            .map_err(TermError::SetAttr)?;

        self.phase = ModePhase::Raw;
        tracing::debug!(timeout_ds = timeout_ds.max(1), "entered raw mode");
        Ok(())
    }

    /// Reapply the captured attributes
    ///
    /// A second call after a successful restore does nothing.
    pub fn restore(&mut self) -> TermResult<()> {
        if self.phase == ModePhase::Restored {
            return Ok(());
        }

        termios::tcsetattr(self.fd.as_fd(), SetArg::TCSAFLUSH, &self.original)
            .map_err(TermError::SetAttr)?;

        self.phase = ModePhase::Restored;
        tracing::debug!("restored original terminal attributes");
        Ok(())
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ModePhase {
        self.phase
    }

    /// The attributes captured at construction
    pub fn original(&self) -> &Termios {
        &self.original
    }

    /// The terminal file descriptor
    pub fn fd(&self) -> &F {
        &self.fd
    }
}

impl<F: AsFd> Drop for TerminalMode<F> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::error!("failed to restore terminal on drop: {}", e);
        }
    }
}

/// Derive raw-mode attributes from `original`
///
/// Input: no break-to-SIGINT, no CR→NL, no parity check, no stripping, no
/// XON/XOFF. Output: no post-processing. 8-bit characters. No echo, no
/// canonical input, no extended input processing, no signal keys. Reads use
/// VMIN=0 with a VTIME of `timeout_ds` deciseconds.
pub fn raw_attributes(original: &Termios, timeout_ds: u8) -> Termios {
    let mut raw = original.clone();

    raw.input_flags.remove(
        InputFlags::BRKINT
            | InputFlags::ICRNL
            | InputFlags::INPCK
            | InputFlags::ISTRIP
            | InputFlags::IXON,
    );
    raw.output_flags.remove(OutputFlags::OPOST);
    raw.control_flags.insert(ControlFlags::CS8);
    raw.local_flags
        .remove(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);

    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = timeout_ds.max(1);

    raw
}
