//! Termination requests while raw mode is active
//!
//! Raw mode turns off signal-generating keys, but SIGTERM and SIGHUP can still
//! arrive from outside. Their handlers only record the signal; the input source
//! notices the record on its next timeout and turns it into
//! `TermError::Terminated`, so the stack unwinds and the terminal is restored
//! by `TerminalMode`'s drop.

use std::sync::atomic::{AtomicI32, Ordering};

use nix::libc::c_int;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

use super::{TermError, TermResult};

/// Signals that request an orderly shutdown
pub const TERMINATION_SIGNALS: [Signal; 2] = [Signal::SIGTERM, Signal::SIGHUP];

static PENDING: AtomicI32 = AtomicI32::new(0);

extern "C" fn record_signal(signum: c_int) {
    PENDING.store(signum, Ordering::SeqCst);
}

/// Handle to a slot holding the number of a pending termination signal
#[derive(Debug, Clone, Copy)]
pub struct TerminationFlag {
    slot: &'static AtomicI32,
}

impl TerminationFlag {
    /// Wrap an arbitrary slot; 0 means nothing pending
    pub fn from_static(slot: &'static AtomicI32) -> Self {
        Self { slot }
    }

    /// The termination signal received so far, if any
    pub fn pending(&self) -> Option<Signal> {
        match self.slot.load(Ordering::SeqCst) {
            0 => None,
            signum => Signal::try_from(signum).ok(),
        }
    }

    /// Record `signal` as if its handler had run
    pub fn request(&self, signal: Signal) {
        self.slot.store(signal as c_int, Ordering::SeqCst);
    }
}

/// Install handlers for `TERMINATION_SIGNALS`
pub fn install() -> TermResult<TerminationFlag> {
    let action = SigAction::new(
        SigHandler::Handler(record_signal),
        SaFlags::empty(),
        SigSet::empty(),
    );

    for sig in TERMINATION_SIGNALS {
        // SAFETY: the handler only performs an atomic store
        unsafe { signal::sigaction(sig, &action) }.map_err(TermError::Signal)?;
    }

    tracing::debug!("installed termination signal handlers");
    Ok(TerminationFlag::from_static(&PENDING))
}
