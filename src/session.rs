//! One interactive editing session on a real terminal
//!
//! `run_session` owns the raw-mode lifetime: the terminal is restored before
//! it returns, on success and on every error. `report_fatal` is what the
//! binary does with such an error afterwards.

use std::io::Write;
use std::os::fd::AsFd;

use crate::config::Config;
use crate::editor::{self, Editor};
use crate::input::TtyInput;
use crate::term::{TermError, TermResult, TerminalMode, TerminationFlag, WindowSize};

/// Run the editor on the terminal behind `tty`, drawing to `out`
///
/// `screen` is the descriptor the window size is queried from (stdout for the
/// binary). Returns once Ctrl+Q is pressed or an error occurs; either way the
/// original terminal attributes are back in place.
pub fn run_session<I, S, W>(
    tty: I,
    screen: S,
    out: &mut W,
    config: &Config,
    termination: Option<TerminationFlag>,
) -> TermResult<()>
where
    I: AsFd,
    S: AsFd,
    W: Write,
{
    let mut mode = TerminalMode::capture(tty.as_fd())?;
    mode.enter_raw(config.effective_timeout_ds())?;

    let size = WindowSize::query(&screen.as_fd())?;
    tracing::info!(rows = size.rows, cols = size.cols, "window size");

    let mut editor = Editor::new(size).with_wasd_navigation(config.wasd_navigation);
    let mut input = TtyInput::new(tty.as_fd());
    if let Some(flag) = termination {
        input = input.with_termination(flag);
    }
    editor.run(&mut input, out)?;

    mode.restore()
}

/// Clear the screen, home the cursor, and describe `error` on `err_out`
///
/// Call only after the session has returned, so the terminal is already
/// restored when the message is printed.
pub fn report_fatal<O: Write, E: Write>(out: &mut O, err_out: &mut E, error: &TermError) {
    if let Err(e) = editor::clear_screen(out) {
        tracing::warn!("failed to clear screen after fatal error: {}", e);
    }
    if let Err(e) = writeln!(err_out, "kilo: {}", error).and_then(|()| err_out.flush()) {
        tracing::warn!("failed to report fatal error: {}", e);
    }
}
