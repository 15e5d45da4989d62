//! Kilo editor skeleton
//!
//! A full-screen terminal program that takes over the tty, draws a screen of
//! `~` rows with a centered banner, and moves a cursor with the arrow keys
//! until Ctrl+Q.
//!
//! - `term`: raw mode, window size, termination signals
//! - `input`: byte sources and key decoding
//! - `buffer` / `screen` / `escape`: single-write frame composition
//! - `editor`: cursor model and the event loop
//! - `config`: user configuration
//! - `session`: a raw-mode session on a real terminal and fatal-error reporting

pub mod buffer;
pub mod config;
pub mod editor;
pub mod escape;
pub mod input;
pub mod screen;
pub mod session;
pub mod term;

pub use buffer::AppendBuffer;
pub use config::Config;
pub use editor::{Cursor, Direction, Editor, EditorState};
pub use input::{read_key, ByteSource, Key, ScriptedInput, TtyInput};
pub use session::{report_fatal, run_session};
pub use term::{TermError, TermResult, TerminalMode, WindowSize};
