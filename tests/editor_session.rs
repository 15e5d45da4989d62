//! End-to-end editor sessions driven by scripted input

use kilo::escape::{CLEAR_SCREEN, CURSOR_HOME};
use kilo::input::ScriptedInput;
use kilo::screen;
use kilo::{Cursor, Editor, TermError, WindowSize};

const SIZE: WindowSize = WindowSize { rows: 6, cols: 20 };

fn expected_frame(cursor: Cursor) -> Vec<u8> {
    let mut out = Vec::new();
    screen::refresh(&mut out, SIZE, cursor).expect("refresh");
    out
}

#[test]
fn test_quit_immediately() {
    let mut editor = Editor::new(SIZE);
    let mut input = ScriptedInput::from_bytes(&[0x11]);
    let mut out = Vec::new();

    editor.run(&mut input, &mut out).expect("run");

    let expected = [expected_frame(Cursor::new()), CLEAR_SCREEN.to_vec(), CURSOR_HOME.to_vec()].concat();
    assert_eq!(out, expected);
    assert_eq!(input.remaining(), 0);
}

#[test]
fn test_nothing_read_after_quit() {
    let mut editor = Editor::new(SIZE);
    let mut input = ScriptedInput::from_bytes(b"\x11\x1b[B");
    let mut out = Vec::new();

    editor.run(&mut input, &mut out).expect("run");

    assert_eq!(input.remaining(), 3);
    assert!(out.ends_with(b"\x1b[2J\x1b[H"));
}

#[test]
fn test_each_key_gets_a_frame() {
    let mut editor = Editor::new(SIZE);
    let mut input = ScriptedInput::new()
        .bytes(b"\x1b[C")
        .timeout()
        .bytes(b"\x1b[B")
        .bytes(b"z")
        .bytes(&[0x11]);
    let mut out = Vec::new();

    editor.run(&mut input, &mut out).expect("run");

    let expected = [
        expected_frame(Cursor::at(0, 0)),
        expected_frame(Cursor::at(1, 0)),
        expected_frame(Cursor::at(1, 1)),
        expected_frame(Cursor::at(1, 1)),
        CLEAR_SCREEN.to_vec(),
        CURSOR_HOME.to_vec(),
    ]
    .concat();
    assert_eq!(out, expected);
}

#[test]
fn test_cursor_clamped_at_edges() {
    let mut editor = Editor::new(SIZE);
    let mut keys = Vec::new();
    for _ in 0..30 {
        keys.extend_from_slice(b"\x1b[C\x1b[B");
    }
    keys.extend_from_slice(b"\x1b[A\x1b[D");
    keys.push(0x11);
    let mut input = ScriptedInput::from_bytes(&keys);
    let mut out = Vec::new();

    editor.run(&mut input, &mut out).expect("run");

    assert_eq!(editor.state().cursor, Cursor::at(18, 4));
}

#[test]
fn test_lone_escape_is_ignored() {
    let mut editor = Editor::new(SIZE);
    let mut input = ScriptedInput::new()
        .bytes(b"\x1b")
        .timeout()
        .bytes(b"\x1b[B\x11");
    let mut out = Vec::new();

    editor.run(&mut input, &mut out).expect("run");

    assert_eq!(editor.state().cursor, Cursor::at(0, 1));
}

#[test]
fn test_input_ends_without_quit() {
    let mut editor = Editor::new(SIZE);
    let mut input = ScriptedInput::from_bytes(b"\x1b[C");
    let mut out = Vec::new();

    let result = editor.run(&mut input, &mut out);

    assert!(matches!(result, Err(TermError::InputClosed)));
    assert_eq!(editor.state().cursor, Cursor::at(1, 0));
    assert!(!out.ends_with(CLEAR_SCREEN));
}

#[test]
fn test_unknown_escape_triple_does_not_move_with_wasd() {
    let mut editor = Editor::new(SIZE).with_wasd_navigation(true);
    let mut input = ScriptedInput::from_bytes(b"\x1bOd\x1bOs\x11");
    let mut out = Vec::new();

    editor.run(&mut input, &mut out).expect("run");

    assert_eq!(editor.state().cursor, Cursor::new());
}
