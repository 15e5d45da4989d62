//! Kilo Headless Runner
//!
//! Drives the editor loop without a terminal, for testing and automation.
//! Key bytes come from stdin or a file; the escape-sequence stream the editor
//! would have written to the terminal goes to stdout.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use kilo::{Editor, ScriptedInput, TermError, WindowSize};
use serde::Serialize;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments
struct Args {
    /// Key bytes file (stdin if not specified)
    input: Option<PathBuf>,
    size: WindowSize,
    wasd: bool,
    json: bool,
    help: bool,
}

/// Final editor state, printed with `--json`
#[derive(Serialize)]
struct Summary {
    rows: u16,
    cols: u16,
    cursor_row: usize,
    cursor_col: usize,
    quit: bool,
    output_bytes: usize,
}

fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args {
        input: None,
        size: WindowSize::new(24, 80),
        wasd: false,
        json: false,
        help: false,
    };

    let mut argv = argv.into_iter();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-r" | "--rows" => args.size.rows = parse_dimension(&arg, argv.next())?,
            "-c" | "--cols" => args.size.cols = parse_dimension(&arg, argv.next())?,
            "-w" | "--wasd" => args.wasd = true,
            "-j" | "--json" => args.json = true,
            "-h" | "--help" => args.help = true,
            flag if flag.starts_with('-') => return Err(format!("unknown option '{}'", flag)),
            path => args.input = Some(PathBuf::from(path)),
        }
    }

    Ok(args)
}

fn parse_dimension(flag: &str, value: Option<String>) -> Result<u16, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    match value.parse::<u16>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{} must be a positive number, got '{}'", flag, value)),
    }
}

fn read_input(path: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path),
        None => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data)?;
            Ok(data)
        },
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("KILO_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let keys = match read_input(args.input.as_ref()) {
        Ok(keys) => keys,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            return ExitCode::FAILURE;
        },
    };

    // A trailing timeout lets a final lone ESC resolve instead of hitting EOF
    let mut input = ScriptedInput::from_bytes(&keys).timeout();
    let mut editor = Editor::new(args.size).with_wasd_navigation(args.wasd);
    let mut output = Vec::new();

    let quit = match editor.run(&mut input, &mut output) {
        Ok(()) => true,
        Err(TermError::InputClosed) => false,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    if args.json {
        let state = editor.state();
        let summary = Summary {
            rows: state.size.rows,
            cols: state.size.cols,
            cursor_row: state.cursor.cy,
            cursor_col: state.cursor.cx,
            quit,
            output_bytes: output.len(),
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing summary: {}", e);
                return ExitCode::FAILURE;
            },
        }
    } else {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(&output).and_then(|()| stdout.flush()) {
            eprintln!("Error writing output: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn print_help() {
    println!("Kilo Headless Runner");
    println!();
    println!("Usage: kilo-headless [OPTIONS] [KEYS_FILE]");
    println!();
    println!("Options:");
    println!("  -r, --rows <N>     Screen height (default: 24)");
    println!("  -c, --cols <N>     Screen width (default: 80)");
    println!("  -w, --wasd         Also move the cursor with w/a/s/d");
    println!("  -j, --json         Print the final state as JSON instead of the output stream");
    println!("  -h, --help         Show this help message");
    println!();
    println!("Without KEYS_FILE, key bytes are read from stdin.");
    println!();
    println!("Examples:");
    println!("  printf '\\x1b[B\\x1b[C\\x11' | kilo-headless -r 10 -c 40 | cat -v");
    println!("  kilo-headless --json keys.bin");
}
