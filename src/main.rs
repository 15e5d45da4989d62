//! Kilo editor
//!
//! Takes over the terminal, draws the welcome screen, and moves the cursor
//! with the arrow keys until Ctrl+Q.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kilo::term::signal;
use kilo::{report_fatal, run_session, Config};

fn main() -> ExitCode {
    let config = Config::load_or_default();
    init_logging(&config);

    info!("Starting Kilo");

    let result = signal::install().and_then(|termination| {
        let mut out = io::stdout().lock();
        run_session(io::stdin(), io::stdout(), &mut out, &config, Some(termination))
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The terminal mode was restored when the session unwound
            error!("Fatal error: {}", e);
            report_fatal(&mut io::stdout(), &mut io::stderr(), &e);
            ExitCode::FAILURE
        },
    }
}

/// Log to a file when one is configured; the terminal itself is the UI
fn init_logging(config: &Config) {
    let path = std::env::var_os("KILO_LOG_FILE")
        .map(PathBuf::from)
        .or_else(|| config.log_file.clone());
    let Some(path) = path else {
        return;
    };

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("kilo: cannot open log file '{}': {}", path.display(), e);
            return;
        },
    };

    let filter =
        EnvFilter::try_from_env("KILO_LOG").unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
