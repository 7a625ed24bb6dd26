//! Mochi Edit - Interactive Editor
//!
//! Opens a document in the controlling terminal. Arrow keys move the cursor,
//! anything printable is inserted, Ctrl-W shows the buffer bookkeeping and
//! Ctrl-Q quits. Edits are not written back.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use mochi_edit::app::{self, load_document, AppResult, Config};
use mochi_edit::input::Decoder;
use mochi_edit::renderer::vt;
use mochi_edit::term::{self, RawMode};
use mochi_edit::{Editor, Exit, Session};

#[derive(Debug, Default)]
struct Args {
    file: Option<PathBuf>,
    log_file: Option<PathBuf>,
    rows: Option<u16>,
    cols: Option<u16>,
    show_help: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--log" => {
                i += 1;
                if i < args.len() {
                    parsed.log_file = Some(PathBuf::from(&args[i]));
                }
            },
            "-r" | "--rows" => {
                i += 1;
                if i < args.len() {
                    parsed.rows = args[i].parse().ok();
                }
            },
            "-c" | "--cols" => {
                i += 1;
                if i < args.len() {
                    parsed.cols = args[i].parse().ok();
                }
            },
            "-h" | "--help" => {
                parsed.show_help = true;
            },
            _ => {
                if parsed.file.is_none() && !args[i].starts_with('-') {
                    parsed.file = Some(PathBuf::from(&args[i]));
                }
            },
        }
        i += 1;
    }

    parsed
}

fn main() -> ExitCode {
    let args = parse_args();

    if args.show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if let Err(e) = app::logging::init(args.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(exit) => {
            tracing::info!(?exit, "editor closed");
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> AppResult<Exit> {
    let config = Config::load_or_default();
    config.validate()?;

    let content = match &args.file {
        Some(path) => load_document(path)?,
        None => Vec::new(),
    };

    let mut size = term::window_size().unwrap_or_else(|e| {
        tracing::warn!("Using configured window size: {}", e);
        config.window.size()
    });
    if let Some(rows) = args.rows {
        size.rows = rows;
    }
    if let Some(cols) = args.cols {
        size.cols = cols;
    }
    tracing::debug!(rows = size.rows, cols = size.cols, "window size");

    // Restored after the session has been dropped
    let _raw = RawMode::enable()?;

    let editor = Editor::with_config(&content, &config, size.rows as usize);
    let decoder = Decoder::new(config.keymap());
    let stdout = BufWriter::new(io::stdout().lock());
    let mut session = Session::new(editor, decoder, io::stdin().lock(), stdout);

    let exit = session.run()?;

    let mut out = session.into_sink();
    vt::clear_screen(&mut out)?;
    out.flush()?;

    Ok(exit)
}

fn print_help() {
    println!("Mochi Edit");
    println!();
    println!("Usage: mochi-edit [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -r, --rows <N>     Override terminal height");
    println!("  -c, --cols <N>     Override terminal width");
    println!("      --log <PATH>   Write log output to a file (RUST_LOG sets the level)");
    println!("  -h, --help         Show this help message");
    println!();
    println!("Keys:");
    println!("  Arrows   Move the cursor");
    println!("  Ctrl-W   Show buffer state until the next key press");
    println!("  Ctrl-Q   Quit without saving");
    println!();
    println!("Configuration is read from ~/.config/mochi-edit/config.json.");
}
