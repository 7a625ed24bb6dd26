//! Mochi Edit Headless Runner
//!
//! Replays a recorded keystroke stream against a document without a
//! terminal and prints the resulting editor state. Used for testing and
//! automation.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use mochi_edit::app::{self, load_document, Config};
use mochi_edit::input::Decoder;
use mochi_edit::renderer::vt;
use mochi_edit::{Editor, Session};

fn main() -> ExitCode {
    if let Err(e) = app::logging::init(None) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = std::env::args().collect();

    // Parse command line arguments
    let mut rows = 24u16;
    let mut keys_file: Option<String> = None;
    let mut document: Option<PathBuf> = None;
    let mut output_format = OutputFormat::Text;
    let mut show_frame = false;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--rows" => {
                i += 1;
                if i < args.len() {
                    rows = args[i].parse().unwrap_or(24);
                }
            },
            "-d" | "--document" => {
                i += 1;
                if i < args.len() {
                    document = Some(PathBuf::from(&args[i]));
                }
            },
            "-k" | "--keys" => {
                i += 1;
                if i < args.len() {
                    keys_file = Some(args[i].clone());
                }
            },
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            },
            "-t" | "--text" => {
                output_format = OutputFormat::Text;
            },
            "-f" | "--frame" => {
                show_frame = true;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as keystroke file if no flag
                if keys_file.is_none() && !args[i].starts_with('-') {
                    keys_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let content = match &document {
        Some(path) => match load_document(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            },
        },
        None => Vec::new(),
    };

    // Read keystrokes
    let keys = match &keys_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            // Read from stdin
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        },
    };

    // User configuration is ignored so that replays are reproducible
    let config = Config::default();
    let editor = Editor::with_config(&content, &config, rows as usize);
    let mut session = Session::new(
        editor,
        Decoder::new(config.keymap()),
        keys.as_slice(),
        Vec::new(),
    );

    let exit = match session.run() {
        Ok(exit) => exit,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    let snapshot = session.editor().snapshot();

    // Output result
    match output_format {
        OutputFormat::Text => {
            println!("Editor State ({} rows, {:?}):", rows, exit);
            print!("{}", snapshot.to_text());
            println!("---");
            println!("{}", snapshot.text);
            println!("---");
        },
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            },
        },
    }

    if show_frame {
        let out = session.into_sink();
        println!("{}", String::from_utf8_lossy(last_frame(&out)).escape_debug());
    }

    ExitCode::SUCCESS
}

/// The bytes written for the most recent frame
fn last_frame(out: &[u8]) -> &[u8] {
    let start = out
        .windows(vt::CLEAR_SCREEN.len())
        .rposition(|w| w == vt::CLEAR_SCREEN)
        .unwrap_or(0);
    &out[start..]
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn print_help() {
    println!("Mochi Edit Headless Runner");
    println!();
    println!("Usage: mochi-edit-headless [OPTIONS] [KEYS_FILE]");
    println!();
    println!("Options:");
    println!("  -d, --document <PATH>  Document to edit (default: empty)");
    println!("  -k, --keys <PATH>      Read keystrokes from file");
    println!("  -r, --rows <N>         Set terminal height (default: 24)");
    println!("  -j, --json             Output snapshot as JSON");
    println!("  -t, --text             Output snapshot as text (default)");
    println!("  -f, --frame            Also print the last rendered frame");
    println!("  -h, --help             Show this help message");
    println!();
    println!("If no keystroke file is specified, reads from stdin.");
    println!();
    println!("Examples:");
    println!("  printf 'hello\\x1b[D!' | mochi-edit-headless");
    println!("  mochi-edit-headless -d notes.txt -r 10 --json keys.bin");
}
