//! Mochi Edit Library
//!
//! A minimal terminal text editor built around a gap buffer. This crate
//! provides the editing core and the pieces needed to drive it from a
//! terminal:
//!
//! - `core`: Gap buffer, cursor relocation, viewport tracking, debug snapshots
//! - `editor`: Buffer and viewport kept consistent across edits and moves
//! - `input`: Decoding terminal key presses into editor intents
//! - `renderer`: Drawing the viewport with VT escape sequences
//! - `term`: Raw mode and window size on Unix terminals
//! - `app`: Configuration, logging and the interactive session loop

pub mod app;
pub mod core;
pub mod editor;
pub mod input;
pub mod renderer;
pub mod term;

pub use app::{AppError, AppResult, Config, Exit, Session};
pub use editor::Editor;
