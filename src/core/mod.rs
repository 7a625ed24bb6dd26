//! Editor Core Module
//!
//! Terminal-independent text model. This module contains:
//! - Gap buffer storage and growth
//! - Cursor relocation (moving the gap)
//! - Viewport tracking
//! - On-screen cursor position
//! - Debug snapshots
//!
//! The core is deterministic: given the same initial content and the same
//! sequence of edits, it always produces the same state.

mod cursor;
mod gap_buffer;
mod relocate;
mod snapshot;
mod viewport;

pub use cursor::{display_width, CursorPosition, TAB_WIDTH};
pub use gap_buffer::{
    BufferError, BufferResult, GapBuffer, DEFAULT_GROWTH_INCREMENT, DEFAULT_INITIAL_GAP,
};
pub use relocate::Relocation;
pub use snapshot::{Snapshot, StorageCell};
pub use viewport::{line_start, Scroll, Viewport, DEFAULT_RESERVED_ROWS};
