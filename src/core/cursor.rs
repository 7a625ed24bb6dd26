//! On-screen cursor position
//!
//! The cursor's screen coordinates are derived on every render from the
//! viewport top and the logical cursor offset; they are never stored as
//! editor state.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use super::gap_buffer::GapBuffer;

/// Columns between tab stops
pub const TAB_WIDTH: usize = 8;

/// 1-based terminal coordinates of the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    /// Row (1-indexed)
    pub row: usize,
    /// Column (1-indexed)
    pub col: usize,
}

impl Default for CursorPosition {
    fn default() -> Self {
        Self { row: 1, col: 1 }
    }
}

impl CursorPosition {
    /// Locate the cursor relative to the viewport top.
    ///
    /// The row is one plus the number of newlines between `view_top` and the
    /// cursor; the column is one plus the display width of the text between
    /// the last of those newlines (or `view_top`) and the cursor.
    pub fn locate(buffer: &GapBuffer, view_top: usize) -> Self {
        let Some(visible) = buffer.head().get(view_top..) else {
            return Self::default();
        };

        let (newlines, line) = match visible.iter().rposition(|&b| b == b'\n') {
            Some(last) => (
                visible.iter().filter(|&&b| b == b'\n').count(),
                &visible[last + 1..],
            ),
            None => (0, visible),
        };

        Self {
            row: newlines + 1,
            col: display_width(line) + 1,
        }
    }
}

/// Terminal display width of a line prefix.
///
/// Invalid UTF-8 (e.g. a multi-byte character typed halfway) is replaced
/// rather than rejected. Tabs advance to the next tab stop.
pub fn display_width(line: &[u8]) -> usize {
    String::from_utf8_lossy(line).chars().fold(0, |col, c| {
        if c == '\t' {
            (col / TAB_WIDTH + 1) * TAB_WIDTH
        } else {
            col + c.width().unwrap_or(0)
        }
    })
}
