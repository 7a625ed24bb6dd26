//! Viewport tracking
//!
//! The viewport is the window of newline-delimited lines currently on
//! screen. `top` is 0 or the offset right after a newline; `bottom` is the
//! offset right after the last visible newline, or the document end when
//! fewer lines remain. Both are logical offsets.
//!
//! The top only changes when the cursor leaves the window, and then one
//! line at a time, so repair cost is proportional to the lines scrolled.

use tracing::trace;

use super::gap_buffer::GapBuffer;

/// Terminal rows kept free for status and debug output
pub const DEFAULT_RESERVED_ROWS: usize = 4;

/// Direction and distance of a viewport repair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    None,
    Down(usize),
    Up(usize),
}

/// Visible line range of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// First visible offset
    top: usize,
    /// One past the last visible offset
    bottom: usize,
    /// Number of newline-delimited lines shown
    visible_lines: usize,
    /// Whether `bottom` sits right after the last visible newline
    filled: bool,
}

impl Viewport {
    /// Create a viewport for a terminal of `rows` rows
    pub fn new(rows: usize, reserved_rows: usize) -> Self {
        Self::with_visible_lines(rows.saturating_sub(reserved_rows))
    }

    /// Create a viewport showing `lines` lines (at least one)
    pub fn with_visible_lines(lines: usize) -> Self {
        Self {
            top: 0,
            bottom: 0,
            visible_lines: lines.max(1),
            filled: false,
        }
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn bottom(&self) -> usize {
        self.bottom
    }

    pub fn visible_lines(&self) -> usize {
        self.visible_lines
    }

    /// Check if a logical offset is on screen.
    ///
    /// When every visible line is in use, the offset right after the last
    /// visible newline already belongs to the next line.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.top && (offset < self.bottom || (!self.filled && offset == self.bottom))
    }

    /// Re-derive `bottom` by counting newlines forward from `top`
    pub fn recompute_bottom(&mut self, buffer: &GapBuffer) -> usize {
        let len = buffer.len();
        self.top = self.top.min(len);

        let (head, tail) = buffer.segments(self.top..len);
        let mut newlines = 0;
        for (i, &byte) in head.iter().chain(tail.iter()).enumerate() {
            if byte == b'\n' {
                newlines += 1;
                if newlines == self.visible_lines {
                    self.bottom = self.top + i + 1;
                    self.filled = true;
                    return self.bottom;
                }
            }
        }

        self.bottom = len;
        self.filled = false;
        self.bottom
    }

    /// Scroll line by line until the cursor is back on screen
    pub fn repair(&mut self, buffer: &GapBuffer) -> Scroll {
        let cursor = buffer.cursor();
        self.recompute_bottom(buffer);

        let mut scrolled = 0;
        while !self.contains(cursor) && cursor >= self.top {
            match buffer.find_next(b'\n', self.top) {
                Some(newline) => {
                    self.top = newline + 1;
                    self.recompute_bottom(buffer);
                    scrolled += 1;
                },
                None => break,
            }
        }
        if scrolled > 0 {
            trace!(lines = scrolled, top = self.top, "scrolled down");
            return Scroll::Down(scrolled);
        }

        while cursor < self.top {
            self.top = line_start(buffer, self.top - 1);
            self.recompute_bottom(buffer);
            scrolled += 1;
        }
        if scrolled > 0 {
            trace!(lines = scrolled, top = self.top, "scrolled up");
            return Scroll::Up(scrolled);
        }

        Scroll::None
    }
}

/// Start of the line containing logical offset `offset`
pub fn line_start(buffer: &GapBuffer, offset: usize) -> usize {
    buffer.find_prev(b'\n', offset).map_or(0, |newline| newline + 1)
}
