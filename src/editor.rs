//! Editor State
//!
//! Ties together the gap buffer and the viewport. Every mutation goes
//! through here so that the viewport is repaired in the same step: callers
//! always observe a consistent (buffer, viewport) pair.

use crate::app::Config;
use crate::core::{
    line_start, BufferResult, CursorPosition, GapBuffer, Relocation, Scroll, Snapshot, Viewport,
};
use crate::input::Direction;

/// Single-document, single-cursor editor state
#[derive(Debug, Clone)]
pub struct Editor {
    buffer: GapBuffer,
    viewport: Viewport,
}

impl Editor {
    /// Create an editor from a seeded buffer and a viewport
    pub fn new(buffer: GapBuffer, mut viewport: Viewport) -> Self {
        viewport.repair(&buffer);
        Self { buffer, viewport }
    }

    /// Create an editor for a terminal of `rows` rows using `config`
    pub fn with_config(content: &[u8], config: &Config, rows: usize) -> Self {
        let buffer = GapBuffer::from_bytes(content, config.initial_gap)
            .with_growth_increment(config.growth_increment);
        Self::new(buffer, Viewport::new(rows, config.reserved_rows))
    }

    /// Get a reference to the buffer
    pub fn buffer(&self) -> &GapBuffer {
        &self.buffer
    }

    /// Get a reference to the viewport
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Split borrow for the render pipeline, which re-derives the bottom
    pub fn parts_mut(&mut self) -> (&GapBuffer, &mut Viewport) {
        (&self.buffer, &mut self.viewport)
    }

    /// Logical cursor offset
    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// On-screen cursor position for the current viewport
    pub fn cursor_position(&self) -> CursorPosition {
        CursorPosition::locate(&self.buffer, self.viewport.top())
    }

    /// Copy of the document text
    pub fn text(&self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    /// Capture a debug snapshot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.buffer, &self.viewport)
    }

    /// Insert a byte at the cursor
    pub fn insert(&mut self, byte: u8) -> BufferResult<Scroll> {
        self.buffer.insert(byte)?;
        Ok(self.viewport.repair(&self.buffer))
    }

    /// Relocate the cursor (storage numbering) and repair the viewport.
    ///
    /// An unaddressable target leaves both buffer and viewport untouched.
    pub fn move_cursor_to(&mut self, target: usize) -> Relocation {
        let relocation = self.buffer.relocate(target);
        if relocation.is_moved() {
            self.viewport.repair(&self.buffer);
        }
        relocation
    }

    /// Move the cursor to a logical offset, clamped to the document
    pub fn move_to_logical(&mut self, offset: usize) -> Relocation {
        let offset = offset.min(self.buffer.len());
        self.move_cursor_to(self.buffer.storage_index(offset))
    }

    /// Move the cursor one step
    pub fn move_cursor(&mut self, direction: Direction) -> Relocation {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move one byte left; no-op at document start
    pub fn move_left(&mut self) -> Relocation {
        match self.buffer.head_len().checked_sub(1) {
            Some(target) => self.move_cursor_to(target),
            None => Relocation::Unchanged,
        }
    }

    /// Move one byte right; no-op at document end
    pub fn move_right(&mut self) -> Relocation {
        if self.buffer.tail_len() == 0 {
            return Relocation::Unchanged;
        }
        self.move_cursor_to(self.buffer.tail_start() + 1)
    }

    /// Move to the same column on the previous line, or to the document
    /// start from the first line
    pub fn move_up(&mut self) -> Relocation {
        let cursor = self.buffer.cursor();
        let start = line_start(&self.buffer, cursor);
        if start == 0 {
            return self.move_to_logical(0);
        }

        let column = cursor - start;
        let prev_end = start - 1;
        let prev_start = line_start(&self.buffer, prev_end);
        self.move_to_logical((prev_start + column).min(prev_end))
    }

    /// Move to the same column on the next line, or to the document end
    /// from the last line
    pub fn move_down(&mut self) -> Relocation {
        let cursor = self.buffer.cursor();
        let len = self.buffer.len();
        let Some(newline) = self.buffer.find_next(b'\n', cursor) else {
            return self.move_to_logical(len);
        };

        let column = cursor - line_start(&self.buffer, cursor);
        let next_start = newline + 1;
        let next_end = self.buffer.find_next(b'\n', next_start).unwrap_or(len);
        self.move_to_logical((next_start + column).min(next_end))
    }
}
