//! Renderer Module
//!
//! Draws the viewport to a byte sink. The visible text is read straight out
//! of the gap buffer as two slices, one from the head and one from the tail,
//! so gap bytes are never written and no contiguous copy is made.
//!
//! Each frame is:
//!
//! 1. clear the screen and home the cursor
//! 2. re-derive the viewport bottom (the top is kept from the last repair)
//! 3. write `head[view_top..head_len]`
//! 4. write the tail bytes up to the viewport bottom
//! 5. position the terminal cursor at the derived row and column

pub mod vt;

use std::io::{self, Write};

use crate::core::{CursorPosition, GapBuffer, Snapshot, Viewport};

/// The two storage slices making up the visible text.
///
/// With `view_top <= head_len <= view_bottom` these are
/// `storage[view_top..head_len]` and
/// `storage[tail_start..tail_start + (view_bottom - head_len)]`.
pub fn visible_segments<'a>(buffer: &'a GapBuffer, viewport: &Viewport) -> (&'a [u8], &'a [u8]) {
    buffer.segments(viewport.top()..viewport.bottom())
}

/// Writes frames to a terminal output sink
#[derive(Debug)]
pub struct RenderPipeline<W: Write> {
    out: W,
    /// Frames written so far
    frames: u64,
}

impl<W: Write> RenderPipeline<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Number of frames rendered
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Get a reference to the sink
    pub fn sink(&self) -> &W {
        &self.out
    }

    /// Get a mutable reference to the sink
    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consume the pipeline and return the sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Redraw the viewport and place the cursor
    pub fn render(
        &mut self,
        buffer: &GapBuffer,
        viewport: &mut Viewport,
    ) -> io::Result<CursorPosition> {
        vt::clear_screen(&mut self.out)?;
        viewport.recompute_bottom(buffer);

        let (head, tail) = visible_segments(buffer, viewport);
        self.out.write_all(head)?;
        self.out.write_all(tail)?;

        let cursor = CursorPosition::locate(buffer, viewport.top());
        vt::move_cursor(&mut self.out, cursor.row, cursor.col)?;
        self.out.flush()?;

        self.frames += 1;
        Ok(cursor)
    }

    /// Replace the screen with a debug dump
    pub fn render_snapshot(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        vt::clear_screen(&mut self.out)?;
        self.out.write_all(snapshot.to_text().as_bytes())?;
        self.out.flush()
    }

    /// Clear the screen, e.g. when leaving the editor
    pub fn clear(&mut self) -> io::Result<()> {
        vt::clear_screen(&mut self.out)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(content: &[u8], cursor: usize, lines: usize) -> (GapBuffer, Viewport) {
        let mut buf = GapBuffer::from_bytes(content, 4);
        buf.move_to_logical(cursor);
        let mut vp = Viewport::with_visible_lines(lines);
        vp.repair(&buf);
        (buf, vp)
    }

    #[test]
    fn test_segments_split_at_cursor() {
        let (buf, vp) = setup(b"hello\nworld\n", 8, 5);
        let (head, tail) = visible_segments(&buf, &vp);
        assert_eq!(head, b"hello\nwo");
        assert_eq!(tail, b"rld\n");
    }

    #[test]
    fn test_segments_stop_at_bottom() {
        let (buf, vp) = setup(b"a\nb\nc\nd\n", 2, 2);
        let (head, tail) = visible_segments(&buf, &vp);
        assert_eq!(head, b"a\n");
        assert_eq!(tail, b"b\n");
    }

    #[test]
    fn test_render_frame() {
        let (buf, mut vp) = setup(b"ab\ncd\n", 4, 5);
        let mut pipeline = RenderPipeline::new(Vec::new());
        let cursor = pipeline.render(&buf, &mut vp).unwrap();

        assert_eq!(cursor, CursorPosition { row: 2, col: 2 });
        assert_eq!(pipeline.frames(), 1);
        assert_eq!(pipeline.into_inner(), b"\x1b[2J\x1b[Hab\ncd\n\x1b[2;2H");
    }

    #[test]
    fn test_render_scrolled_view() {
        let (buf, mut vp) = setup(b"line1\nline2\nline3\n", 14, 1);
        let mut pipeline = RenderPipeline::new(Vec::new());
        let cursor = pipeline.render(&buf, &mut vp).unwrap();

        assert_eq!(cursor, CursorPosition { row: 1, col: 3 });
        assert_eq!(pipeline.into_inner(), b"\x1b[2J\x1b[Hline3\n\x1b[1;3H");
    }

    #[test]
    fn test_render_never_writes_gap_bytes() {
        let mut buf = GapBuffer::from_bytes(b"xyz", 16);
        buf.insert(b'a').unwrap();
        let mut vp = Viewport::with_visible_lines(3);
        vp.repair(&buf);
        let mut pipeline = RenderPipeline::new(Vec::new());
        pipeline.render(&buf, &mut vp).unwrap();

        let out = pipeline.into_inner();
        assert!(!out.contains(&0));
        assert!(out.windows(4).any(|w| w == b"axyz"));
    }
}
