//! Interactive editing session
//!
//! Owns everything one editing run needs: the editor state, the input
//! decoder, the byte source and the render pipeline. Nothing is shared, so
//! the loop is a plain read, decode, dispatch, render cycle.

use std::io::Write;

use tracing::{debug, info};

use super::AppResult;
use crate::editor::Editor;
use crate::input::{ByteSource, Command, Decoder, Intent};
use crate::renderer::RenderPipeline;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The quit command was entered
    Quit,
    /// The byte source ran dry
    EndOfInput,
}

/// Outcome of dispatching one input byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(Exit),
}

/// A single editing session
pub struct Session<S: ByteSource, W: Write> {
    editor: Editor,
    decoder: Decoder,
    source: S,
    pipeline: RenderPipeline<W>,
}

impl<S: ByteSource, W: Write> Session<S, W> {
    pub fn new(editor: Editor, decoder: Decoder, source: S, out: W) -> Self {
        Self {
            editor,
            decoder,
            source,
            pipeline: RenderPipeline::new(out),
        }
    }

    /// Get a reference to the editor state
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Number of frames rendered so far
    pub fn frames(&self) -> u64 {
        self.pipeline.frames()
    }

    /// Get a reference to the output sink
    pub fn sink(&self) -> &W {
        self.pipeline.sink()
    }

    /// Consume the session and return the output sink
    pub fn into_sink(self) -> W {
        self.pipeline.into_inner()
    }

    /// Draw the initial frame, then process input until quit or end of input
    pub fn run(&mut self) -> AppResult<Exit> {
        self.render()?;
        loop {
            let Some(byte) = self.source.read_byte()? else {
                info!("input closed");
                return Ok(Exit::EndOfInput);
            };
            if let Flow::Exit(exit) = self.step(byte)? {
                return Ok(exit);
            }
        }
    }

    /// Decode one byte and apply the resulting intent, if any.
    ///
    /// A frame is rendered after every completed intent; bytes in the middle
    /// of an escape sequence leave the screen alone.
    pub fn step(&mut self, byte: u8) -> AppResult<Flow> {
        let Some(intent) = self.decoder.feed(byte) else {
            return Ok(Flow::Continue);
        };

        match intent {
            Intent::Insert(b) => {
                self.editor.insert(b)?;
            },
            Intent::Move(direction) => {
                self.editor.move_cursor(direction);
            },
            Intent::Command(Command::Quit) => {
                info!("quit requested");
                return Ok(Flow::Exit(Exit::Quit));
            },
            Intent::Command(Command::DebugDump) => {
                if let Flow::Exit(exit) = self.debug_dump()? {
                    return Ok(Flow::Exit(exit));
                }
            },
        }

        self.render()?;
        Ok(Flow::Continue)
    }

    /// Show the buffer bookkeeping and wait for any key
    fn debug_dump(&mut self) -> AppResult<Flow> {
        let snapshot = self.editor.snapshot();
        debug!(
            head_len = snapshot.head_len,
            tail_start = snapshot.tail_start,
            total_len = snapshot.total_len,
            "debug dump"
        );
        self.pipeline.render_snapshot(&snapshot)?;

        // The key that dismisses the dump is not dispatched
        match self.source.read_byte()? {
            Some(_) => Ok(Flow::Continue),
            None => Ok(Flow::Exit(Exit::EndOfInput)),
        }
    }

    fn render(&mut self) -> AppResult<()> {
        let (buffer, viewport) = self.editor.parts_mut();
        self.pipeline.render(buffer, viewport)?;
        Ok(())
    }
}

impl<S: ByteSource, W: Write> std::fmt::Debug for Session<S, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("editor", &self.editor)
            .field("frames", &self.pipeline.frames())
            .finish_non_exhaustive()
    }
}
