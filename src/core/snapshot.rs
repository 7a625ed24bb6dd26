//! Debug snapshots
//!
//! A snapshot captures the gap buffer bookkeeping, the viewport bounds and
//! the raw storage around the gap. The editor shows it on the debug-dump
//! command; the headless runner prints it as text or JSON.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::cursor::CursorPosition;
use super::gap_buffer::GapBuffer;
use super::viewport::Viewport;

/// Storage bytes shown past the start of the tail
const TAIL_CONTEXT: usize = 30;

/// A complete snapshot of the editor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub head_len: usize,
    pub tail_start: usize,
    pub tail_len: usize,
    pub total_len: usize,
    pub gap_size: usize,
    pub view_top: usize,
    pub view_bottom: usize,
    /// Tail bytes that fall inside the viewport
    pub visible_tail: usize,
    pub cursor: CursorPosition,
    /// Raw storage from just before the gap into the tail
    pub storage: Vec<StorageCell>,
    /// Logical document text (lossy UTF-8)
    pub text: String,
}

/// One byte of raw storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageCell {
    /// Storage index
    pub index: usize,
    pub byte: u8,
    /// Whether the byte lies in the gap
    pub in_gap: bool,
}

impl Snapshot {
    /// Capture the current buffer and viewport state
    pub fn capture(buffer: &GapBuffer, viewport: &Viewport) -> Self {
        let head_len = buffer.head_len();
        let tail_start = buffer.tail_start();
        let start = head_len.saturating_sub(1);
        let end = (tail_start + TAIL_CONTEXT).min(buffer.total_len());

        let storage = buffer.storage()[start..end]
            .iter()
            .enumerate()
            .map(|(i, &byte)| {
                let index = start + i;
                StorageCell {
                    index,
                    byte,
                    in_gap: index >= head_len && index < tail_start,
                }
            })
            .collect();

        Self {
            head_len,
            tail_start,
            tail_len: buffer.tail_len(),
            total_len: buffer.total_len(),
            gap_size: buffer.gap_size(),
            view_top: viewport.top(),
            view_bottom: viewport.bottom(),
            visible_tail: viewport.bottom().saturating_sub(head_len),
            cursor: CursorPosition::locate(buffer, viewport.top()),
            storage,
            text: buffer.to_string(),
        }
    }

    /// Render the snapshot as the on-screen debug dump
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "head_len: {} tail_start: {} tail_len: {} total_len: {} gap: {} view_top: {} view_bottom: {} visible_tail: {} cursor: {};{}",
            self.head_len,
            self.tail_start,
            self.tail_len,
            self.total_len,
            self.gap_size,
            self.view_top,
            self.view_bottom,
            self.visible_tail,
            self.cursor.row,
            self.cursor.col,
        );
        for cell in &self.storage {
            let marker = if cell.in_gap { "gap " } else { "" };
            let _ = writeln!(out, "{}{} {}", marker, cell.index, byte_label(cell.byte));
        }
        out
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Printable label for a raw storage byte
fn byte_label(byte: u8) -> String {
    match byte {
        b'\n' => "\\n".to_string(),
        b'\t' => "\\t".to_string(),
        0x21..=0x7e => (byte as char).to_string(),
        _ => format!("0x{:02x}", byte),
    }
}
