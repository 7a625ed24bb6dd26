//! VT100 control sequences
//!
//! Only the few sequences the editor emits: clear, home, and absolute cursor
//! positioning.

use std::io::{self, Write};

/// Erase the whole display (ED 2)
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";

/// Move the cursor to row 1, column 1 (CUP without parameters)
pub const CURSOR_HOME: &[u8] = b"\x1b[H";

/// Clear the display and home the cursor
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(CLEAR_SCREEN)?;
    out.write_all(CURSOR_HOME)
}

/// Position the cursor at a 1-based row and column (CUP)
pub fn move_cursor<W: Write>(out: &mut W, row: usize, col: usize) -> io::Result<()> {
    write!(out, "\x1b[{};{}H", row, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_screen() {
        let mut out = Vec::new();
        clear_screen(&mut out).unwrap();
        assert_eq!(out, b"\x1b[2J\x1b[H");
    }

    #[test]
    fn test_move_cursor() {
        let mut out = Vec::new();
        move_cursor(&mut out, 3, 14).unwrap();
        assert_eq!(out, b"\x1b[3;14H");
    }
}
