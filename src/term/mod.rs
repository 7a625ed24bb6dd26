//! Terminal handling for Unix
//!
//! Puts the controlling terminal into raw mode for byte-by-byte reads and
//! queries its size. Everything else (drawing, decoding) works on plain
//! byte streams.

#[cfg(unix)]
mod raw;

#[cfg(unix)]
pub use raw::{window_size, RawMode};

/// Error type for terminal operations
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("Failed to read terminal attributes: {0}")]
    GetAttr(#[source] nix::Error),

    #[error("Failed to set terminal attributes: {0}")]
    SetAttr(#[source] nix::Error),

    #[error("Failed to get window size: {0}")]
    GetWinsize(#[source] nix::Error),

    #[error("Terminal reported an empty window ({cols}x{rows})")]
    EmptyWindow { cols: u16, rows: u16 },
}

/// Result type for terminal operations
pub type TermResult<T> = Result<T, TermError>;

/// Terminal window size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub cols: u16,
}

impl WindowSize {
    /// Create a new window size with rows and columns
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { rows, cols }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_size() {
        let size = WindowSize::new(80, 24);
        assert_eq!(size.cols, 80);
        assert_eq!(size.rows, 24);
        assert_eq!(size, WindowSize::default());
    }
}
