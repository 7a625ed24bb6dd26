//! Raw mode and window size via termios/ioctl

use std::io::{self, Stdin};

use nix::libc;
use nix::sys::termios::{self, InputFlags, LocalFlags, SetArg, Termios};

use super::{TermError, TermResult, WindowSize};

/// Keeps the terminal in raw mode until dropped.
///
/// Echo, canonical line editing, signal keys and extended input processing
/// are switched off so every key press arrives as soon as it is typed. Output
/// processing stays on, so `\n` still moves to the start of the next line.
pub struct RawMode {
    stdin: Stdin,
    /// Attributes to restore on drop
    original: Termios,
}

impl RawMode {
    /// Switch stdin's terminal into raw mode
    pub fn enable() -> TermResult<Self> {
        let stdin = io::stdin();
        let original = termios::tcgetattr(&stdin).map_err(TermError::GetAttr)?;

        let mut raw = original.clone();
        raw.local_flags
            .remove(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::ISIG | LocalFlags::IEXTEN);
        // Frees Ctrl-S and Ctrl-Q from flow control
        raw.input_flags.remove(InputFlags::IXON);

        termios::tcsetattr(&stdin, SetArg::TCSAFLUSH, &raw).map_err(TermError::SetAttr)?;
        tracing::debug!("entered raw mode");

        Ok(Self { stdin, original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        match termios::tcsetattr(&self.stdin, SetArg::TCSAFLUSH, &self.original) {
            Ok(()) => tracing::debug!("restored terminal mode"),
            Err(e) => tracing::warn!("Failed to restore terminal mode: {}", e),
        }
    }
}

impl std::fmt::Debug for RawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawMode").finish_non_exhaustive()
    }
}

/// Query the size of the terminal attached to stdout
pub fn window_size() -> TermResult<WindowSize> {
    let mut winsize = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ is a valid ioctl for getting window size and
    // `winsize` outlives the call
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut winsize) };

    if result < 0 {
        return Err(TermError::GetWinsize(nix::errno::Errno::last()));
    }
    if winsize.ws_row == 0 || winsize.ws_col == 0 {
        return Err(TermError::EmptyWindow {
            cols: winsize.ws_col,
            rows: winsize.ws_row,
        });
    }

    Ok(WindowSize::new(winsize.ws_col, winsize.ws_row))
}
