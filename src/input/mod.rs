//! Input Decoding Module
//!
//! Turns the raw byte stream from the terminal into editor intents. This is
//! the inverse of what a terminal does when it encodes key presses:
//!
//! - Printable bytes (and UTF-8 bytes ≥ 0x80) become insertions
//! - `CSI A..D` / `SS3 A..D` arrow-key sequences become cursor moves
//! - Ctrl-key combinations are looked up in a closed set of commands
//!
//! Decoding is byte-at-a-time so it never needs more than one byte of
//! lookahead from the source.

mod source;

pub use source::ByteSource;

use tracing::trace;

/// Escape
const ESC: u8 = 0x1b;
/// Delete (sent by most terminals for Backspace)
const DEL: u8 = 0x7f;

/// Cursor movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Control commands that bypass the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the editor
    Quit,
    /// Show the buffer bookkeeping until the next key press
    DebugDump,
}

/// A decoded user intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Insert a byte at the cursor
    Insert(u8),
    /// Move the cursor one step
    Move(Direction),
    /// Run a control command
    Command(Command),
}

/// Control-key bindings for the command set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    quit: u8,
    debug_dump: u8,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            quit: ctrl_key(b'q'),
            debug_dump: ctrl_key(b'w'),
        }
    }
}

impl Keymap {
    /// Bind Ctrl+`quit` and Ctrl+`debug_dump` (ASCII letters)
    pub fn new(quit: u8, debug_dump: u8) -> Self {
        Self {
            quit: ctrl_key(quit),
            debug_dump: ctrl_key(debug_dump),
        }
    }

    /// Look up the command bound to a control byte
    pub fn lookup(&self, byte: u8) -> Option<Command> {
        [
            (self.quit, Command::Quit),
            (self.debug_dump, Command::DebugDump),
        ]
        .into_iter()
        .find_map(|(bound, command)| (bound == byte).then_some(command))
    }
}

/// Control byte produced by Ctrl+`letter`
pub fn ctrl_key(letter: u8) -> u8 {
    letter.to_ascii_lowercase() & 0x1f
}

/// Decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    /// After ESC
    Escape,
    /// After ESC [, skipping parameter and intermediate bytes
    Csi,
    /// After ESC O
    Ss3,
}

/// Byte-at-a-time input decoder
#[derive(Debug, Clone)]
pub struct Decoder {
    state: State,
    keymap: Keymap,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(Keymap::default())
    }
}

impl Decoder {
    /// Create a decoder in the ground state
    pub fn new(keymap: Keymap) -> Self {
        Self {
            state: State::Ground,
            keymap,
        }
    }

    /// Check if the decoder is in the middle of an escape sequence
    pub fn is_pending(&self) -> bool {
        self.state != State::Ground
    }

    /// Feed one byte, returning an intent once one is complete
    pub fn feed(&mut self, byte: u8) -> Option<Intent> {
        match self.state {
            State::Ground => self.ground(byte),
            State::Escape => {
                self.state = match byte {
                    b'[' => State::Csi,
                    b'O' => State::Ss3,
                    ESC => State::Escape,
                    _ => {
                        trace!(byte, "dropping unknown escape");
                        State::Ground
                    },
                };
                None
            },
            State::Csi => match byte {
                // Parameter and intermediate bytes (e.g. the `1;5` of a
                // modified arrow key) do not change the direction
                0x20..=0x3f => None,
                0x40..=0x7e => {
                    self.state = State::Ground;
                    let intent = arrow(byte).map(Intent::Move);
                    if intent.is_none() {
                        trace!(final_byte = byte, "dropping unsupported CSI sequence");
                    }
                    intent
                },
                _ => {
                    self.state = State::Ground;
                    None
                },
            },
            State::Ss3 => {
                self.state = State::Ground;
                arrow(byte).map(Intent::Move)
            },
        }
    }

    /// Decode a chunk of bytes
    pub fn decode(&mut self, data: &[u8]) -> Vec<Intent> {
        data.iter().filter_map(|&byte| self.feed(byte)).collect()
    }

    fn ground(&mut self, byte: u8) -> Option<Intent> {
        if let Some(command) = self.keymap.lookup(byte) {
            return Some(Intent::Command(command));
        }
        match byte {
            ESC => {
                self.state = State::Escape;
                None
            },
            b'\r' | b'\n' => Some(Intent::Insert(b'\n')),
            b'\t' => Some(Intent::Insert(b'\t')),
            0x00..=0x1f | DEL => {
                trace!(byte, "ignoring unbound control byte");
                None
            },
            _ => Some(Intent::Insert(byte)),
        }
    }
}

/// Map a CSI/SS3 final byte to an arrow direction
fn arrow(byte: u8) -> Option<Direction> {
    match byte {
        b'A' => Some(Direction::Up),
        b'B' => Some(Direction::Down),
        b'C' => Some(Direction::Right),
        b'D' => Some(Direction::Left),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_bytes_insert() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decoder.decode(b"a Z~"),
            vec![
                Intent::Insert(b'a'),
                Intent::Insert(b' '),
                Intent::Insert(b'Z'),
                Intent::Insert(b'~'),
            ]
        );
    }

    #[test]
    fn test_utf8_bytes_insert() {
        let mut decoder = Decoder::default();
        let intents = decoder.decode("é".as_bytes());
        assert_eq!(intents, vec![Intent::Insert(0xc3), Intent::Insert(0xa9)]);
    }

    #[test]
    fn test_enter_and_tab() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decoder.decode(b"\r\n\t"),
            vec![
                Intent::Insert(b'\n'),
                Intent::Insert(b'\n'),
                Intent::Insert(b'\t'),
            ]
        );
    }

    #[test]
    fn test_arrow_keys() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decoder.decode(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                Intent::Move(Direction::Up),
                Intent::Move(Direction::Down),
                Intent::Move(Direction::Right),
                Intent::Move(Direction::Left),
            ]
        );
    }

    #[test]
    fn test_application_cursor_arrows() {
        let mut decoder = Decoder::default();
        assert_eq!(
            decoder.decode(b"\x1bOA\x1bOD"),
            vec![Intent::Move(Direction::Up), Intent::Move(Direction::Left)]
        );
    }

    #[test]
    fn test_modified_arrow_ignores_params() {
        let mut decoder = Decoder::default();
        assert_eq!(decoder.decode(b"\x1b[1;5C"), vec![Intent::Move(Direction::Right)]);
    }

    #[test]
    fn test_unknown_sequences_are_dropped() {
        let mut decoder = Decoder::default();
        // Delete key, F5, then a plain letter
        assert_eq!(decoder.decode(b"\x1b[3~\x1b[15~x"), vec![Intent::Insert(b'x')]);
        assert!(!decoder.is_pending());
    }

    #[test]
    fn test_sequence_split_across_feeds() {
        let mut decoder = Decoder::default();
        assert_eq!(decoder.feed(0x1b), None);
        assert!(decoder.is_pending());
        assert_eq!(decoder.feed(b'['), None);
        assert_eq!(decoder.feed(b'C'), Some(Intent::Move(Direction::Right)));
        assert!(!decoder.is_pending());
    }

    #[test]
    fn test_default_commands() {
        let mut decoder = Decoder::default();
        assert_eq!(decoder.feed(0x11), Some(Intent::Command(Command::Quit)));
        assert_eq!(decoder.feed(0x17), Some(Intent::Command(Command::DebugDump)));
    }

    #[test]
    fn test_custom_keymap() {
        let mut decoder = Decoder::new(Keymap::new(b'x', b'D'));
        assert_eq!(decoder.feed(ctrl_key(b'x')), Some(Intent::Command(Command::Quit)));
        assert_eq!(decoder.feed(0x04), Some(Intent::Command(Command::DebugDump)));
        assert_eq!(decoder.feed(0x11), None);
    }

    #[test]
    fn test_unbound_controls_and_delete_ignored() {
        let mut decoder = Decoder::default();
        assert!(decoder.decode(&[0x01, 0x02, 0x7f, 0x00]).is_empty());
    }
}
