//! Cursor relocation
//!
//! Relocation moves the gap so that the head ends at the requested cursor.
//! Targets use storage numbering: offsets below `head_len` address the head,
//! offsets at or above `tail_start` address the tail. The gap interior is not
//! addressable.

use tracing::debug;

use super::gap_buffer::GapBuffer;

/// Outcome of a relocation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// The gap moved; carries the new cursor offset
    Moved(usize),
    /// The target already was the cursor
    Unchanged,
    /// The target was inside the gap or past the end of storage
    Ignored,
}

impl Relocation {
    /// Check if the gap actually moved
    pub fn is_moved(self) -> bool {
        matches!(self, Relocation::Moved(_))
    }
}

impl GapBuffer {
    /// Move the gap so the cursor lands on `target` (storage numbering).
    ///
    /// Moving right copies `target - tail_start` bytes from the front of the
    /// tail onto the end of the head; moving left copies
    /// `head_len - target` bytes from the end of the head to just before the
    /// tail. Content and gap size are unchanged, and the gap is zeroed
    /// afterwards.
    ///
    /// Targets strictly inside the gap, or past the end of storage, are
    /// dropped without error and logged at debug level.
    pub fn relocate(&mut self, target: usize) -> Relocation {
        let head_len = self.head_len();
        let tail_start = self.tail_start();

        if target > head_len {
            if target < tail_start || target > self.total_len() {
                debug!(
                    target,
                    head_len,
                    tail_start,
                    total_len = self.total_len(),
                    "ignoring unaddressable relocation target"
                );
                return Relocation::Ignored;
            }
            let count = target - tail_start;
            if count == 0 {
                return Relocation::Unchanged;
            }
            self.shift_tail_into_head(count);
        } else if target < head_len {
            self.shift_head_into_tail(head_len - target);
        } else {
            return Relocation::Unchanged;
        }

        self.clear_gap();
        self.debug_check();
        Relocation::Moved(self.head_len())
    }

    /// Move the cursor to a logical (gap-free) offset, clamped to the document
    pub fn move_to_logical(&mut self, offset: usize) -> Relocation {
        let offset = offset.min(self.len());
        self.relocate(self.storage_index(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// "abcdef" with the cursor after "abc" and a gap of 4
    fn split_buffer() -> GapBuffer {
        let mut buf = GapBuffer::from_bytes(b"def", 4).with_growth_increment(4);
        buf.insert_slice(b"abc").unwrap();
        buf
    }

    #[test]
    fn test_relocate_left() {
        let mut buf = split_buffer();
        assert_eq!(buf.gap_size(), 1);

        assert_eq!(buf.relocate(1), Relocation::Moved(1));
        assert_eq!(buf.head(), b"a");
        assert_eq!(buf.tail(), b"bcdef");
        assert_eq!(buf.gap_size(), 1);
        assert_eq!(buf.to_vec(), b"abcdef");
    }

    #[test]
    fn test_relocate_right() {
        let mut buf = GapBuffer::from_bytes(b"abcdef", 4);
        // tail_start = 4, so storage index 6 is two bytes into the tail
        assert_eq!(buf.relocate(6), Relocation::Moved(2));
        assert_eq!(buf.head(), b"ab");
        assert_eq!(buf.tail(), b"cdef");
        assert_eq!(buf.gap_size(), 4);
    }

    #[test]
    fn test_relocate_inside_gap_is_ignored() {
        let mut buf = GapBuffer::from_bytes(b"abcdef", 4);
        for target in 1..4 {
            assert_eq!(buf.relocate(target), Relocation::Ignored);
        }
        assert_eq!(buf.head_len(), 0);
        assert_eq!(buf.tail_len(), 6);
    }

    #[test]
    fn test_relocate_past_storage_is_ignored() {
        let mut buf = GapBuffer::from_bytes(b"abc", 2);
        assert_eq!(buf.relocate(6), Relocation::Ignored);
        assert_eq!(buf.to_vec(), b"abc");
    }

    #[test]
    fn test_relocate_to_cursor_is_unchanged() {
        let mut buf = split_buffer();
        assert_eq!(buf.relocate(3), Relocation::Unchanged);
        assert_eq!(buf.relocate(buf.tail_start()), Relocation::Unchanged);
    }

    #[test]
    fn test_relocate_twice_is_idempotent() {
        let mut buf = GapBuffer::from_bytes(b"hello world", 4);
        let target = buf.tail_start() + 5;
        assert!(buf.relocate(target).is_moved());
        let state = (buf.head_len(), buf.tail_len(), buf.total_len());
        assert_eq!(buf.relocate(target), Relocation::Unchanged);
        assert_eq!(state, (buf.head_len(), buf.tail_len(), buf.total_len()));
    }

    #[test]
    fn test_relocate_clears_gap() {
        let mut buf = split_buffer();
        buf.relocate(0);
        let gap = &buf.storage()[buf.head_len()..buf.tail_start()];
        assert!(gap.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_move_to_logical() {
        let mut buf = split_buffer();
        assert_eq!(buf.move_to_logical(5), Relocation::Moved(5));
        assert_eq!(buf.head(), b"abcde");
        assert_eq!(buf.move_to_logical(0), Relocation::Moved(0));
        assert_eq!(buf.move_to_logical(100), Relocation::Moved(6));
        assert_eq!(buf.to_vec(), b"abcdef");
    }
}
