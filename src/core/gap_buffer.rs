//! Gap buffer storage
//!
//! The document lives in one contiguous byte region split into three parts:
//!
//! ```text
//! [ head: 0..head_len | gap: head_len..tail_start | tail: tail_start..total_len ]
//! ```
//!
//! The logical document is `head ++ tail`. The cursor is always at logical
//! offset `head_len`, so moving the cursor means moving the gap (see
//! `relocate.rs`). Inserting at the cursor writes into the gap and only
//! touches the tail when the gap is exhausted and the storage has to grow.
//!
//! Gap bytes are kept zeroed so that scans over storage never pick up stale
//! content.

use std::collections::TryReserveError;
use std::fmt;
use std::ops::Range;

use tracing::debug;

/// Bytes added to the storage each time the gap runs out
pub const DEFAULT_GROWTH_INCREMENT: usize = 64;

/// Gap reserved in front of the initial content
pub const DEFAULT_INITIAL_GAP: usize = 4;

/// Error type for buffer mutations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Failed to grow buffer of {capacity} bytes by {increment}: {source}")]
    Grow {
        capacity: usize,
        increment: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Result type for buffer mutations
pub type BufferResult<T> = Result<T, BufferError>;

/// Byte storage with a relocatable gap at the cursor
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// Physical storage: head, gap, tail
    storage: Vec<u8>,
    /// Bytes before the gap
    head_len: usize,
    /// Bytes after the gap
    tail_len: usize,
    /// Fixed number of bytes added per growth step
    growth_increment: usize,
}

impl GapBuffer {
    /// Create an empty buffer with the default initial gap
    pub fn new() -> Self {
        Self::from_bytes(&[], DEFAULT_INITIAL_GAP)
    }

    /// Seed a buffer from initial content.
    ///
    /// The content becomes the tail and the cursor starts at offset 0:
    /// `head_len = 0`, `tail_len = content.len()`,
    /// `total_len = content.len() + initial_gap`.
    pub fn from_bytes(content: &[u8], initial_gap: usize) -> Self {
        let mut storage = Vec::with_capacity(initial_gap + content.len());
        storage.resize(initial_gap, 0);
        storage.extend_from_slice(content);

        Self {
            storage,
            head_len: 0,
            tail_len: content.len(),
            growth_increment: DEFAULT_GROWTH_INCREMENT,
        }
    }

    /// Use a different growth increment (at least one byte)
    pub fn with_growth_increment(mut self, increment: usize) -> Self {
        self.growth_increment = increment.max(1);
        self
    }

    /// Number of bytes before the gap; also the cursor offset
    pub fn head_len(&self) -> usize {
        self.head_len
    }

    /// Number of bytes after the gap
    pub fn tail_len(&self) -> usize {
        self.tail_len
    }

    /// Physical capacity of the storage
    pub fn total_len(&self) -> usize {
        self.storage.len()
    }

    /// Size of the free region between head and tail
    pub fn gap_size(&self) -> usize {
        self.storage.len() - self.head_len - self.tail_len
    }

    /// Storage index of the first tail byte
    pub fn tail_start(&self) -> usize {
        self.storage.len() - self.tail_len
    }

    /// Bytes added per growth step
    pub fn growth_increment(&self) -> usize {
        self.growth_increment
    }

    /// Logical cursor offset
    pub fn cursor(&self) -> usize {
        self.head_len
    }

    /// Logical document length
    pub fn len(&self) -> usize {
        self.head_len + self.tail_len
    }

    /// Check if the document is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The head segment (document text before the cursor)
    pub fn head(&self) -> &[u8] {
        &self.storage[..self.head_len]
    }

    /// The tail segment (document text after the cursor)
    pub fn tail(&self) -> &[u8] {
        &self.storage[self.tail_start()..]
    }

    /// Raw storage including the gap, for diagnostics
    pub fn storage(&self) -> &[u8] {
        &self.storage
    }

    /// Get the byte at a logical offset
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        if offset >= self.len() {
            return None;
        }
        Some(self.storage[self.storage_index(offset)])
    }

    /// Map a logical offset into storage numbering.
    ///
    /// Offsets up to the cursor address the head directly; offsets past the
    /// cursor are shifted over the gap.
    pub fn storage_index(&self, offset: usize) -> usize {
        if offset <= self.head_len {
            offset
        } else {
            offset + self.gap_size()
        }
    }

    /// Split a logical range into its head part and tail part.
    ///
    /// The range is clamped to the document. Concatenating the two slices
    /// yields exactly the logical bytes in the range.
    pub fn segments(&self, range: Range<usize>) -> (&[u8], &[u8]) {
        let end = range.end.min(self.len());
        let start = range.start.min(end);

        let head = &self.storage[start.min(self.head_len)..end.min(self.head_len)];

        let tail_start = self.tail_start();
        let from = start.max(self.head_len) - self.head_len;
        let to = end.max(self.head_len) - self.head_len;
        let tail = &self.storage[tail_start + from..tail_start + to];

        (head, tail)
    }

    /// Find the first `byte` at or after logical offset `from`
    pub fn find_next(&self, byte: u8, from: usize) -> Option<usize> {
        let from = from.min(self.len());
        let (head, tail) = self.segments(from..self.len());
        head.iter()
            .chain(tail.iter())
            .position(|&b| b == byte)
            .map(|i| from + i)
    }

    /// Find the last `byte` strictly before logical offset `before`
    pub fn find_prev(&self, byte: u8, before: usize) -> Option<usize> {
        let (head, tail) = self.segments(0..before);
        tail.iter()
            .rposition(|&b| b == byte)
            .map(|i| head.len() + i)
            .or_else(|| head.iter().rposition(|&b| b == byte))
    }

    /// Copy the logical document out of the buffer
    pub fn to_vec(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(self.head());
        bytes.extend_from_slice(self.tail());
        bytes
    }

    /// Insert a byte at the cursor and advance the cursor past it.
    ///
    /// Grows the storage by one increment first when the gap is exhausted.
    pub fn insert(&mut self, byte: u8) -> BufferResult<()> {
        if self.gap_size() == 0 {
            self.grow()?;
        }
        self.storage[self.head_len] = byte;
        self.head_len += 1;
        self.debug_check();
        Ok(())
    }

    /// Insert every byte of `bytes` at the cursor
    pub fn insert_slice(&mut self, bytes: &[u8]) -> BufferResult<()> {
        bytes.iter().try_for_each(|&b| self.insert(b))
    }

    /// Enlarge the storage by one increment, reopening the gap at the cursor
    fn grow(&mut self) -> BufferResult<()> {
        let capacity = self.storage.len();
        let increment = self.growth_increment;

        self.storage
            .try_reserve_exact(increment)
            .map_err(|source| BufferError::Grow {
                capacity,
                increment,
                source,
            })?;
        self.storage.resize(capacity + increment, 0);

        // Shift the tail to the end of the enlarged storage
        let old_tail_start = capacity - self.tail_len;
        self.storage
            .copy_within(old_tail_start..capacity, old_tail_start + increment);
        self.clear_gap();

        debug!(capacity, increment, head_len = self.head_len, "grew gap buffer");
        Ok(())
    }

    /// Move `count` bytes from the end of the head to the front of the tail
    pub(super) fn shift_head_into_tail(&mut self, count: usize) {
        let head_len = self.head_len;
        let tail_start = self.tail_start();
        self.storage
            .copy_within(head_len - count..head_len, tail_start - count);
        self.head_len -= count;
        self.tail_len += count;
    }

    /// Move `count` bytes from the front of the tail to the end of the head
    pub(super) fn shift_tail_into_head(&mut self, count: usize) {
        let head_len = self.head_len;
        let tail_start = self.tail_start();
        self.storage
            .copy_within(tail_start..tail_start + count, head_len);
        self.head_len += count;
        self.tail_len -= count;
    }

    /// Zero the free region between head and tail
    pub(super) fn clear_gap(&mut self) {
        let tail_start = self.tail_start();
        self.storage[self.head_len..tail_start].fill(0);
    }

    pub(super) fn debug_check(&self) {
        debug_assert!(
            self.head_len + self.tail_len <= self.storage.len(),
            "head {} + tail {} exceeds capacity {}",
            self.head_len,
            self.tail_len,
            self.storage.len()
        );
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_layout() {
        let buf = GapBuffer::from_bytes(b"hello", 4);
        assert_eq!(buf.head_len(), 0);
        assert_eq!(buf.tail_len(), 5);
        assert_eq!(buf.total_len(), 9);
        assert_eq!(buf.gap_size(), 4);
        assert_eq!(buf.tail_start(), 4);
        assert_eq!(buf.to_vec(), b"hello");
    }

    #[test]
    fn test_new_empty() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.gap_size(), DEFAULT_INITIAL_GAP);
        assert_eq!(buf.to_string(), "");
    }

    #[test]
    fn test_insert_at_start() {
        let mut buf = GapBuffer::from_bytes(b"bc", 4);
        buf.insert(b'a').unwrap();
        assert_eq!(buf.to_vec(), b"abc");
        assert_eq!(buf.cursor(), 1);
        assert_eq!(buf.gap_size(), 3);
    }

    #[test]
    fn test_insert_grows_when_gap_full() {
        let mut buf = GapBuffer::from_bytes(b"xyz", 2).with_growth_increment(8);
        buf.insert_slice(b"ab").unwrap();
        assert_eq!(buf.gap_size(), 0);
        assert_eq!(buf.total_len(), 5);

        buf.insert(b'c').unwrap();
        assert_eq!(buf.total_len(), 13);
        assert_eq!(buf.gap_size(), 7);
        assert_eq!(buf.to_vec(), b"abcxyz");
        assert_eq!(buf.tail(), b"xyz");
    }

    #[test]
    fn test_growth_zeroes_gap() {
        let mut buf = GapBuffer::from_bytes(b"\n\n\n", 0).with_growth_increment(5);
        buf.insert(b'a').unwrap();
        let gap = &buf.storage()[buf.head_len()..buf.tail_start()];
        assert!(gap.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_growth_increment_is_clamped() {
        let buf = GapBuffer::new().with_growth_increment(0);
        assert_eq!(buf.growth_increment(), 1);
    }

    #[test]
    fn test_storage_index() {
        let mut buf = GapBuffer::from_bytes(b"abcd", 3);
        buf.insert(b'x').unwrap();
        // head = "x", gap = 2, tail = "abcd"
        assert_eq!(buf.storage_index(0), 0);
        assert_eq!(buf.storage_index(1), 1);
        assert_eq!(buf.storage_index(2), 4);
        assert_eq!(buf.byte_at(2), Some(b'b'));
        assert_eq!(buf.byte_at(5), None);
    }

    #[test]
    fn test_segments_split_at_cursor() {
        let mut buf = GapBuffer::from_bytes(b"world", 4);
        buf.insert_slice(b"hello ").unwrap();
        assert_eq!(buf.segments(0..11), (&b"hello "[..], &b"world"[..]));
        assert_eq!(buf.segments(2..8), (&b"llo "[..], &b"wo"[..]));
        assert_eq!(buf.segments(7..100), (&b""[..], &b"orld"[..]));
        assert_eq!(buf.segments(0..3), (&b"hel"[..], &b""[..]));
    }

    #[test]
    fn test_find_next_and_prev() {
        let mut buf = GapBuffer::from_bytes(b"c\nd\n", 4);
        buf.insert_slice(b"a\nb").unwrap();
        // document: "a\nbc\nd\n", cursor at 3
        assert_eq!(buf.find_next(b'\n', 0), Some(1));
        assert_eq!(buf.find_next(b'\n', 2), Some(4));
        assert_eq!(buf.find_next(b'\n', 7), None);
        assert_eq!(buf.find_prev(b'\n', 7), Some(6));
        assert_eq!(buf.find_prev(b'\n', 6), Some(4));
        assert_eq!(buf.find_prev(b'\n', 4), Some(1));
        assert_eq!(buf.find_prev(b'\n', 1), None);
    }

    #[test]
    fn test_display_lossy() {
        let buf = GapBuffer::from_bytes("héllo".as_bytes(), 4);
        assert_eq!(buf.to_string(), "héllo");
    }
}
