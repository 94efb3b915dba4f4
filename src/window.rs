//! The history window: the last 4KiB of produced bytes, addressable by
//! displacement from the write cursor.

use crate::WINDOW_SIZE;

/// Fixed-capacity ring buffer over the most recently produced bytes.
///
/// The decoder pushes every byte it emits and reads copy sources back out;
/// because pushes happen byte by byte, a back-reference may legally read
/// bytes it produced itself earlier in the same token.
pub struct HistoryWindow {
    buf: [u8; WINDOW_SIZE],
    head: usize,
}

impl HistoryWindow {
    pub fn new() -> Self {
        HistoryWindow { buf: [0; WINDOW_SIZE], head: 0 }
    }

    /// Record one produced byte, evicting the oldest once the ring is full.
    pub fn push(&mut self, byte: u8) {
        self.buf[self.head] = byte;
        self.head = (self.head + 1) % WINDOW_SIZE;
    }

    /// The byte `displacement` positions behind the write cursor.
    ///
    /// Callers must have pushed at least `displacement` bytes; the decoder
    /// enforces this against its written-byte count before calling.
    pub fn peek_back(&self, displacement: usize) -> u8 {
        debug_assert!((1..=WINDOW_SIZE).contains(&displacement));
        self.buf[(self.head + WINDOW_SIZE - displacement) % WINDOW_SIZE]
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new()
    }
}
