//! FIFO buffer of byte chunks.
//!
//! A small companion utility, unrelated to the rewriting engine: producers
//! push byte chunks in, consumers pop them out in arrival order, and the
//! queue keeps a running total of the buffered bytes so length queries never
//! walk the chunks.

use std::collections::VecDeque;

/// FIFO queue of byte chunks with a running length counter.
#[derive(Debug, Default, Clone)]
pub struct ByteQueue {
    chunks: VecDeque<Vec<u8>>,
    len: usize,
}

impl ByteQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk at the tail. Empty chunks are queued too and come back
    /// out of [`ByteQueue::dequeue`] as empty vectors.
    pub fn enqueue(&mut self, bytes: impl Into<Vec<u8>>) {
        let bytes = bytes.into();
        self.len += bytes.len();
        self.chunks.push_back(bytes);
    }

    /// Remove and return the chunk at the head, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<Vec<u8>> {
        let bytes = self.chunks.pop_front()?;
        self.len -= bytes.len();
        Some(bytes)
    }

    /// Borrow the chunk at the head without removing it.
    pub fn peek(&self) -> Option<&[u8]> {
        self.chunks.front().map(Vec::as_slice)
    }

    /// Total number of buffered bytes across all chunks.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the queue holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of queued chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Drop all buffered chunks.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.len = 0;
    }
}
