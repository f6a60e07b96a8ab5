//! Positioned cursor over a [`ByteSource`].

use super::ByteSource;
use std::sync::Arc;

/// Size of the readahead window. Refills are amortized over this many bytes;
/// the observable behavior is identical to unbuffered single-byte reads.
const READAHEAD: usize = 32;

/// Cursor with single-byte read, one-step pushback and absolute seek.
///
/// A reader owns its position and must not be shared; create one reader per
/// concurrent consumer over the same `Arc<dyn ByteSource>`.
pub struct SourceReader {
    source: Arc<dyn ByteSource>,
    len: u64,
    pos: u64,
    buf: [u8; READAHEAD],
    buf_start: u64,
    buf_len: usize,
    can_back: bool,
}

impl SourceReader {
    pub fn new(source: Arc<dyn ByteSource>) -> Self {
        let len = source.len();
        Self {
            source,
            len,
            pos: 0,
            buf: [0; READAHEAD],
            buf_start: 0,
            buf_len: 0,
            can_back: false,
        }
    }

    /// Total length of the underlying source.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current position, always in `[0, len]`.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Read the byte at the current position and advance. Returns `None` at
    /// the end of the source, leaving the position at `len`.
    pub fn read(&mut self) -> Option<u8> {
        let byte = self.byte_at(self.pos)?;
        self.pos += 1;
        self.can_back = true;
        Some(byte)
    }

    /// Byte at the current position without advancing.
    pub fn peek(&mut self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    /// Step back over the byte returned by the last `read`. At most one step
    /// per read; a no-op right after `seek` or at offset 0.
    pub fn back(&mut self) {
        if self.can_back && self.pos > 0 {
            self.pos -= 1;
            self.can_back = false;
        }
    }

    /// Move to an absolute offset, clamped to `[0, len]`.
    pub fn seek(&mut self, offset: u64) {
        self.pos = offset.min(self.len);
        self.can_back = false;
    }

    fn byte_at(&mut self, offset: u64) -> Option<u8> {
        if offset >= self.len {
            return None;
        }
        if offset < self.buf_start || offset >= self.buf_start + self.buf_len as u64 {
            self.buf_len = self.source.read_range(offset, &mut self.buf);
            self.buf_start = offset;
            if self.buf_len == 0 {
                return None;
            }
        }
        Some(self.buf[(offset - self.buf_start) as usize])
    }
}
