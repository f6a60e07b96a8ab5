//! Random-access byte sources.
//!
//! A [`ByteSource`] is an immutable window of bytes of known length, backed
//! either by memory or by a memory-mapped file. Sources carry no position;
//! the cursor lives in [`SourceReader`], so one source can be shared across
//! independent readers via `Arc`.

mod mmap;
mod reader;

pub use mmap::MappedFileSource;
pub use reader::SourceReader;

use crate::error::Result;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Random-access view over a finite sequence of bytes.
///
/// Implementations are immutable for the life of a parse and safe to share
/// across threads; all access is by absolute offset.
pub trait ByteSource: Send + Sync {
    /// Total number of bytes in the source.
    fn len(&self) -> u64;

    /// Byte at `offset`, or `None` past the end.
    fn get(&self, offset: u64) -> Option<u8>;

    /// Copy bytes starting at `offset` into `buf`, returning how many were
    /// copied. Short reads happen only at the end of the source.
    fn read_range(&self, offset: u64, buf: &mut [u8]) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory byte source.
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl ByteSource for MemorySource {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn get(&self, offset: u64) -> Option<u8> {
        self.data.get(usize::try_from(offset).ok()?).copied()
    }

    fn read_range(&self, offset: u64, buf: &mut [u8]) -> usize {
        let Ok(start) = usize::try_from(offset) else {
            return 0;
        };
        if start >= self.data.len() {
            return 0;
        }
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        n
    }
}

/// Wrap an in-memory buffer as a shared byte source.
pub fn from_bytes(data: Vec<u8>) -> Arc<dyn ByteSource> {
    Arc::new(MemorySource::new(data))
}

/// Open a file as a shared byte source.
///
/// Memory-maps the file when the platform allows it; empty files and
/// platforms without mapping support fall back to reading into memory.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Arc<dyn ByteSource>> {
    let path = path.as_ref();
    let metadata = fs::metadata(path)?;
    if metadata.len() == 0 {
        return Ok(Arc::new(MemorySource::new(Vec::new())));
    }
    match MappedFileSource::open(path) {
        Ok(mapped) => Ok(Arc::new(mapped)),
        Err(_) => Ok(Arc::new(MemorySource::new(fs::read(path)?))),
    }
}
