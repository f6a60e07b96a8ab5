//! Memory-mapped file source.
//!
//! Uses OS-level memory mapping so large PDFs can be tokenized without
//! loading them into memory. The mapping is read-only and released on drop.

use super::ByteSource;
use crate::error::{LexError, Result};
use std::fs::File;
use std::path::Path;

#[cfg(unix)]
mod unix_mmap {
    use super::*;
    use std::os::unix::io::AsRawFd;
    use std::ptr;

    pub struct MmapInner {
        ptr: *mut u8,
        len: usize,
    }

    // SAFETY: the mapping is PROT_READ and never mutated.
    unsafe impl Send for MmapInner {}
    unsafe impl Sync for MmapInner {}

    impl MmapInner {
        pub fn new(file: &File, len: usize) -> Result<Self> {
            if len == 0 {
                return Err(LexError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "cannot mmap empty file",
                )));
            }

            unsafe {
                let ptr = libc::mmap(
                    ptr::null_mut(),
                    len,
                    libc::PROT_READ,
                    libc::MAP_PRIVATE,
                    file.as_raw_fd(),
                    0,
                );

                if ptr == libc::MAP_FAILED {
                    return Err(LexError::Io(std::io::Error::last_os_error()));
                }

                Ok(Self {
                    ptr: ptr as *mut u8,
                    len,
                })
            }
        }

        pub fn as_slice(&self) -> &[u8] {
            unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
        }
    }

    impl Drop for MmapInner {
        fn drop(&mut self) {
            unsafe {
                libc::munmap(self.ptr as *mut libc::c_void, self.len);
            }
        }
    }
}

#[cfg(windows)]
mod windows_mmap {
    use super::*;
    use std::os::windows::io::AsRawHandle;
    use std::ptr;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::memoryapi::{
        CreateFileMappingW, MapViewOfFile, UnmapViewOfFile, FILE_MAP_READ,
    };
    use winapi::um::winnt::PAGE_READONLY;

    pub struct MmapInner {
        ptr: *mut u8,
        len: usize,
        mapping_handle: *mut winapi::ctypes::c_void,
    }

    unsafe impl Send for MmapInner {}
    unsafe impl Sync for MmapInner {}

    impl MmapInner {
        pub fn new(file: &File, len: usize) -> Result<Self> {
            if len == 0 {
                return Err(LexError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "cannot mmap empty file",
                )));
            }

            unsafe {
                let mapping_handle = CreateFileMappingW(
                    file.as_raw_handle() as *mut _,
                    ptr::null_mut(),
                    PAGE_READONLY,
                    0,
                    0,
                    ptr::null(),
                );

                if mapping_handle.is_null() {
                    return Err(LexError::Io(std::io::Error::last_os_error()));
                }

                let ptr = MapViewOfFile(mapping_handle, FILE_MAP_READ, 0, 0, len);

                if ptr.is_null() {
                    CloseHandle(mapping_handle);
                    return Err(LexError::Io(std::io::Error::last_os_error()));
                }

                Ok(Self {
                    ptr: ptr as *mut u8,
                    len,
                    mapping_handle,
                })
            }
        }

        pub fn as_slice(&self) -> &[u8] {
            unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
        }
    }

    impl Drop for MmapInner {
        fn drop(&mut self) {
            unsafe {
                UnmapViewOfFile(self.ptr as *mut _);
                CloseHandle(self.mapping_handle);
            }
        }
    }
}

// Fallback for platforms without a mapping implementation
#[cfg(not(any(unix, windows)))]
mod fallback_mmap {
    use super::*;
    use std::io::Read;

    pub struct MmapInner {
        data: Vec<u8>,
    }

    impl MmapInner {
        pub fn new(file: &File, len: usize) -> Result<Self> {
            let mut data = vec![0u8; len];
            let mut file = file.try_clone()?;
            file.read_exact(&mut data)?;
            Ok(Self { data })
        }

        pub fn as_slice(&self) -> &[u8] {
            &self.data
        }
    }
}

#[cfg(not(any(unix, windows)))]
use fallback_mmap::MmapInner;
#[cfg(unix)]
use unix_mmap::MmapInner;
#[cfg(windows)]
use windows_mmap::MmapInner;

/// File-backed byte source mapped into the address space.
pub struct MappedFileSource {
    inner: MmapInner,
}

impl MappedFileSource {
    /// Map the file at `path` read-only. Fails for zero-length files.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let len = usize::try_from(len).map_err(|_| {
            LexError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file too large to map",
            ))
        })?;
        let inner = MmapInner::new(&file, len)?;
        Ok(Self { inner })
    }

    fn as_slice(&self) -> &[u8] {
        self.inner.as_slice()
    }
}

impl ByteSource for MappedFileSource {
    fn len(&self) -> u64 {
        self.as_slice().len() as u64
    }

    fn get(&self, offset: u64) -> Option<u8> {
        self.as_slice().get(usize::try_from(offset).ok()?).copied()
    }

    fn read_range(&self, offset: u64, buf: &mut [u8]) -> usize {
        let data = self.as_slice();
        let Ok(start) = usize::try_from(offset) else {
            return 0;
        };
        if start >= data.len() {
            return 0;
        }
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mapped_source_reads_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"1 0 obj << >> endobj").unwrap();
        tmp.flush().unwrap();

        let src = MappedFileSource::open(tmp.path()).unwrap();
        assert_eq!(src.len(), 20);
        assert_eq!(src.get(0), Some(b'1'));
        assert_eq!(src.get(19), Some(b'j'));
        assert_eq!(src.get(20), None);
    }

    #[test]
    fn test_mapped_source_rejects_empty_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        assert!(MappedFileSource::open(tmp.path()).is_err());
    }
}
