//! Fixed-capacity circular buffer backed by a temp file.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::buffer::{Buffer, Capacity};
use crate::error::BufferError;

/// A fixed-capacity circular buffer whose byte region lives in an anonymous
/// temp file instead of memory.
///
/// The external contract is identical to [`MemoryBuffer`]; only the segment
/// copies go through the filesystem. The backing store is managed by fill
/// state:
///
/// - created lazily by the first write on a fresh or fully drained buffer;
/// - released as soon as a read drains the buffer, so idle buffers hold no
///   disk footprint;
/// - removed by the OS when the buffer is dropped (the file is anonymous).
///
/// File I/O is synchronous and may block the calling thread; callers that
/// need non-blocking behavior should issue the call from a dedicated thread.
///
/// [`MemoryBuffer`]: crate::MemoryBuffer
///
/// # Example
///
/// ```
/// use streambuf::{Buffer, FileBuffer};
///
/// let mut buf = FileBuffer::new(1024);
/// assert!(!buf.has_store());
///
/// buf.write(b"spilled").unwrap();
/// assert!(buf.has_store());
///
/// let mut out = [0u8; 16];
/// let n = buf.read(&mut out).unwrap();
/// assert_eq!(&out[..n], b"spilled");
/// assert!(!buf.has_store()); // drained, store released
/// ```
pub struct FileBuffer {
    capacity: usize,
    file: Option<File>,
    read_off: usize,
    write_off: usize,
    len: usize,
}

impl FileBuffer {
    /// Creates an empty buffer holding at most `capacity` bytes on disk.
    ///
    /// No file is touched until the first write.
    pub fn new(capacity: usize) -> Self {
        FileBuffer {
            capacity,
            file: None,
            read_off: 0,
            write_off: 0,
            len: 0,
        }
    }

    /// Returns true while a backing file is live.
    pub fn has_store(&self) -> bool {
        self.file.is_some()
    }

    fn release_store(&mut self) {
        if self.file.take().is_some() {
            debug!(capacity = self.capacity, "released backing store");
        }
        self.read_off = 0;
        self.write_off = 0;
    }
}

impl Buffer for FileBuffer {
    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> Capacity {
        Capacity::Bounded(self.capacity)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, BufferError> {
        let n = data.len().min(self.capacity - self.len);
        if n > 0 {
            if self.file.is_none() {
                debug!(capacity = self.capacity, "creating backing store");
                self.file = Some(tempfile::tempfile()?);
            }
            let Some(file) = self.file.as_mut() else {
                return Err(BufferError::Storage(std::io::Error::other(
                    "backing store missing",
                )));
            };

            // Same two-segment wraparound as the in-memory ring, with
            // seek + write against the store. Offsets and len advance only
            // after every segment landed, so an I/O error leaves the
            // buffered bytes untouched.
            let first = n.min(self.capacity - self.write_off);
            file.seek(SeekFrom::Start(self.write_off as u64))?;
            file.write_all(&data[..first])?;
            if first < n {
                file.seek(SeekFrom::Start(0))?;
                file.write_all(&data[first..n])?;
            }
            self.write_off = (self.write_off + n) % self.capacity;
            self.len += n;
        }
        if n < data.len() {
            return Err(BufferError::CapacityExceeded {
                accepted: n,
                requested: data.len(),
            });
        }
        Ok(n)
    }

    fn read(&mut self, dest: &mut [u8]) -> Result<usize, BufferError> {
        if self.len == 0 {
            return Err(BufferError::Empty);
        }
        let n = dest.len().min(self.len);
        if n > 0 {
            let Some(file) = self.file.as_mut() else {
                // len > 0 always implies a live store; a missing one means
                // the store was torn down behind our back.
                return Err(BufferError::Storage(std::io::Error::other(
                    "backing store missing",
                )));
            };

            let first = n.min(self.capacity - self.read_off);
            file.seek(SeekFrom::Start(self.read_off as u64))?;
            file.read_exact(&mut dest[..first])?;
            if first < n {
                file.seek(SeekFrom::Start(0))?;
                file.read_exact(&mut dest[first..n])?;
            }
            self.read_off = (self.read_off + n) % self.capacity;
            self.len -= n;
            if self.len == 0 {
                self.release_store();
            }
        }
        Ok(n)
    }

    fn reset(&mut self) {
        self.len = 0;
        self.release_store();
    }
}
