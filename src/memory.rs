//! Fixed-capacity in-memory circular buffer.

use crate::buffer::{Buffer, Capacity};
use crate::error::BufferError;

/// A fixed-capacity circular buffer backed by one in-memory byte region.
///
/// The unread bytes occupy the region starting at the read offset and
/// wrapping past the physical end, so a write or read touches at most two
/// contiguous segments. Cumulative traffic can exceed the capacity many
/// times over; only the count of simultaneously buffered bytes is bounded.
///
/// # Example
///
/// ```
/// use streambuf::{Buffer, MemoryBuffer};
///
/// let mut buf = MemoryBuffer::new(16);
/// buf.write(b"hello").unwrap();
///
/// let mut out = [0u8; 16];
/// let n = buf.read(&mut out).unwrap();
/// assert_eq!(&out[..n], b"hello");
/// ```
pub struct MemoryBuffer {
    region: Vec<u8>,
    read_off: usize,
    write_off: usize,
    len: usize,
}

impl MemoryBuffer {
    /// Creates an empty buffer holding at most `capacity` bytes.
    ///
    /// A zero capacity is legal: such a buffer stores nothing, every
    /// nonempty write overflows and every read reports empty.
    pub fn new(capacity: usize) -> Self {
        MemoryBuffer {
            region: vec![0; capacity],
            read_off: 0,
            write_off: 0,
            len: 0,
        }
    }
}

impl Buffer for MemoryBuffer {
    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> Capacity {
        Capacity::Bounded(self.region.len())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, BufferError> {
        let cap = self.region.len();
        let n = data.len().min(cap - self.len);
        if n > 0 {
            // Contiguous run up to the physical end, remainder wraps to the
            // region start.
            let first = n.min(cap - self.write_off);
            self.region[self.write_off..self.write_off + first].copy_from_slice(&data[..first]);
            self.region[..n - first].copy_from_slice(&data[first..n]);
            self.write_off = (self.write_off + n) % cap;
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
        let cap = self.region.len();
        let n = dest.len().min(self.len);
        if n > 0 {
            let first = n.min(cap - self.read_off);
            dest[..first].copy_from_slice(&self.region[self.read_off..self.read_off + first]);
            dest[first..n].copy_from_slice(&self.region[..n - first]);
            self.read_off = (self.read_off + n) % cap;
            self.len -= n;
        }
        Ok(n)
    }

    fn reset(&mut self) {
        self.read_off = 0;
        self.write_off = 0;
        self.len = 0;
    }
}
