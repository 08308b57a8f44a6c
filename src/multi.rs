//! Tiered buffer over a fixed chain of heterogeneous buffers.

use crate::buffer::{BoxedBuffer, Buffer, Capacity};
use crate::error::BufferError;

/// A buffer chained from a fixed, ordered list of tiers.
///
/// Writes fill tiers in order: when the current write tier overflows, the
/// accepted prefix stays there and the remainder moves to the next tier.
/// Reads drain tiers in the same order, advancing only into tiers that have
/// already received bytes, so the read cursor never passes the write cursor
/// and byte order is preserved across tier boundaries.
///
/// Capacity is the sum of the tiers' capacities, or unbounded if any tier is
/// unbounded. An unbounded tier never overflows, so tiers placed after one
/// can never receive writes; chains should put an unbounded tier, if any,
/// last.
///
/// # Example
///
/// ```
/// use streambuf::{Buffer, Capacity, FileBuffer, MemoryBuffer, MultiBuffer};
///
/// // Hold 4 bytes in memory, spill the rest to disk.
/// let mut buf = MultiBuffer::new(vec![
///     Box::new(MemoryBuffer::new(4)),
///     Box::new(FileBuffer::new(1024)),
/// ]);
/// assert_eq!(buf.capacity(), Capacity::Bounded(1028));
///
/// buf.write(b"hello world").unwrap();
/// assert_eq!(buf.len(), 11);
/// ```
pub struct MultiBuffer {
    tiers: Vec<BoxedBuffer>,
    write_tier: usize,
    read_tier: usize,
}

impl MultiBuffer {
    /// Creates a chain over already-constructed tiers, in draining order.
    ///
    /// # Panics
    ///
    /// Panics if `tiers` is empty.
    pub fn new(tiers: Vec<BoxedBuffer>) -> Self {
        assert!(!tiers.is_empty(), "tier chain must not be empty");
        MultiBuffer {
            tiers,
            write_tier: 0,
            read_tier: 0,
        }
    }
}

impl Buffer for MultiBuffer {
    fn len(&self) -> usize {
        self.tiers.iter().map(|tier| tier.len()).sum()
    }

    fn capacity(&self) -> Capacity {
        self.tiers
            .iter()
            .fold(Capacity::Bounded(0), |sum, tier| sum + tier.capacity())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, BufferError> {
        let mut written = 0;
        loop {
            match self.tiers[self.write_tier].write(&data[written..]) {
                Ok(_) => return Ok(data.len()),
                Err(BufferError::CapacityExceeded { accepted, .. }) => {
                    // The accepted prefix stays in the overflowing tier; the
                    // suffix moves on, or the whole chain is exhausted.
                    written += accepted;
                    if self.write_tier + 1 == self.tiers.len() {
                        return Err(BufferError::CapacityExceeded {
                            accepted: written,
                            requested: data.len(),
                        });
                    }
                    self.write_tier += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn read(&mut self, dest: &mut [u8]) -> Result<usize, BufferError> {
        loop {
            match self.tiers[self.read_tier].read(dest) {
                // A drained tier with a later tier already written: move on.
                // read_tier == write_tier and empty means genuinely nothing
                // is buffered ahead yet.
                Err(BufferError::Empty) if self.read_tier < self.write_tier => {
                    self.read_tier += 1;
                }
                result => return result,
            }
        }
    }

    fn reset(&mut self) {
        for tier in &mut self.tiers {
            tier.reset();
        }
        self.write_tier = 0;
        self.read_tier = 0;
    }
}
