//! Unbounded buffer over a pool of fixed-capacity chunks.

use std::collections::VecDeque;

use tracing::trace;

use crate::buffer::{Buffer, Capacity};
use crate::error::BufferError;
use crate::file::FileBuffer;
use crate::memory::MemoryBuffer;

/// Produces one pool chunk on demand.
///
/// A factory is invoked with the pool's configured chunk capacity and must
/// return an empty buffer of that capacity. Plain functions and closures are
/// factories through the blanket impl, so backend constructors can be passed
/// directly:
///
/// ```
/// use streambuf::{Buffer, PartitionBuffer, memory_chunk};
///
/// let mut buf = PartitionBuffer::new(1024, memory_chunk);
/// buf.write(b"grows as needed").unwrap();
/// ```
pub trait ChunkFactory {
    /// The chunk kind this factory produces.
    type Chunk: Buffer;

    /// Produces a fresh chunk of the given capacity.
    fn produce(&mut self, capacity: usize) -> Result<Self::Chunk, BufferError>;
}

impl<B, F> ChunkFactory for F
where
    B: Buffer,
    F: FnMut(usize) -> Result<B, BufferError>,
{
    type Chunk = B;

    fn produce(&mut self, capacity: usize) -> Result<B, BufferError> {
        self(capacity)
    }
}

/// Chunk factory producing in-memory chunks.
pub fn memory_chunk(capacity: usize) -> Result<MemoryBuffer, BufferError> {
    Ok(MemoryBuffer::new(capacity))
}

/// Chunk factory producing temp-file-backed chunks.
pub fn file_chunk(capacity: usize) -> Result<FileBuffer, BufferError> {
    Ok(FileBuffer::new(capacity))
}

/// An unbounded buffer built from a growing queue of same-kind chunks.
///
/// Writes fill the newest (tail) chunk and allocate a fresh one from the
/// factory whenever the tail runs out of room, so a write never overflows.
/// Reads drain the oldest (head) chunk and release it the moment it empties,
/// so the pool shrinks as soon as the consumer catches up. Once a mid-queue
/// chunk is full it is never written again; bounded per-chunk size keeps
/// allocation units predictable while total capacity stays unbounded.
pub struct PartitionBuffer<F: ChunkFactory> {
    chunk_capacity: usize,
    factory: F,
    chunks: VecDeque<F::Chunk>,
}

impl<F: ChunkFactory> PartitionBuffer<F> {
    /// Creates an empty pool producing chunks of `chunk_capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_capacity` is 0.
    pub fn new(chunk_capacity: usize, factory: F) -> Self {
        assert!(chunk_capacity > 0, "chunk capacity must be greater than 0");
        PartitionBuffer {
            chunk_capacity,
            factory,
            chunks: VecDeque::new(),
        }
    }

    /// Number of chunks currently pooled.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

fn room<B: Buffer>(chunk: &B) -> usize {
    match chunk.capacity() {
        Capacity::Bounded(cap) => cap.saturating_sub(chunk.len()),
        Capacity::Unbounded => usize::MAX,
    }
}

impl<F: ChunkFactory + Send> Buffer for PartitionBuffer<F> {
    fn len(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.len()).sum()
    }

    fn capacity(&self) -> Capacity {
        Capacity::Unbounded
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, BufferError> {
        let mut written = 0;
        while written < data.len() {
            if let Some(tail) = self.chunks.back_mut() {
                let take = room(tail).min(data.len() - written);
                if take > 0 {
                    // Cannot overflow: take fits the tail's remaining room.
                    tail.write(&data[written..written + take])?;
                    written += take;
                    continue;
                }
            }

            // Queue empty or tail full: grow the pool. A factory failure
            // aborts the write with prior chunks and their bytes intact.
            let chunk = self
                .factory
                .produce(self.chunk_capacity)
                .map_err(|err| BufferError::Factory {
                    accepted: written,
                    message: err.to_string(),
                })?;
            if room(&chunk) == 0 {
                return Err(BufferError::Factory {
                    accepted: written,
                    message: "factory produced a zero-capacity chunk".into(),
                });
            }
            trace!(chunks = self.chunks.len() + 1, "allocated pool chunk");
            self.chunks.push_back(chunk);
        }
        Ok(written)
    }

    fn read(&mut self, dest: &mut [u8]) -> Result<usize, BufferError> {
        if self.chunks.is_empty() {
            return Err(BufferError::Empty);
        }
        let mut filled = 0;
        while filled < dest.len() {
            let Some(head) = self.chunks.front_mut() else {
                break;
            };
            match head.read(&mut dest[filled..]) {
                Ok(n) => {
                    filled += n;
                    if head.is_empty() {
                        self.chunks.pop_front();
                        trace!(chunks = self.chunks.len(), "released drained pool chunk");
                    }
                }
                // Queued chunks are never empty between calls, but a drained
                // head costs nothing to release here too.
                Err(BufferError::Empty) => {
                    self.chunks.pop_front();
                }
                Err(err) => return Err(err),
            }
        }
        Ok(filled)
    }

    fn reset(&mut self) {
        trace!(chunks = self.chunks.len(), "releasing all pool chunks");
        self.chunks.clear();
    }
}
