//! Convenience constructors for common byte-buffer shapes.

use crate::buffer::BoxedBuffer;
use crate::error::BufferError;
use crate::file::FileBuffer;
use crate::memory::MemoryBuffer;
use crate::multi::MultiBuffer;
use crate::partition::{PartitionBuffer, file_chunk, memory_chunk};

// ============================================================================
// MemoryBuffer convenience functions
// ============================================================================

/// Creates a 256B in-memory buffer.
pub fn mem_bytes_256b() -> MemoryBuffer {
    MemoryBuffer::new(256)
}

/// Creates a 1KB in-memory buffer.
pub fn mem_bytes_1kb() -> MemoryBuffer {
    MemoryBuffer::new(1024)
}

/// Creates a 4KB in-memory buffer.
pub fn mem_bytes_4kb() -> MemoryBuffer {
    MemoryBuffer::new(4096)
}

/// Creates a 16KB in-memory buffer.
pub fn mem_bytes_16kb() -> MemoryBuffer {
    MemoryBuffer::new(16384)
}

/// Creates a 64KB in-memory buffer.
pub fn mem_bytes_64kb() -> MemoryBuffer {
    MemoryBuffer::new(65536)
}

/// Creates a default 1KB in-memory buffer.
pub fn mem_bytes() -> MemoryBuffer {
    mem_bytes_1kb()
}

// ============================================================================
// FileBuffer convenience functions
// ============================================================================

/// Creates a 64KB file-backed buffer.
pub fn file_bytes_64kb() -> FileBuffer {
    FileBuffer::new(65536)
}

/// Creates a 1MB file-backed buffer.
pub fn file_bytes_1mb() -> FileBuffer {
    FileBuffer::new(1 << 20)
}

/// Creates a file-backed buffer with the specified capacity.
pub fn file_bytes(capacity: usize) -> FileBuffer {
    FileBuffer::new(capacity)
}

// ============================================================================
// Partition and spill compositions
// ============================================================================

/// Creates an unbounded buffer pooling in-memory chunks of `chunk_capacity`
/// bytes.
pub fn mem_partition(
    chunk_capacity: usize,
) -> PartitionBuffer<fn(usize) -> Result<MemoryBuffer, BufferError>> {
    PartitionBuffer::new(chunk_capacity, memory_chunk)
}

/// Creates an unbounded buffer pooling file-backed chunks of
/// `chunk_capacity` bytes.
pub fn file_partition(
    chunk_capacity: usize,
) -> PartitionBuffer<fn(usize) -> Result<FileBuffer, BufferError>> {
    PartitionBuffer::new(chunk_capacity, file_chunk)
}

/// Creates a bounded two-tier buffer that holds the first `memory_capacity`
/// bytes in memory and spills up to `file_capacity` further bytes to disk.
pub fn spill(memory_capacity: usize, file_capacity: usize) -> MultiBuffer {
    let tiers: Vec<BoxedBuffer> = vec![
        Box::new(MemoryBuffer::new(memory_capacity)),
        Box::new(FileBuffer::new(file_capacity)),
    ];
    MultiBuffer::new(tiers)
}

/// Creates an unbounded spill buffer: `memory_capacity` bytes in memory,
/// overflow pooled into file-backed chunks of `chunk_capacity` bytes.
pub fn spill_unbounded(memory_capacity: usize, chunk_capacity: usize) -> MultiBuffer {
    let tiers: Vec<BoxedBuffer> = vec![
        Box::new(MemoryBuffer::new(memory_capacity)),
        Box::new(file_partition(chunk_capacity)),
    ];
    MultiBuffer::new(tiers)
}
