//! Interchangeable byte-stream buffer backends.
//!
//! This crate provides a uniform abstraction for temporarily holding
//! in-flight bytes between one producer and one consumer. Every backend
//! implements the same [`Buffer`] contract, so callers can trade memory
//! pressure, durability, and capacity without changing their read/write
//! protocol:
//!
//! - [`MemoryBuffer`]: fixed capacity, one in-memory circular region
//! - [`FileBuffer`]: fixed capacity, circular region in a temp file that
//!   exists only while data is buffered
//! - [`PartitionBuffer`]: unbounded, a growing pool of fixed-size chunks
//!   allocated on demand and released as they drain
//! - [`MultiBuffer`]: a fixed chain of tiers filled and drained in order,
//!   e.g. memory first with overflow spilling to disk
//!
//! # Writing and reading
//!
//! Bytes come back in exactly the order they went in, across any
//! interleaving of writes and reads and across chunk and tier boundaries. A
//! bounded backend that runs out of room stores what fits and reports
//! [`BufferError::CapacityExceeded`]; a read on an empty buffer reports the
//! transient [`BufferError::Empty`], meaning "retry after the producer
//! writes more", not end of stream.
//!
//! ```
//! use streambuf::{Buffer, MemoryBuffer};
//!
//! let mut buf = MemoryBuffer::new(1024);
//! buf.write(b"hello world").unwrap();
//!
//! let mut out = [0u8; 1024];
//! let n = buf.read(&mut out).unwrap();
//! assert_eq!(&out[..n], b"hello world");
//! ```
//!
//! # Composing backends
//!
//! [`MultiBuffer`] chains any tiers behind one buffer, and
//! [`PartitionBuffer`] turns a chunk constructor into an unbounded pool:
//!
//! ```
//! use streambuf::{Buffer, PartitionBuffer, file_chunk};
//!
//! // Unbounded, spooled to disk in 64KB chunks.
//! let mut buf = PartitionBuffer::new(65536, file_chunk);
//! buf.write(&vec![0u8; 200_000]).unwrap();
//! assert_eq!(buf.len(), 200_000);
//! ```
//!
//! The [`bytes`] module bundles the common shapes, including the
//! memory-then-disk spill composition:
//!
//! ```
//! use streambuf::{Buffer, spill};
//!
//! let mut buf = spill(4096, 1 << 20);
//! buf.write(b"fits in the memory tier").unwrap();
//! ```
//!
//! # Concurrency
//!
//! Backends take `&mut self` and carry no locks: exclusive access is a
//! compile-time property, and a single thread can use any backend directly.
//! For a concurrent single producer plus single consumer, wrap a backend in
//! [`SharedBuffer`], which adds the locking and blocking reads as a separate
//! layer. Multiple concurrent writers or multiple concurrent readers are
//! not supported by any backend.

mod buffer;
mod bytes;
mod error;
mod file;
mod memory;
mod multi;
mod partition;
mod shared;

pub use buffer::{BoxedBuffer, Buffer, Capacity};
pub use bytes::*;
pub use error::BufferError;
pub use file::FileBuffer;
pub use memory::MemoryBuffer;
pub use multi::MultiBuffer;
pub use partition::{ChunkFactory, PartitionBuffer, file_chunk, memory_chunk};
pub use shared::SharedBuffer;
