//! Error types for buffer operations.

use std::io;

use thiserror::Error;

/// Buffer operation error.
///
/// Every backend reports failures through this enum. [`Empty`] is transient
/// rather than terminal: it means nothing is buffered at this instant, and a
/// read should be retried after the producer writes more. All other variants
/// are surfaced to the caller immediately, with no internal retry.
///
/// [`Empty`]: BufferError::Empty
#[derive(Error, Debug)]
pub enum BufferError {
    /// A write did not fit in the remaining room of a bounded buffer.
    ///
    /// Exactly `accepted` bytes of the request were stored; nothing beyond
    /// that prefix was. The caller can drain the buffer and retry the
    /// remaining `requested - accepted` bytes.
    #[error("buffer: capacity exceeded, accepted {accepted} of {requested} bytes")]
    CapacityExceeded { accepted: usize, requested: usize },

    /// Nothing is buffered right now. Retry after a later write.
    #[error("buffer: empty")]
    Empty,

    /// An operation against a backing store failed.
    #[error("buffer: storage error: {0}")]
    Storage(#[from] io::Error),

    /// A chunk factory failed while growing a partition pool.
    ///
    /// `accepted` counts the bytes of the failed write that were stored in
    /// previously allocated chunks; those chunks and their contents are
    /// intact.
    #[error("buffer: chunk factory failed after {accepted} bytes: {message}")]
    Factory { accepted: usize, message: String },

    /// The write side has been closed.
    #[error("buffer: closed")]
    Closed,
}
