//! Guarded wrapper for concurrent producer/consumer use.

use std::sync::{Arc, Condvar, Mutex};

use crate::buffer::{Buffer, Capacity};
use crate::error::BufferError;

/// A thread-safe handle sharing one buffer between a producer and a
/// consumer.
///
/// The core backends carry no locks; this wrapper is the additive layer that
/// supplies them. Cloning shares the underlying buffer via `Arc`, so one
/// clone can live on a writer thread and another on a reader thread.
///
/// # Semantics
///
/// - **Read**: blocks while the buffer is empty and the write side is open;
///   returns `Ok(0)` once the write side is closed and all data is drained
/// - **Write**: delegates to the wrapped backend, fails with
///   [`BufferError::Closed`] after `close_write()`
/// - **Close**: `close_write()` prevents new writes but allows draining
///
/// # Example
///
/// ```
/// use streambuf::{MemoryBuffer, SharedBuffer};
/// use std::thread;
///
/// let buf = SharedBuffer::new(MemoryBuffer::new(64));
/// let writer = buf.clone();
///
/// let producer = thread::spawn(move || {
///     writer.write(b"hello").unwrap();
///     writer.close_write().unwrap();
/// });
///
/// let mut out = [0u8; 64];
/// let mut collected = Vec::new();
/// loop {
///     let n = buf.read(&mut out).unwrap();
///     if n == 0 {
///         break;
///     }
///     collected.extend_from_slice(&out[..n]);
/// }
///
/// producer.join().unwrap();
/// assert_eq!(collected, b"hello");
/// ```
pub struct SharedBuffer<B> {
    inner: Arc<SharedInner<B>>,
}

struct SharedInner<B> {
    state: Mutex<SharedState<B>>,
    write_notify: Condvar,
}

struct SharedState<B> {
    buf: B,
    close_write: bool,
}

impl<B> Clone for SharedBuffer<B> {
    fn clone(&self) -> Self {
        SharedBuffer {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: Buffer> SharedBuffer<B> {
    /// Wraps a backend in a shared, guarded handle.
    pub fn new(buf: B) -> Self {
        SharedBuffer {
            inner: Arc::new(SharedInner {
                state: Mutex::new(SharedState {
                    buf,
                    close_write: false,
                }),
                write_notify: Condvar::new(),
            }),
        }
    }

    /// Returns the number of bytes currently buffered.
    pub fn len(&self) -> usize {
        let state = self.inner.state.lock().unwrap();
        state.buf.len()
    }

    /// Returns true if no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the wrapped backend's capacity.
    pub fn capacity(&self) -> Capacity {
        let state = self.inner.state.lock().unwrap();
        state.buf.capacity()
    }

    /// Writes data through to the wrapped backend.
    ///
    /// Wakes blocked readers for every byte accepted, including the prefix
    /// accepted by an overflowing bounded backend.
    pub fn write(&self, data: &[u8]) -> Result<usize, BufferError> {
        if data.is_empty() {
            return Ok(0);
        }
        let mut state = self.inner.state.lock().unwrap();
        if state.close_write {
            return Err(BufferError::Closed);
        }
        match state.buf.write(data) {
            Ok(n) => {
                if n > 0 {
                    self.inner.write_notify.notify_one();
                }
                Ok(n)
            }
            Err(err) => {
                if matches!(err, BufferError::CapacityExceeded { accepted, .. } if accepted > 0) {
                    self.inner.write_notify.notify_one();
                }
                Err(err)
            }
        }
    }

    /// Reads from the wrapped backend, blocking while it is empty.
    ///
    /// Returns `Ok(0)` when the write side is closed and the buffer is
    /// drained.
    pub fn read(&self, dest: &mut [u8]) -> Result<usize, BufferError> {
        if dest.is_empty() {
            return Ok(0);
        }
        let mut state = self.inner.state.lock().unwrap();
        loop {
            match state.buf.read(dest) {
                Err(BufferError::Empty) => {
                    if state.close_write {
                        return Ok(0);
                    }
                    state = self.inner.write_notify.wait(state).unwrap();
                }
                result => return result,
            }
        }
    }

    /// Non-blocking read: the transient [`BufferError::Empty`] passes
    /// through instead of waiting.
    pub fn try_read(&self, dest: &mut [u8]) -> Result<usize, BufferError> {
        let mut state = self.inner.state.lock().unwrap();
        state.buf.read(dest)
    }

    /// Closes the write side.
    ///
    /// This prevents new writes but allows existing data to be read. Once
    /// the buffer is empty, `read()` returns `Ok(0)`.
    pub fn close_write(&self) -> Result<(), BufferError> {
        let mut state = self.inner.state.lock().unwrap();
        if state.close_write {
            return Ok(());
        }
        state.close_write = true;
        self.inner.write_notify.notify_all();
        Ok(())
    }
}
