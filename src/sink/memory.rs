use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;

use crate::config::WriterContext;
use crate::error::{Result, WriterError};
use crate::sink::traits::{Sink, SinkProvider};

/// Shared storage behind a [`MemorySink`].
pub type SharedBuffer = Arc<Mutex<Vec<u8>>>;

/// An in-memory sink that can be used for testing.
///
/// Writes are staged in a local buffer of `buffer_size` bytes and moved to the
/// shared storage when the buffer fills up, on flush and on close. The
/// reported offset is the length of the shared storage, mirroring how
/// [`super::FileSink`] reports bytes handed to the OS.
pub struct MemorySink {
    storage: SharedBuffer,
    pending: Vec<u8>,
    buffer_size: usize,
    closed: bool,
}

impl MemorySink {
    /// Creates a sink with fresh storage.
    pub fn new(buffer_size: usize) -> Self {
        Self::with_storage(Arc::new(Mutex::new(Vec::new())), buffer_size)
    }

    fn with_storage(storage: SharedBuffer, buffer_size: usize) -> Self {
        Self {
            storage,
            pending: Vec::with_capacity(buffer_size),
            buffer_size: buffer_size.max(1),
            closed: false,
        }
    }

    /// Handle to the storage this sink writes to.
    pub fn buffer(&self) -> SharedBuffer {
        Arc::clone(&self.storage)
    }

    fn drain_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);
        storage.extend_from_slice(&self.pending);
        self.pending.clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::Other, "memory sink is closed"));
        }
        self.pending.extend_from_slice(buf);
        if self.pending.len() >= self.buffer_size {
            self.drain_pending();
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::Other, "memory sink is closed"));
        }
        self.drain_pending();
        Ok(())
    }
}

impl Sink for MemorySink {
    fn current_offset(&self) -> u64 {
        self.storage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len() as u64
    }

    fn close(&mut self, _abort: bool) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.drain_pending();
        self.closed = true;
        Ok(())
    }
}

/// A provider keeping every created destination in memory.
///
/// Useful for tests and dry runs: contents stay inspectable after the writer
/// that produced them is closed.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<String, SharedBuffer>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored at `destination` so far, if it was created.
    pub fn contents(&self, destination: &str) -> Option<Bytes> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        let storage = files.get(destination)?;
        let bytes = storage.lock().unwrap_or_else(PoisonError::into_inner);
        Some(Bytes::copy_from_slice(&bytes))
    }

    /// All created destinations, sorted.
    pub fn destinations(&self) -> Vec<String> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = files.keys().cloned().collect();
        names.sort();
        names
    }

    /// Removes a destination, returning whether it existed.
    pub fn delete(&self, destination: &str) -> bool {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(destination)
            .is_some()
    }
}

impl SinkProvider for MemoryFileSystem {
    fn create(&self, destination: &str, context: &WriterContext) -> Result<Box<dyn Sink>> {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        if files.contains_key(destination) {
            return Err(WriterError::SinkCreation {
                destination: destination.to_string(),
                source: io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
            });
        }

        let storage: SharedBuffer = Arc::new(Mutex::new(Vec::new()));
        files.insert(destination.to_string(), Arc::clone(&storage));
        Ok(Box::new(MemorySink::with_storage(storage, context.buffer_size)))
    }
}
