//! Byte sinks and the providers that create them.
//!
//! A [`Sink`] is an append-only byte destination with an explicit close. A
//! [`SinkProvider`] creates sinks for destination identifiers. Two providers
//! are included: [`LocalFileSystem`] for files and [`MemoryFileSystem`] for
//! in-memory buffers.

mod file;
mod memory;
mod traits;

// Re-export the main types for easier access
pub use file::{FileSink, LocalFileSystem};
pub use memory::{MemoryFileSystem, MemorySink, SharedBuffer};
pub use traits::{Sink, SinkProvider};
