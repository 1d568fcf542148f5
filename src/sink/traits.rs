use std::io::Write;

use crate::config::WriterContext;
use crate::error::Result;

/// An append-only byte destination with a flush/close lifecycle.
///
/// Writes go through [`Write`]. Implementations may buffer; the offset they
/// report counts only bytes that have left the buffer.
pub trait Sink: Write + Send {
    /// Number of bytes handed on to the underlying storage so far.
    fn current_offset(&self) -> u64;

    /// Flushes buffered bytes and releases the destination.
    ///
    /// With `abort == false` the sink also makes the data durable when it is
    /// configured to. With `abort == true` the caller is about to discard the
    /// destination, so no durability work is done. Closing an already closed
    /// sink does nothing.
    fn close(&mut self, abort: bool) -> Result<()>;
}

/// Creates sinks for destination identifiers.
///
/// A provider must create the destination. It never truncates or appends to
/// an existing one; an existing destination is a creation failure.
pub trait SinkProvider {
    /// Create a new sink at `destination`.
    fn create(&self, destination: &str, context: &WriterContext) -> Result<Box<dyn Sink>>;
}
