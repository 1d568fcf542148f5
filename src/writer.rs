// Copyright 2024
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Delimited record writer.
//!
//! This module writes records to a sink, each followed by a single
//! terminator byte. The output format is simply
//! `record_1 terminator record_2 terminator ... record_n terminator`,
//! optionally inside a compression envelope chosen by the context.

use std::io::Write;

use log::{debug, warn};

use crate::compression;
use crate::config::{WriterContext, WriterProperties};
use crate::error::{Result, WriterError};
use crate::separator::row_separator_from_properties;
use crate::sink::{Sink, SinkProvider};

/// Enum to represent the state of a RecordWriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriterState {
    /// The writer accepts records.
    Open,

    /// The writer has been closed and its sink released.
    Closed,
}

/// Writer for terminator-delimited records.
///
/// The writer owns its sink, which is either the raw destination or a
/// compressing decorator around it. Record contents are written verbatim; it
/// is up to the caller to make sure they do not contain the terminator.
///
/// Every writer must be closed exactly once with [`RecordWriter::close`]. A
/// writer dropped while still open is closed as an abort.
///
/// # Example
///
/// ```no_run
/// use delimited_writer::config::{WriterContext, WriterProperties};
/// use delimited_writer::sink::LocalFileSystem;
/// use delimited_writer::writer::RecordWriter;
///
/// let fs = LocalFileSystem::with_root("/tmp/table");
/// let context = WriterContext::default();
/// let properties = WriterProperties::new().with("row-separator", "|");
///
/// let mut writer = RecordWriter::create("part-00000", &context, &properties, false, &fs).unwrap();
/// writer.write_record(b"Record 1").unwrap();
/// writer.write_record(b"Record 2").unwrap();
///
/// // Commit
/// writer.close(false).unwrap();
/// ```
pub struct RecordWriter {
    /// The sink records are written through.
    sink: Box<dyn Sink>,

    /// Byte written after every record.
    row_separator: u8,

    /// Current state of the writer.
    state: WriterState,
}

impl RecordWriter {
    /// Creates a writer for a new destination.
    ///
    /// Configuration is checked before anything is created: an invalid context,
    /// an unresolvable row separator or an unsupported codec fail without
    /// touching the destination. The destination is then created through
    /// `provider` and wrapped in the context's codec when `compressed` is set.
    pub fn create(
        destination: &str,
        context: &WriterContext,
        properties: &WriterProperties,
        compressed: bool,
        provider: &dyn SinkProvider,
    ) -> Result<Self> {
        context.validate()?;
        let row_separator = row_separator_from_properties(properties)?;
        compression::ensure_supported(context, compressed)?;

        let raw = provider.create(destination, context)?;
        let sink = compression::wrap(context, raw, compressed)?;

        debug!(
            "Opened record writer for {} (separator: {:#04x}, compression: {})",
            destination,
            row_separator,
            if compressed { context.codec.name() } else { "none" }
        );

        Ok(Self::with_sink(sink, row_separator))
    }

    /// Creates a writer over a sink the caller already opened.
    pub fn with_sink(sink: Box<dyn Sink>, row_separator: u8) -> Self {
        Self {
            sink,
            row_separator,
            state: WriterState::Open,
        }
    }

    /// Writes a record followed by the row separator.
    ///
    /// An empty record produces just the separator. If this fails the position
    /// of the sink is unspecified; the writer should be closed with
    /// `abort = true`.
    pub fn write_record(&mut self, record: &[u8]) -> Result<()> {
        if self.state == WriterState::Closed {
            return Err(WriterError::WritingClosedFile);
        }

        self.sink.write_all(record)?;
        self.sink.write_all(&[self.row_separator])?;

        Ok(())
    }

    /// Returns the number of bytes the raw destination has received.
    ///
    /// Bytes still buffered in the sink or the compressor are not included, so
    /// this can trail what has been written until [`RecordWriter::flush`] or
    /// [`RecordWriter::close`]. It never decreases.
    pub fn written_bytes(&self) -> Result<u64> {
        if self.state == WriterState::Closed {
            return Err(WriterError::WriterClosed);
        }
        Ok(self.sink.current_offset())
    }

    /// Pushes buffered bytes through to the raw destination.
    pub fn flush(&mut self) -> Result<()> {
        if self.state == WriterState::Closed {
            return Err(WriterError::WriterClosed);
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Closes the writer and releases its sink.
    ///
    /// With `abort == false` all written bytes are flushed, the compression
    /// trailer is written and the destination is made durable if the context
    /// asks for it. With `abort == true` the sink is still flushed and released
    /// (a compressed file stays well formed) but the caller is expected to
    /// discard the destination; removing it is not this writer's job.
    ///
    /// The writer is marked closed before the sink is released, so a failing
    /// close is never retried. Calling this twice returns
    /// [`WriterError::AlreadyClosed`].
    pub fn close(&mut self, abort: bool) -> Result<()> {
        if self.state == WriterState::Closed {
            return Err(WriterError::AlreadyClosed);
        }
        self.state = WriterState::Closed;

        match self.sink.close(abort) {
            Ok(()) => {
                debug!(
                    "Closed record writer (abort: {}, bytes: {})",
                    abort,
                    self.sink.current_offset()
                );
                Ok(())
            }
            Err(e) => {
                if abort {
                    warn!("Error while aborting record writer: {}", e);
                }
                Err(e)
            }
        }
    }

    /// The terminator byte written after each record.
    pub fn row_separator(&self) -> u8 {
        self.row_separator
    }

    /// Whether the writer still accepts records.
    pub fn is_open(&self) -> bool {
        self.state == WriterState::Open
    }
}

impl Drop for RecordWriter {
    fn drop(&mut self) {
        // Release the sink if the caller never closed the writer.
        // We ignore errors since there's nothing we can do about them in drop
        if self.state == WriterState::Open {
            warn!("Record writer dropped without close; aborting");
            let _ = self.close(true);
        }
    }
}

// Methods for testing only
#[cfg(test)]
impl RecordWriter {
    /// Get the current writer state (testing only)
    pub(crate) fn get_state(&self) -> WriterState {
        self.state
    }
}
