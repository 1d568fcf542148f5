//! Zstd compression filter.
//!
//! [`ZstdSink`] wraps a raw [`Sink`] in a streaming zstd encoder. Bytes written
//! to it are compressed into a single zstd frame; closing it writes the frame
//! epilogue and then closes the raw sink.

use std::io::{self, Write};

use log::warn;
use zstd::stream::write::Encoder;

use crate::constants::COMPRESSION_LEVEL_RANGE;
use crate::error::{Result, WriterError};
use crate::sink::Sink;

/// A compressing decorator around a raw sink.
///
/// The reported offset is the raw sink's, so it only moves once the encoder
/// has emitted compressed bytes and the raw sink has flushed them.
pub struct ZstdSink {
    /// Encoder over the raw sink. `None` once closed.
    encoder: Option<Encoder<'static, Box<dyn Sink>>>,
    /// Offset of the raw sink when it was closed.
    final_offset: u64,
}

impl ZstdSink {
    /// Create a new ZstdSink with specified compression level
    ///
    /// # Arguments
    /// * `sink` - The raw sink receiving compressed bytes
    /// * `level` - Compression level (1-22). Higher values provide better compression but are slower.
    pub fn with_level(sink: Box<dyn Sink>, level: i32) -> Result<Self> {
        if !COMPRESSION_LEVEL_RANGE.contains(&level) {
            return Err(WriterError::InvalidConfiguration(format!(
                "Invalid zstd compression level: {}. Must be between 1 and 22.",
                level
            )));
        }

        let encoder = Encoder::new(sink, level)?;
        Ok(Self {
            encoder: Some(encoder),
            final_offset: 0,
        })
    }

    fn encoder_mut(&mut self) -> io::Result<&mut Encoder<'static, Box<dyn Sink>>> {
        self.encoder
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "zstd sink is closed"))
    }
}

impl Write for ZstdSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.encoder_mut()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.encoder_mut()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder_mut()?.flush()
    }
}

impl Sink for ZstdSink {
    fn current_offset(&self) -> u64 {
        match &self.encoder {
            Some(encoder) => encoder.get_ref().current_offset(),
            None => self.final_offset,
        }
    }

    /// Writes the frame epilogue and closes the raw sink.
    ///
    /// The epilogue is written on abort too, so an aborted file is still a
    /// well-formed frame. The raw sink is closed even when the epilogue fails;
    /// the first error is returned.
    fn close(&mut self, abort: bool) -> Result<()> {
        let Some(encoder) = self.encoder.take() else {
            return Ok(());
        };

        match encoder.try_finish() {
            Ok(mut raw) => {
                let closed = raw.close(abort);
                self.final_offset = raw.current_offset();
                closed
            }
            Err((mut encoder, e)) => {
                warn!("Failed to finish zstd frame (abort: {}): {}", abort, e);
                let raw = encoder.get_mut();
                if let Err(close_err) = raw.close(abort) {
                    warn!("Failed to close raw sink after zstd error: {}", close_err);
                }
                self.final_offset = raw.current_offset();
                Err(e.into())
            }
        }
    }
}
