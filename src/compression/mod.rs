//! Compression filter factory.
//!
//! [`wrap`] turns a raw sink into the sink a writer writes through: the raw
//! sink itself when compression is off, or a compressing decorator around it.
//! Callers treat both the same way.

pub(crate) mod core;

#[cfg(feature = "zstd")]
pub(crate) mod zstd;

#[cfg(feature = "zstd")]
use log::debug;

pub use self::core::CompressionType;
#[cfg(feature = "zstd")]
pub use self::zstd::ZstdSink;

use crate::config::WriterContext;
use crate::error::{Result, WriterError};
use crate::sink::Sink;

/// Fails when `enabled` is set and the context's codec was not compiled in.
///
/// Writers call this before opening a sink so that an unusable codec never
/// leaves a created destination behind.
pub fn ensure_supported(context: &WriterContext, enabled: bool) -> Result<()> {
    if enabled && !context.codec.is_supported() {
        return Err(WriterError::UnsupportedCompressionType(
            context.codec.name().to_string(),
        ));
    }
    Ok(())
}

/// Wraps `sink` in the context's codec when `enabled` is set.
///
/// Returns `sink` unchanged when compression is not enabled or the codec is
/// [`CompressionType::None`].
pub fn wrap(context: &WriterContext, sink: Box<dyn Sink>, enabled: bool) -> Result<Box<dyn Sink>> {
    if !enabled {
        return Ok(sink);
    }

    match context.codec {
        CompressionType::None => Ok(sink),
        #[cfg(feature = "zstd")]
        CompressionType::Zstd => {
            debug!(
                "Wrapping sink in zstd compression (level {})",
                context.compression_level
            );
            Ok(Box::new(ZstdSink::with_level(sink, context.compression_level)?))
        }
        #[cfg(not(feature = "zstd"))]
        codec => Err(WriterError::UnsupportedCompressionType(codec.name().to_string())),
    }
}
