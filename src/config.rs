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

//! Writer configuration.
//!
//! Two values configure a writer:
//!
//! - [`WriterProperties`]: the table-level string properties, such as the row
//!   separator.
//! - [`WriterContext`]: the environment the writer runs in, carrying the
//!   filesystem and codec settings. It is passed explicitly to every operation
//!   that needs it; nothing is read from process-wide state.

use std::collections::HashMap;

use crate::compression::CompressionType;
use crate::constants::{
    BUFFER_SIZE_KEY, COMPRESSION_CODEC_KEY, COMPRESSION_LEVEL_KEY, COMPRESSION_LEVEL_RANGE,
    DEFAULT_BUFFER_SIZE, DEFAULT_COMPRESSION_LEVEL, SYNC_ON_CLOSE_KEY,
};
use crate::error::{Result, WriterError};

/// String properties attached to the destination table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterProperties {
    values: HashMap<String, String>,
}

impl WriterProperties {
    /// Creates an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, returning the updated set.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a property, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the value of a property, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WriterProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Environment settings for sinks and compression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterContext {
    /// Codec used when a writer is created with compression requested.
    pub codec: CompressionType,

    /// Compression level for the codec (1-22 for zstd).
    pub compression_level: i32,

    /// Size of the raw sink's write buffer in bytes.
    ///
    /// [`crate::writer::RecordWriter::written_bytes`] can trail the bytes
    /// submitted by at most this amount until the writer is flushed.
    pub buffer_size: usize,

    /// Whether a committing close asks the OS to persist file data.
    pub sync_on_close: bool,
}

impl Default for WriterContext {
    fn default() -> Self {
        Self {
            codec: CompressionType::default(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            buffer_size: DEFAULT_BUFFER_SIZE,
            sync_on_close: true,
        }
    }
}

impl WriterContext {
    /// Set the codec used for compressed output
    pub fn with_codec(mut self, codec: CompressionType) -> Self {
        self.codec = codec;
        self
    }

    /// Set the compression level
    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    /// Set the raw sink buffer size
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Enable or disable syncing on a committing close
    pub fn with_sync_on_close(mut self, sync_on_close: bool) -> Self {
        self.sync_on_close = sync_on_close;
        self
    }

    /// Builds a context from job-style properties, starting from the defaults.
    ///
    /// Recognized keys are `compression.codec`, `compression.level`,
    /// `io.buffer.size` and `sync.on.close`. Unknown keys are ignored.
    pub fn from_properties(properties: &WriterProperties) -> Result<Self> {
        let mut context = Self::default();

        if let Some(codec) = properties.get(COMPRESSION_CODEC_KEY) {
            context.codec = codec.parse()?;
        }
        if let Some(level) = properties.get(COMPRESSION_LEVEL_KEY) {
            context.compression_level = parse_value(COMPRESSION_LEVEL_KEY, level)?;
        }
        if let Some(size) = properties.get(BUFFER_SIZE_KEY) {
            context.buffer_size = parse_value(BUFFER_SIZE_KEY, size)?;
        }
        if let Some(sync) = properties.get(SYNC_ON_CLOSE_KEY) {
            context.sync_on_close = parse_value(SYNC_ON_CLOSE_KEY, sync)?;
        }

        context.validate()?;
        Ok(context)
    }

    /// Checks that every setting is within its valid range.
    pub fn validate(&self) -> Result<()> {
        if self.codec != CompressionType::None
            && !COMPRESSION_LEVEL_RANGE.contains(&self.compression_level)
        {
            return Err(WriterError::InvalidConfiguration(format!(
                "compression level {} must be between {} and {}",
                self.compression_level,
                COMPRESSION_LEVEL_RANGE.start(),
                COMPRESSION_LEVEL_RANGE.end()
            )));
        }
        if self.buffer_size == 0 {
            return Err(WriterError::InvalidConfiguration(
                "buffer size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        WriterError::InvalidConfiguration(format!("invalid value '{}' for '{}'", value, key))
    })
}
