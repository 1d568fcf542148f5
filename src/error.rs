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

//! Error types for delimited record writing.

use std::io;
use thiserror::Error;

/// The main error type for writer operations.
#[derive(Debug, Error)]
pub enum WriterError {
    /// An I/O error occurred while writing, flushing or closing a sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The row separator could not be resolved from its configured value.
    #[error("Invalid row separator: {0}")]
    InvalidRowSeparator(String),

    /// A configuration value other than the row separator is malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The requested compression codec was not compiled in.
    #[error("Compression type is not supported by this build: {0}")]
    UnsupportedCompressionType(String),

    /// The destination sink could not be created.
    #[error("Failed to create sink '{destination}': {source}")]
    SinkCreation {
        destination: String,
        #[source]
        source: io::Error,
    },

    /// Attempted to write to a closed writer.
    #[error("Writing a closed file")]
    WritingClosedFile,

    /// Attempted to query or flush a closed writer.
    #[error("Writer is closed")]
    WriterClosed,

    /// `close` was called on a writer that was already closed.
    #[error("Writer has already been closed")]
    AlreadyClosed,
}

/// A specialized Result type for writer operations.
pub type Result<T> = std::result::Result<T, WriterError>;
