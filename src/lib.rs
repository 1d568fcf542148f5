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

//! A writer for terminator-delimited record files.
//!
//! Records are opaque byte sequences. Each one is written verbatim followed by
//! a single terminator byte, resolved from the table's `row-separator`
//! property. The byte stream can be routed through a compression filter, and
//! the writer reports how many bytes have reached the destination so callers
//! can decide when to roll over to a new file.

pub mod compression;
pub mod config;
pub mod constants;
pub mod error;
pub mod separator;
pub mod sink;
pub mod writer;


// Re-exports for a cleaner API
pub use config::{WriterContext, WriterProperties};
pub use error::{Result, WriterError};
pub use writer::RecordWriter;
