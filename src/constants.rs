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

//! Configuration keys and defaults used by the delimited writer.

/// Property holding the row separator, either a numeric byte code or a literal character.
pub const ROW_SEPARATOR_KEY: &str = "row-separator";

/// Legacy table property for the row separator, consulted when
/// [`ROW_SEPARATOR_KEY`] is absent.
pub const LINE_DELIM_KEY: &str = "line.delim";

/// Row separator used when none is configured.
pub const DEFAULT_ROW_SEPARATOR: &str = "\n";

/// Context property selecting the compression codec (`none` or `zstd`).
pub const COMPRESSION_CODEC_KEY: &str = "compression.codec";

/// Context property holding the compression level.
pub const COMPRESSION_LEVEL_KEY: &str = "compression.level";

/// Context property holding the raw sink buffer size in bytes.
pub const BUFFER_SIZE_KEY: &str = "io.buffer.size";

/// Context property controlling whether committed files are synced to disk.
pub const SYNC_ON_CLOSE_KEY: &str = "sync.on.close";

/// Default zstd compression level.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Valid range of zstd compression levels.
pub const COMPRESSION_LEVEL_RANGE: std::ops::RangeInclusive<i32> = 1..=22;

/// Default size of the raw sink write buffer (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 1 << 16;
