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

use std::fmt;
use std::str::FromStr;

use crate::error::WriterError;

/// Codec applied to the byte stream when compression is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    None,
    Zstd,
}

impl CompressionType {
    /// Name used for this codec in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            CompressionType::None => "none",
            CompressionType::Zstd => "zstd",
        }
    }

    /// Whether this build can produce output with this codec.
    pub fn is_supported(&self) -> bool {
        match self {
            CompressionType::None => true,
            CompressionType::Zstd => cfg!(feature = "zstd"),
        }
    }
}

impl Default for CompressionType {
    fn default() -> Self {
        if cfg!(feature = "zstd") {
            CompressionType::Zstd
        } else {
            CompressionType::None
        }
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionType {
    type Err = WriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(CompressionType::None),
            "zstd" | "zst" => Ok(CompressionType::Zstd),
            other => Err(WriterError::InvalidConfiguration(format!(
                "unknown compression codec '{}'",
                other
            ))),
        }
    }
}
