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

//! Row separator resolution.
//!
//! Two historical conventions exist for configuring the separator: a numeric
//! byte code (`"10"`, `"44"`, `"-1"`) and a literal character (`"|"`, `","`).
//! Both are accepted. The numeric reading is always tried first, so `"1"`
//! resolves to byte `0x01` and not to the character `'1'`.

use crate::config::WriterProperties;
use crate::constants::{DEFAULT_ROW_SEPARATOR, LINE_DELIM_KEY, ROW_SEPARATOR_KEY};
use crate::error::{Result, WriterError};

/// Resolves the terminator byte from an optional configured value.
///
/// * A value that parses as a signed 8-bit integer yields that integer's
///   two's-complement byte (`"-1"` is `0xFF`).
/// * Any other non-empty value yields the first character's code point
///   truncated to a byte. Numbers outside `-128..=127` take this path, so
///   `"200"` resolves to `b'2'`.
/// * An absent value resolves to `\n`.
/// * An empty value is an error.
pub fn resolve_row_separator(value: Option<&str>) -> Result<u8> {
    let value = value.unwrap_or(DEFAULT_ROW_SEPARATOR);

    if let Ok(code) = value.parse::<i8>() {
        return Ok(code as u8);
    }

    match value.chars().next() {
        Some(c) => Ok(c as u32 as u8),
        None => Err(WriterError::InvalidRowSeparator(
            "row separator must not be empty".to_string(),
        )),
    }
}

/// Looks up the separator in table properties and resolves it.
///
/// [`ROW_SEPARATOR_KEY`] takes precedence over the legacy [`LINE_DELIM_KEY`].
pub fn row_separator_from_properties(properties: &WriterProperties) -> Result<u8> {
    let value = properties
        .get(ROW_SEPARATOR_KEY)
        .or_else(|| properties.get(LINE_DELIM_KEY));
    resolve_row_separator(value)
}
