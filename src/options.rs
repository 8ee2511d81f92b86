// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Layouts and rendering options of a [`LogEntry`](crate::LogEntry).

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;

/// The layout of the body of a rendered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// The message as a JSON document.
    Json,
    /// The message in its default string form.
    ///
    /// An absent message is written as `null`, never as `undefined`.
    Raw,
    /// The message as-is.
    Text,
    /// The properties block alone.
    Properties,
    /// The message followed by the properties block.
    #[default]
    Slf,
}

impl Format {
    /// The lowercase name of the layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Raw => "raw",
            Format::Text => "text",
            Format::Properties => "properties",
            Format::Slf => "slf",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Format, Self::Err> {
        for format in [
            Format::Json,
            Format::Raw,
            Format::Text,
            Format::Properties,
            Format::Slf,
        ] {
            if s.eq_ignore_ascii_case(format.as_str()) {
                return Ok(format);
            }
        }

        Err(Error::invalid_argument(format!("malformed format: {s:?}")))
    }
}

/// How the timestamp of an entry is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// Milliseconds since the Unix epoch, e.g. `1704067200000`.
    Numeric,
    /// ISO 8601 with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
    Iso,
    /// RFC 1123, e.g. `Mon, 01 Jan 2024 00:00:00 GMT`.
    #[default]
    Utc,
}

impl TimestampFormat {
    /// The lowercase name of the timestamp format.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampFormat::Numeric => "numeric",
            TimestampFormat::Iso => "iso",
            TimestampFormat::Utc => "utc",
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TimestampFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<TimestampFormat, Self::Err> {
        for format in [
            TimestampFormat::Numeric,
            TimestampFormat::Iso,
            TimestampFormat::Utc,
        ] {
            if s.eq_ignore_ascii_case(format.as_str()) {
                return Ok(format);
            }
        }

        Err(Error::invalid_argument(format!(
            "malformed timestamp format: {s:?}"
        )))
    }
}

/// Options controlling how the timestamp and level of an entry are rendered.
///
/// The defaults write an RFC 1123 timestamp and the long level token in brackets:
///
/// ```text
/// Mon, 01 Jan 2024 00:00:00 GMT [INFO] hello []
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// How the timestamp is written.
    pub timestamp_format: TimestampFormat,
    /// Whether the three-letter level token is used.
    pub shorter_level: bool,
    /// Whether the level is wrapped in brackets.
    pub level_under_brackets: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::Utc,
            shorter_level: false,
            level_under_brackets: true,
        }
    }
}

impl RenderOptions {
    /// Overwrite the fields that the patch sets.
    pub fn merge(&mut self, patch: OptionsPatch) {
        if let Some(timestamp_format) = patch.timestamp_format {
            self.timestamp_format = timestamp_format;
        }
        if let Some(shorter_level) = patch.shorter_level {
            self.shorter_level = shorter_level;
        }
        if let Some(level_under_brackets) = patch.level_under_brackets {
            self.level_under_brackets = level_under_brackets;
        }
    }

    /// Return a copy with the patch applied.
    pub fn merged(mut self, patch: OptionsPatch) -> Self {
        self.merge(patch);
        self
    }
}

/// A partial update of [`RenderOptions`].
///
/// # Examples
///
/// ```
/// use logline::OptionsPatch;
/// use logline::RenderOptions;
/// use logline::TimestampFormat;
///
/// let options = RenderOptions::default().merged(OptionsPatch::new().shorter_level(true));
/// assert_eq!(options.timestamp_format, TimestampFormat::Utc);
/// assert!(options.shorter_level);
/// assert!(options.level_under_brackets);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsPatch {
    /// See [`RenderOptions::timestamp_format`].
    pub timestamp_format: Option<TimestampFormat>,
    /// See [`RenderOptions::shorter_level`].
    pub shorter_level: Option<bool>,
    /// See [`RenderOptions::level_under_brackets`].
    pub level_under_brackets: Option<bool>,
}

impl OptionsPatch {
    /// Create a patch that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`RenderOptions::timestamp_format`].
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    /// Set [`RenderOptions::shorter_level`].
    pub fn shorter_level(mut self, yes: bool) -> Self {
        self.shorter_level = Some(yes);
        self
    }

    /// Set [`RenderOptions::level_under_brackets`].
    pub fn level_under_brackets(mut self, yes: bool) -> Self {
        self.level_under_brackets = Some(yes);
        self
    }
}

impl From<RenderOptions> for OptionsPatch {
    fn from(options: RenderOptions) -> Self {
        Self {
            timestamp_format: Some(options.timestamp_format),
            shorter_level: Some(options.shorter_level),
            level_under_brackets: Some(options.level_under_brackets),
        }
    }
}
