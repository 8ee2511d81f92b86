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

//! Log entry and its rendering.

use jiff::Timestamp;

use crate::Error;
use crate::Format;
use crate::Level;
use crate::OptionsPatch;
use crate::RenderOptions;
use crate::TimestampFormat;
use crate::grammar::format_properties;
use crate::grammar::format_slf;
use crate::json::stringify_json_safe;
use crate::kv::Properties;

/// One log event: a timestamp, a level, a message and properties, plus the options used to
/// render it as a line.
///
/// The timestamp is taken when the entry is built and never changes afterwards.
///
/// # Examples
///
/// ```
/// use logline::Format;
/// use logline::Level;
/// use logline::LogEntry;
/// use logline::OptionsPatch;
/// use logline::TimestampFormat;
/// use logline::kv::Properties;
///
/// let mut entry = LogEntry::builder()
///     .level(Level::Info)
///     .message("user logged in")
///     .properties(Properties::new().with("user", "alice").unwrap())
///     .timestamp("2024-01-01T00:00:00Z".parse().unwrap())
///     .build();
///
/// assert_eq!(
///     entry.render().unwrap(),
///     r#"Mon, 01 Jan 2024 00:00:00 GMT [INFO] user logged in [user="alice"]"#
/// );
///
/// entry
///     .options(OptionsPatch::new().timestamp_format(TimestampFormat::Numeric))
///     .set_format(Format::Text);
/// assert_eq!(entry.render().unwrap(), "1704067200000 [INFO] user logged in");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    format: Format,
    level: Level,
    message: Option<String>,
    properties: Properties,
    options: RenderOptions,
    timestamp: Timestamp,
}

impl Default for LogEntry {
    fn default() -> Self {
        LogEntry::builder().build()
    }
}

/// The body of an entry as seen through its current format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    /// The message, for every format except [`Format::Properties`].
    Text(Option<&'a str>),
    /// The properties, for [`Format::Properties`].
    Properties(&'a Properties),
}

impl LogEntry {
    /// Returns a new builder.
    pub fn builder() -> LogEntryBuilder {
        LogEntryBuilder::default()
    }

    /// The layout of the rendered body.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Replace the layout of the rendered body.
    pub fn set_format(&mut self, format: Format) -> &mut Self {
        self.format = format;
        self
    }

    /// The severity level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Replace the severity level.
    pub fn set_level(&mut self, level: Level) -> &mut Self {
        self.level = level;
        self
    }

    /// Merge a patch over the current rendering options.
    pub fn options(&mut self, patch: OptionsPatch) -> &mut Self {
        self.options.merge(patch);
        self
    }

    /// The current rendering options.
    pub fn render_options(&self) -> &RenderOptions {
        &self.options
    }

    /// The body of the entry: its properties under [`Format::Properties`], its message
    /// otherwise.
    pub fn message(&self) -> Payload<'_> {
        match self.format {
            Format::Properties => Payload::Properties(&self.properties),
            _ => Payload::Text(self.message.as_deref()),
        }
    }

    /// The properties of the entry.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The instant the entry was created at.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The instant the entry was created at, in milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.as_millisecond()
    }

    /// The instant the entry was created at, written in the given format.
    pub fn format_timestamp(&self, format: TimestampFormat) -> String {
        let ts = self.timestamp;
        match format {
            TimestampFormat::Numeric => ts.as_millisecond().to_string(),
            TimestampFormat::Iso => {
                let millis = ts.as_millisecond().rem_euclid(1000);
                format!("{}.{millis:03}Z", ts.strftime("%Y-%m-%dT%H:%M:%S"))
            }
            TimestampFormat::Utc => ts.strftime("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        }
    }

    /// Render the entry as one line: `<timestamp> <level> <body>`.
    ///
    /// Fails only when the body cannot be serialized in the [`Format::Json`] layout.
    pub fn render(&self) -> Result<String, Error> {
        let options = &self.options;
        let mut text = self.format_timestamp(options.timestamp_format);
        text.push(' ');

        let level = if options.shorter_level {
            self.level.short_name()
        } else {
            self.level.name()
        };
        if options.level_under_brackets {
            text.push('[');
            text.push_str(level);
            text.push(']');
        } else {
            text.push_str(level);
        }
        text.push(' ');

        match self.format {
            Format::Text => text.push_str(self.message.as_deref().unwrap_or_default()),
            Format::Raw => text.push_str(self.message.as_deref().unwrap_or("null")),
            Format::Properties => text.push_str(&format_properties(&self.properties)),
            Format::Slf => text.push_str(&format_slf(
                self.message.as_deref().unwrap_or_default(),
                Some(&self.properties),
            )),
            Format::Json => text.push_str(&stringify_json_safe(&self.message)?),
        }

        Ok(text)
    }
}

/// Builder for [`LogEntry`].
#[derive(Debug)]
pub struct LogEntryBuilder {
    entry: LogEntry,
}

impl Default for LogEntryBuilder {
    fn default() -> Self {
        LogEntryBuilder {
            entry: LogEntry {
                format: Format::default(),
                level: Level::Log,
                message: None,
                properties: Properties::new(),
                options: RenderOptions::default(),
                timestamp: Timestamp::now(),
            },
        }
    }
}

impl LogEntryBuilder {
    /// Set [`format`](LogEntry::format).
    pub fn format(mut self, format: Format) -> Self {
        self.entry.format = format;
        self
    }

    /// Set [`level`](LogEntry::level).
    pub fn level(mut self, level: Level) -> Self {
        self.entry.level = level;
        self
    }

    /// Set the message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.entry.message = Some(message.into());
        self
    }

    /// Set [`properties`](LogEntry::properties).
    pub fn properties(mut self, properties: Properties) -> Self {
        self.entry.properties = properties;
        self
    }

    /// Merge a patch over the default rendering options.
    pub fn options(mut self, patch: OptionsPatch) -> Self {
        self.entry.options.merge(patch);
        self
    }

    /// Pin the [`timestamp`](LogEntry::timestamp) instead of using the current instant.
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.entry.timestamp = timestamp;
        self
    }

    /// Invoke the builder and return a `LogEntry`.
    pub fn build(self) -> LogEntry {
        self.entry
    }
}

/// Either a [`LogEntry`] or a rendered line, as accepted by
/// [`extract_level`](crate::extract_level) and [`extract_timestamp`](crate::extract_timestamp).
#[derive(Debug, Clone, Copy)]
pub enum EntryRef<'a> {
    /// A structured entry; its fields are read directly.
    Record(&'a LogEntry),
    /// A rendered line; it is scanned.
    Text(&'a str),
}

impl<'a> From<&'a LogEntry> for EntryRef<'a> {
    fn from(entry: &'a LogEntry) -> Self {
        EntryRef::Record(entry)
    }
}

impl<'a> From<&'a str> for EntryRef<'a> {
    fn from(text: &'a str) -> Self {
        EntryRef::Text(text)
    }
}

impl<'a> From<&'a String> for EntryRef<'a> {
    fn from(text: &'a String) -> Self {
        EntryRef::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_level;
    use crate::extract_timestamp;

    fn new_year() -> Timestamp {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_defaults() {
        let before = Timestamp::now();
        let entry = LogEntry::default();
        let after = Timestamp::now();

        assert_eq!(entry.format(), Format::Slf);
        assert_eq!(entry.level(), Level::Log);
        assert_eq!(entry.message(), Payload::Text(None));
        assert!(entry.properties().is_empty());
        assert_eq!(*entry.render_options(), RenderOptions::default());
        assert!(before <= entry.timestamp() && entry.timestamp() <= after);
    }

    #[test]
    fn test_format_timestamp() {
        let entry = LogEntry::builder()
            .timestamp("2024-03-05T06:07:08.9Z".parse().unwrap())
            .build();
        assert_eq!(entry.timestamp_millis(), 1709618828900);
        assert_eq!(entry.format_timestamp(TimestampFormat::Numeric), "1709618828900");
        assert_eq!(
            entry.format_timestamp(TimestampFormat::Iso),
            "2024-03-05T06:07:08.900Z"
        );
        assert_eq!(
            entry.format_timestamp(TimestampFormat::Utc),
            "Tue, 05 Mar 2024 06:07:08 GMT"
        );
    }

    #[test]
    fn test_format_timestamp_before_epoch() {
        let entry = LogEntry::builder()
            .timestamp(Timestamp::from_millisecond(-1).unwrap())
            .build();
        assert_eq!(
            entry.format_timestamp(TimestampFormat::Iso),
            "1969-12-31T23:59:59.999Z"
        );
    }

    #[test]
    fn test_setters_replace_in_place() {
        let mut entry = LogEntry::builder().timestamp(new_year()).build();
        entry.set_level(Level::Fatal).set_format(Format::Text);
        assert_eq!(entry.level(), Level::Fatal);
        assert_eq!(entry.format(), Format::Text);
        assert_eq!(entry.timestamp(), new_year());
    }

    #[test]
    fn test_message_follows_format() {
        let props = Properties::new().with("k", "v").unwrap();
        let mut entry = LogEntry::builder()
            .message("m")
            .properties(props.clone())
            .build();
        assert_eq!(entry.message(), Payload::Text(Some("m")));
        entry.set_format(Format::Properties);
        assert_eq!(entry.message(), Payload::Properties(&props));
    }

    #[test]
    fn test_render_bodies() {
        let props = Properties::new()
            .with("a", 1)
            .and_then(|p| p.with("b", "x"))
            .unwrap();
        let mut entry = LogEntry::builder()
            .level(Level::Info)
            .message(" hello ")
            .properties(props)
            .options(OptionsPatch::new().timestamp_format(TimestampFormat::Numeric))
            .timestamp(new_year())
            .build();

        let cases = [
            (Format::Text, "1704067200000 [INFO]  hello "),
            (Format::Raw, "1704067200000 [INFO]  hello "),
            (Format::Properties, r#"1704067200000 [INFO] [a=1 b="x"]"#),
            (Format::Slf, r#"1704067200000 [INFO] hello [a=1 b="x"]"#),
            (Format::Json, r#"1704067200000 [INFO] " hello ""#),
        ];
        for (format, expected) in cases {
            entry.set_format(format);
            assert_eq!(entry.render().unwrap(), expected, "{format}");
        }
    }

    #[test]
    fn test_render_without_message() {
        let mut entry = LogEntry::builder()
            .options(OptionsPatch::new().timestamp_format(TimestampFormat::Numeric))
            .timestamp(new_year())
            .build();

        let cases = [
            (Format::Text, "1704067200000 [LOG] "),
            (Format::Raw, "1704067200000 [LOG] null"),
            (Format::Properties, "1704067200000 [LOG] []"),
            (Format::Slf, "1704067200000 [LOG]  []"),
            (Format::Json, "1704067200000 [LOG] null"),
        ];
        for (format, expected) in cases {
            entry.set_format(format);
            assert_eq!(entry.render().unwrap(), expected, "{format}");
        }
    }

    #[test]
    fn test_render_level_options() {
        let mut entry = LogEntry::builder()
            .level(Level::Warning)
            .format(Format::Text)
            .message("careful")
            .timestamp(new_year())
            .build();

        entry.options(OptionsPatch::new().timestamp_format(TimestampFormat::Iso));
        assert_eq!(
            entry.render().unwrap(),
            "2024-01-01T00:00:00.000Z [WARNING] careful"
        );

        entry.options(OptionsPatch::new().shorter_level(true));
        assert_eq!(entry.render().unwrap(), "2024-01-01T00:00:00.000Z [WRN] careful");

        entry.options(OptionsPatch::new().level_under_brackets(false));
        assert_eq!(entry.render().unwrap(), "2024-01-01T00:00:00.000Z WRN careful");
    }

    #[test]
    fn test_extract_from_record() {
        let entry = LogEntry::builder()
            .level(Level::Debug)
            .timestamp(new_year())
            .build();
        assert_eq!(extract_level(&entry).unwrap(), Level::Debug);
        assert_eq!(extract_timestamp(&entry).unwrap(), new_year());

        let line = entry.render().unwrap();
        assert_eq!(extract_level(&line).unwrap(), Level::Debug);
        assert_eq!(extract_timestamp(&line).unwrap(), new_year());
    }
}
