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

use crate::grammar::format_properties;
use crate::grammar::normalize_text_entry;
use crate::grammar::parse_properties;
use crate::kv::Properties;
use crate::kv::Value;

/// A line in the structured line format, split into its message and properties.
#[derive(Debug, Clone, PartialEq)]
pub struct SlfRecord {
    /// The trimmed free-text part.
    pub message: String,
    /// The properties parsed from the trailing block, as they appeared.
    pub properties: Properties,
}

impl SlfRecord {
    /// Merge the message into the properties under the `message` key.
    ///
    /// A parsed `message` property is overwritten in place; otherwise the key is appended.
    pub fn into_properties(self) -> Properties {
        let mut props = self.properties;
        props.insert_unchecked("message".to_owned(), Value::String(self.message));
        props
    }
}

/// Render a message followed by its properties block.
///
/// Absent properties and empty properties differ: `None` writes no block at all (the separator
/// space is still written), while an empty collection writes `[]`.
///
/// # Examples
///
/// ```
/// use logline::format_slf;
/// use logline::kv::Properties;
///
/// let props = Properties::new().with("a", 1).unwrap();
/// assert_eq!(format_slf(" hello ", Some(&props)), "hello [a=1]");
/// assert_eq!(format_slf("hello", Some(&Properties::new())), "hello []");
/// assert_eq!(format_slf("hello", None), "hello ");
/// ```
pub fn format_slf(message: &str, props: Option<&Properties>) -> String {
    let properties = props.map(format_properties).unwrap_or_default();
    format!("{} {properties}", message.trim())
}

/// Split a structured line into its message and properties.
///
/// A leading `<timestamp> [<level>]` prefix is dropped first. The properties block starts at
/// the first `[` of the line, provided the line ends with `]`. Brackets are not balanced, so a
/// message containing `[` is cut at that bracket whenever the line ends with `]`.
///
/// # Examples
///
/// ```
/// use logline::kv::Value;
/// use logline::parse_slf;
///
/// let record = parse_slf(r#"2024-01-01T00:00:00.000Z [INFO] hello [a=1 b="x"]"#);
/// assert_eq!(record.message, "hello");
/// assert_eq!(record.properties.get("a"), Some(&Value::from(1)));
/// assert_eq!(record.properties.get("b"), Some(&Value::from("x")));
/// ```
pub fn parse_slf(text: &str) -> SlfRecord {
    let line = normalize_text_entry(text);

    let split = if line.ends_with(']') {
        line.find('[').unwrap_or(line.len())
    } else {
        line.len()
    };
    let (message, block) = line.split_at(split);

    let properties = if block.is_empty() {
        log::trace!("structured line carries no properties block");
        Properties::new()
    } else {
        parse_properties(block)
    };

    SlfRecord {
        message: message.trim().to_owned(),
        properties,
    }
}
