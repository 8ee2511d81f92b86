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

use std::fmt::Write;
use std::sync::OnceLock;

use regex::Regex;

use crate::grammar::normalize_text_entry;
use crate::kv::Properties;
use crate::kv::Value;

fn pair_regex() -> &'static Regex {
    static PAIR_REGEX: OnceLock<Regex> = OnceLock::new();
    PAIR_REGEX.get_or_init(|| {
        Regex::new(r#"([0-9A-Za-z_]+)=(".*?"|'.*?'|\S+)"#).expect("pair pattern is valid")
    })
}

fn decimal_regex() -> &'static Regex {
    static DECIMAL_REGEX: OnceLock<Regex> = OnceLock::new();
    DECIMAL_REGEX.get_or_init(|| {
        Regex::new(r"^[-+]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:e[-+]?[0-9]+)?$")
            .expect("decimal pattern is valid")
    })
}

fn hex_regex() -> &'static Regex {
    static HEX_REGEX: OnceLock<Regex> = OnceLock::new();
    HEX_REGEX.get_or_init(|| Regex::new(r"(?i)^0x[0-9a-f]+$").expect("hex pattern is valid"))
}

/// Render properties as a bracketed, space separated `key=value` list.
///
/// Strings are wrapped in double quotes. Quotes inside a string are written as-is, so such a
/// value will not survive [`parse_properties`].
///
/// # Examples
///
/// ```
/// use logline::format_properties;
/// use logline::kv::Properties;
/// use logline::kv::Value;
///
/// let props = Properties::from_pairs([
///     ("user", Value::from("alice")),
///     ("attempt", Value::from(3)),
///     ("admin", Value::from(false)),
///     ("session", Value::Null),
/// ])
/// .unwrap();
///
/// assert_eq!(
///     format_properties(&props),
///     r#"[user="alice" attempt=3 admin=false session=null]"#
/// );
/// ```
pub fn format_properties(props: &Properties) -> String {
    let mut text = String::from("[");
    for (i, (key, value)) in props.iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        // SAFETY: write to a string always succeeds
        match value {
            Value::String(s) => write!(&mut text, "{key}=\"{s}\"").unwrap(),
            value => write!(&mut text, "{key}={value}").unwrap(),
        }
    }
    text.push(']');
    text
}

/// Parse a bracketed `key=value` list back into properties.
///
/// A leading `<timestamp> [<level>]` prefix is dropped first. Input that is not wrapped in
/// brackets yields no properties. Values may be double-quoted, single-quoted or bare; bare and
/// quoted values alike are then read as numbers, booleans or `null` when they look like one.
///
/// # Examples
///
/// ```
/// use logline::kv::Value;
/// use logline::parse_properties;
///
/// let props = parse_properties(r#"[host='db 1' port=0x1F ok=TRUE note="n/a"]"#);
/// assert_eq!(props.get("host"), Some(&Value::from("db 1")));
/// assert_eq!(props.get("port"), Some(&Value::from(31)));
/// assert_eq!(props.get("ok"), Some(&Value::from(true)));
/// assert_eq!(props.get("note"), Some(&Value::from("n/a")));
/// ```
pub fn parse_properties(text: &str) -> Properties {
    let text = normalize_text_entry(text);
    let mut props = Properties::new();

    let Some(inner) = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return props;
    };

    for caps in pair_regex().captures_iter(inner.trim()) {
        let key = caps[1].to_owned();
        let value = coerce(strip_quotes(&caps[2]));
        props.insert_unchecked(key, value);
    }

    props
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.starts_with(quote) && value.ends_with(quote) {
            // a lone quote character is both the opening and the closing one
            return value.get(1..value.len() - 1).unwrap_or_default();
        }
    }
    value
}

fn coerce(value: &str) -> Value {
    if let Some(n) = parse_number(value) {
        Value::Number(n)
    } else if value.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if value.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else if value.eq_ignore_ascii_case("null") {
        Value::Null
    } else {
        Value::String(value.to_owned())
    }
}

fn parse_number(value: &str) -> Option<f64> {
    if hex_regex().is_match(value) {
        let digits = value[2..].chars().filter_map(|c| c.to_digit(16));
        return Some(digits.fold(0.0, |acc, d| acc * 16.0 + f64::from(d)));
    }

    if decimal_regex().is_match(value) {
        return value.parse().ok();
    }

    None
}
