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

use std::sync::OnceLock;

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use regex::Captures;
use regex::Regex;

use crate::Error;
use crate::entry::EntryRef;
use crate::level;

// ISO 8601 | RFC 1123 | epoch milliseconds
const TIMESTAMP_PATTERN: &str = concat!(
    r"(?P<iso>[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?Z)",
    r"|(?P<rfc>[0-9A-Za-z_]{3}, [0-9]{2} [0-9A-Za-z_]{3} [0-9]{4} [0-9]{2}:[0-9]{2}:[0-9]{2} GMT)",
    r"|(?P<num>[0-9]{10,})",
);

fn timestamp_regex() -> &'static Regex {
    static TIMESTAMP_REGEX: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP_REGEX.get_or_init(|| {
        Regex::new(&format!("(?i){TIMESTAMP_PATTERN}")).expect("timestamp pattern is valid")
    })
}

fn prefix_regex() -> &'static Regex {
    static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    PREFIX_REGEX.get_or_init(|| {
        let pattern = format!(
            r"(?i)^(?:{TIMESTAMP_PATTERN})\s*\[?(?:{})\]?\s*",
            level::alias_alternation()
        );
        Regex::new(&pattern).expect("timestamp prefix pattern is valid")
    })
}

/// Find the timestamp of a record, or the first timestamp occurring in a line.
///
/// Three encodings are recognized, whichever starts first:
///
/// * ISO 8601 in UTC, e.g. `2024-01-01T00:00:00.000Z`;
/// * RFC 1123, e.g. `Mon, 01 Jan 2024 00:00:00 GMT`;
/// * a run of at least ten digits, read as milliseconds since the Unix epoch.
///
/// # Examples
///
/// ```
/// use logline::extract_timestamp;
///
/// let ts = extract_timestamp("2024-01-01T00:00:00Z [INFO] hi").unwrap();
/// assert_eq!(ts.to_string(), "2024-01-01T00:00:00Z");
/// ```
pub fn extract_timestamp<'a>(entry: impl Into<EntryRef<'a>>) -> Result<Timestamp, Error> {
    let text = match entry.into() {
        EntryRef::Record(entry) => return Ok(entry.timestamp()),
        EntryRef::Text(text) => text,
    };

    let caps = timestamp_regex().captures(text).ok_or_else(|| {
        Error::invalid_argument("this entry does not appear to have a timestamp")
            .with_context("entry", text)
    })?;

    to_timestamp(&caps).map_err(|err| {
        log::debug!("recognized timestamp token cannot be converted: {err}");
        err
    })
}

fn to_timestamp(caps: &Captures) -> Result<Timestamp, Error> {
    if let Some(m) = caps.name("iso") {
        return parse_iso(m.as_str()).map_err(|err| invalid_token(m.as_str(), err));
    }

    if let Some(m) = caps.name("rfc") {
        return parse_rfc1123(m.as_str()).map_err(|err| invalid_token(m.as_str(), err));
    }

    // the combined pattern has exactly three alternatives
    let m = caps.name("num").expect("one alternative always matches");
    let millis = m.as_str().parse::<i64>().map_err(|err| invalid_token(m.as_str(), err))?;
    Timestamp::from_millisecond(millis).map_err(|err| invalid_token(m.as_str(), err))
}

// jiff reads at most nine fractional digits, finer ones are dropped
fn parse_iso(token: &str) -> Result<Timestamp, jiff::Error> {
    // jiff wants the designators in upper case
    let mut token = token.to_ascii_uppercase();
    if let Some(dot) = token.find('.') {
        // the token always ends with `Z`
        let end = token.len() - 1;
        if end - dot - 1 > 9 {
            token.replace_range(dot + 10..end, "");
        }
    }
    token.parse()
}

// the weekday is not checked against the date
fn parse_rfc1123(token: &str) -> Result<Timestamp, jiff::Error> {
    let date = token.split_once(", ").map_or(token, |(_, date)| date);
    let date = date.rsplit_once(' ').map_or(date, |(date, _gmt)| date);
    let datetime = DateTime::strptime("%d %b %Y %H:%M:%S", date)?;
    Ok(datetime.to_zoned(TimeZone::UTC)?.timestamp())
}

fn invalid_token(token: &str, err: impl Into<anyhow::Error>) -> Error {
    Error::invalid_argument("malformed timestamp")
        .with_context("token", token)
        .with_source(err)
}

/// Strip one leading `<timestamp> [<level>]` prefix from a line and trim the rest.
///
/// The level may appear with or without brackets, and the prefix must start at the very
/// beginning of the line. Only the first prefix is removed; a line without a level after its
/// timestamp is only trimmed.
///
/// # Examples
///
/// ```
/// use logline::normalize_text_entry;
///
/// let line = "Mon, 01 Jan 2024 00:00:00 GMT [INFO] service started ";
/// assert_eq!(normalize_text_entry(line), "service started");
/// ```
pub fn normalize_text_entry(text: &str) -> String {
    prefix_regex().replace(text, "").trim().to_owned()
}

/// Recover the message of a line rendered in the `text` or `raw` layout.
///
/// This is [`normalize_text_entry`] under the name the other `parse_*` functions share.
pub fn parse_text(text: &str) -> String {
    normalize_text_entry(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_extract_iso() {
        let ts = extract_timestamp("2024-01-01T00:00:00Z [INFO] hi").unwrap();
        assert_eq!(ts, "2024-01-01T00:00:00Z".parse::<Timestamp>().unwrap());

        let ts = extract_timestamp("at 2024-05-06T07:08:09.123Z something").unwrap();
        assert_eq!(ts.as_millisecond() % 1000, 123);

        let ts = extract_timestamp("2024-01-01t00:00:00z lower case").unwrap();
        assert_eq!(ts.as_second(), 1704067200);
    }

    #[test]
    fn test_extract_rfc1123() {
        let ts = extract_timestamp("Mon, 01 Jan 2024 00:00:00 GMT [ERR] boom").unwrap();
        assert_eq!(ts.as_second(), 1704067200);
    }

    #[test]
    fn test_extract_fine_fractions() {
        let ts = extract_timestamp("2024-01-01T00:00:00.1234567891Z x").unwrap();
        assert_eq!(ts.subsec_nanosecond(), 123_456_789);

        let ts = extract_timestamp("2024-01-01T00:00:00.123456789Z x").unwrap();
        assert_eq!(ts.subsec_nanosecond(), 123_456_789);
    }

    #[test]
    fn test_extract_rfc1123_ignores_weekday() {
        // 2024-01-01 is a Monday
        let ts = extract_timestamp("Tue, 01 Jan 2024 00:00:00 GMT [INFO] x").unwrap();
        assert_eq!(ts.as_second(), 1704067200);

        let ts = extract_timestamp("Xyz, 05 Mar 2024 06:07:08 GMT").unwrap();
        assert_eq!(ts.as_second(), 1709618828);

        // an impossible date still fails
        let err = extract_timestamp("Mon, 31 Feb 2024 00:00:00 GMT").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_extract_numeric() {
        let ts = extract_timestamp("1704067200123 [LOG] numeric").unwrap();
        assert_eq!(ts.as_millisecond(), 1704067200123);

        // nine digits are not a timestamp
        let err = extract_timestamp("123456789 [LOG] short").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let ts = extract_timestamp("x 1704067200000 then 2030-01-01T00:00:00Z").unwrap();
        assert_eq!(ts.as_millisecond(), 1704067200000);
    }

    #[test]
    fn test_extract_failures() {
        let err = extract_timestamp("no time here").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        // matches the shape but is not a date
        let err = extract_timestamp("2024-13-45T99:00:00Z").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.context()[0].0, "token");

        // overflows i64
        let err = extract_timestamp("99999999999999999999999").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_normalize_strips_one_prefix() {
        let cases = [
            ("2024-01-01T00:00:00.000Z [INFO] hello", "hello"),
            ("2024-01-01T00:00:00Z INFO hello", "hello"),
            ("Mon, 01 Jan 2024 00:00:00 GMT [WRN]   spaced  ", "spaced"),
            ("1704067200000 [dbg] lower", "lower"),
            ("1704067200000[ERROR]tight", "tight"),
            ("1704067200000 LOG login failed", "login failed"),
            ("  hello  ", "hello"),
            // the prefix is matched before trimming
            ("  1704067200000 INFO x", "1704067200000 INFO x"),
            // no level after the timestamp: nothing stripped
            ("1704067200000 hello", "1704067200000 hello"),
            // not anchored at the start
            ("hello 1704067200000 [INFO]", "hello 1704067200000 [INFO]"),
            (
                "1704067200000 [INFO] 1704067200000 [INFO] twice",
                "1704067200000 [INFO] twice",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_text_entry(input), expected, "{input}");
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let cases = [
            "2024-01-01T00:00:00.000Z [INFO] hello",
            "Mon, 01 Jan 2024 00:00:00 GMT SCC done [a=1]",
            "plain message",
            "",
            "   ",
            "[INFO] no timestamp",
            "1704067200000 hello",
        ];
        for input in cases {
            let once = normalize_text_entry(input);
            assert_eq!(normalize_text_entry(&once), once, "{input}");
            assert_eq!(parse_text(input), once);
        }
    }
}
