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

//! Severity levels and their textual aliases.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::entry::EntryRef;

/// The canonical severities of a log record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Designates useful information.
    Info,
    /// Designates hazardous situations.
    Warning,
    /// Designates errors.
    Error,
    /// Designates plain log output with no particular severity.
    Log,
    /// Designates very low priority, often extremely verbose, information.
    Trace,
    /// Designates lower priority information.
    Debug,
    /// Designates a successfully completed operation.
    Success,
    /// Designates errors the process cannot recover from.
    Fatal,
}

/// Every recognized alias and the level it denotes.
///
/// Longer tokens come before their prefixes (`ERROR` before `ERR`, `WARNING` before `WARN`) so
/// that scanning consumes a whole token.
const ALIASES: &[(&str, Level)] = &[
    ("WARNING", Level::Warning),
    ("SUCCESS", Level::Success),
    ("ERROR", Level::Error),
    ("DEBUG", Level::Debug),
    ("TRACE", Level::Trace),
    ("FATAL", Level::Fatal),
    ("INFO", Level::Info),
    ("WARN", Level::Warning),
    ("ERR", Level::Error),
    ("DBG", Level::Debug),
    ("INF", Level::Info),
    ("WRN", Level::Warning),
    ("LOG", Level::Log),
    ("FTL", Level::Fatal),
    ("TRC", Level::Trace),
    ("SCC", Level::Success),
];

impl Level {
    /// All canonical levels.
    pub const ALL: [Level; 8] = [
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Log,
        Level::Trace,
        Level::Debug,
        Level::Success,
        Level::Fatal,
    ];

    /// Return the long token of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn name(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Log => "LOG",
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Success => "SUCCESS",
            Level::Fatal => "FATAL",
        }
    }

    /// Return the three-letter token of the `Level`.
    pub fn short_name(&self) -> &'static str {
        match self {
            Level::Info => "INF",
            Level::Warning => "WRN",
            Level::Error => "ERR",
            Level::Log => "LOG",
            Level::Trace => "TRC",
            Level::Debug => "DBG",
            Level::Success => "SCC",
            Level::Fatal => "FTL",
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Parse exactly one alias token, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for (name, level) in ALIASES {
            if s.eq_ignore_ascii_case(name) {
                return Ok(*level);
            }
        }

        Err(Error::invalid_argument(format!("unknown level descriptor: {s:?}")))
    }
}

impl TryFrom<&str> for Level {
    type Error = Error;

    fn try_from(s: &str) -> Result<Level, Error> {
        s.parse()
    }
}

/// Iterate over every recognized alias token, in uppercase, with the level it denotes.
///
/// Matching is case-insensitive, so the lowercase spelling of each token is recognized too.
pub fn aliases() -> impl Iterator<Item = (&'static str, Level)> {
    ALIASES.iter().copied()
}

/// The alternation of all alias tokens, for embedding in larger patterns.
pub(crate) fn alias_alternation() -> String {
    ALIASES
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join("|")
}

fn level_regex() -> &'static Regex {
    static LEVEL_REGEX: OnceLock<Regex> = OnceLock::new();
    LEVEL_REGEX.get_or_init(|| {
        let pattern = format!(r"(?i)\[?({})\]?", alias_alternation());
        Regex::new(&pattern).expect("level alias pattern is valid")
    })
}

/// Render a level as its long token, or as its three-letter token when `short` is set.
///
/// Besides [`Level`] itself, any raw level descriptor is accepted; a descriptor that denotes no
/// canonical level fails with [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument).
///
/// # Examples
///
/// ```
/// use logline::Level;
/// use logline::stringify_level;
///
/// assert_eq!(stringify_level(Level::Warning, false).unwrap(), "WARNING");
/// assert_eq!(stringify_level(Level::Warning, true).unwrap(), "WRN");
/// assert_eq!(stringify_level("info", true).unwrap(), "INF");
/// assert!(stringify_level("verbose", false).is_err());
/// ```
pub fn stringify_level<L>(level: L, short: bool) -> Result<&'static str, Error>
where
    L: TryInto<Level>,
    Error: From<L::Error>,
{
    let level = level.try_into()?;
    Ok(if short {
        level.short_name()
    } else {
        level.name()
    })
}

/// Find the level of a record, or of the first alias token occurring in a line.
///
/// Text is scanned case-insensitively and without word boundaries: the first position where any
/// alias (optionally bracketed) starts wins.
///
/// # Examples
///
/// ```
/// use logline::Level;
/// use logline::extract_level;
///
/// let level = extract_level("2024-01-01T00:00:00.000Z [WRN] disk almost full").unwrap();
/// assert_eq!(level, Level::Warning);
/// ```
pub fn extract_level<'a>(entry: impl Into<EntryRef<'a>>) -> Result<Level, Error> {
    let text = match entry.into() {
        EntryRef::Record(entry) => return Ok(entry.level()),
        EntryRef::Text(text) => text,
    };

    let token = level_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| {
            Error::invalid_argument("this entry does not appear to have a level")
                .with_context("entry", text)
        })?;

    token.as_str().parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_long_tokens() {
        let cases = [
            (Level::Info, "INFO", "INF"),
            (Level::Warning, "WARNING", "WRN"),
            (Level::Error, "ERROR", "ERR"),
            (Level::Log, "LOG", "LOG"),
            (Level::Trace, "TRACE", "TRC"),
            (Level::Debug, "DEBUG", "DBG"),
            (Level::Success, "SUCCESS", "SCC"),
            (Level::Fatal, "FATAL", "FTL"),
        ];
        for (level, long, short) in cases {
            assert_eq!(stringify_level(level, false).unwrap(), long);
            assert_eq!(stringify_level(level, true).unwrap(), short);
            assert_eq!(level.to_string(), long);
        }
    }

    #[test]
    fn test_extract_round_trips_every_level() {
        for level in Level::ALL {
            for short in [false, true] {
                let token = stringify_level(level, short).unwrap();
                assert_eq!(extract_level(token).unwrap(), level, "{token}");
                assert_eq!(
                    extract_level(format!("[{token}]").as_str()).unwrap(),
                    level
                );
                let lower = token.to_lowercase();
                assert_eq!(extract_level(lower.as_str()).unwrap(), level);
            }
        }
    }

    #[test]
    fn test_extract_level_scans_whole_line() {
        assert_eq!(
            extract_level("Mon, 01 Jan 2024 00:00:00 GMT [SCC] deployed").unwrap(),
            Level::Success
        );
        assert_eq!(extract_level("1704067200000 warn low memory").unwrap(), Level::Warning);
        // substring matching, no word boundaries
        assert_eq!(extract_level("catalog updated").unwrap(), Level::Log);
    }

    #[test]
    fn test_extract_level_without_token() {
        let err = extract_level("nothing to see here").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_unknown_descriptor() {
        let err = stringify_level("VERBOSE", false).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        assert_eq!(err.code(), -102);
        assert!("".parse::<Level>().is_err());
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
    }

    #[test]
    fn test_try_from_str() {
        assert_eq!(Level::try_from("ftl").unwrap(), Level::Fatal);
        assert_eq!(Level::try_from("Success").unwrap(), Level::Success);
        let err = Level::try_from("WARNINGS").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_aliases_cover_every_level() {
        for level in Level::ALL {
            assert!(aliases().any(|(name, l)| l == level && name == level.name()));
            assert!(aliases().any(|(name, l)| l == level && name == level.short_name()));
        }
        assert_eq!(aliases().count(), 16);
    }
}
