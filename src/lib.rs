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

//! Logline renders structured log records as single text lines and parses such lines back into
//! their parts.
//!
//! # Overview
//!
//! A [`LogEntry`] holds a timestamp, a [`Level`], a message and [`Properties`](kv::Properties).
//! It renders as `<timestamp> <level> <body>`, where the body follows one of five [`Format`]s:
//!
//! ```text
//! Mon, 01 Jan 2024 00:00:00 GMT [INFO] user logged in [user="alice" attempt=1]   slf
//! 2024-01-01T00:00:00.000Z [INF] user logged in                                  text, raw
//! 1704067200000 INFO [user="alice" attempt=1]                                    properties
//! Mon, 01 Jan 2024 00:00:00 GMT [INFO] "user logged in"                          json
//! ```
//!
//! The parse functions work on plain strings and need no entry: [`extract_timestamp`],
//! [`extract_level`], [`parse_text`], [`parse_properties`], [`parse_slf`] and [`parse_json`].
//!
//! # Examples
//!
//! ```
//! use logline::Level;
//! use logline::LogEntry;
//! use logline::kv::Properties;
//! use logline::kv::Value;
//!
//! let entry = LogEntry::builder()
//!     .level(Level::Success)
//!     .message("deployed")
//!     .properties(Properties::new().with("version", "1.2.0").unwrap())
//!     .build();
//! let line = entry.render().unwrap();
//!
//! assert_eq!(logline::extract_level(line.as_str()).unwrap(), Level::Success);
//! assert_eq!(
//!     logline::extract_timestamp(line.as_str()).unwrap().as_second(),
//!     entry.timestamp().as_second()
//! );
//!
//! let record = logline::parse_slf(&line);
//! assert_eq!(record.message, "deployed");
//! assert_eq!(record.properties.get("version"), Some(&Value::from("1.2.0")));
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod grammar;
pub mod json;
pub mod kv;
pub mod level;
pub mod trap;

mod entry;
mod error;
mod options;

pub use entry::EntryRef;
pub use entry::LogEntry;
pub use entry::LogEntryBuilder;
pub use entry::Payload;
pub use error::Error;
pub use error::ErrorKind;
pub use grammar::SlfRecord;
pub use grammar::extract_timestamp;
pub use grammar::format_properties;
pub use grammar::format_slf;
pub use grammar::normalize_text_entry;
pub use grammar::parse_properties;
pub use grammar::parse_slf;
pub use grammar::parse_text;
pub use json::parse_json;
pub use level::Level;
pub use level::extract_level;
pub use level::stringify_level;
pub use options::Format;
pub use options::OptionsPatch;
pub use options::RenderOptions;
pub use options::TimestampFormat;
