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

//! JSON parsing and serialization that report failures as [`Error`]s.

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::Error;

/// The key under which [`parse_json`] wraps text that is not JSON.
pub const MESSAGE_KEY: &str = "$message";

/// Parse a JSON document.
pub fn parse_json_safe(text: &str) -> Result<Value, Error> {
    serde_json::from_str(text).map_err(Error::from_json_error)
}

/// Serialize a value as compact JSON.
pub fn stringify_json_safe<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(Error::from_json_error)
}

/// Parse a line rendered in the `json` layout, or any JSON document.
///
/// When the text is not valid JSON, a strict parse fails with
/// [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument), while a lenient parse
/// wraps the text as `{"$message": text}`.
///
/// # Examples
///
/// ```
/// use logline::parse_json;
/// use serde_json::json;
///
/// assert_eq!(parse_json(r#"{"a":1}"#, false).unwrap(), json!({"a": 1}));
/// assert_eq!(parse_json("not json", false).unwrap(), json!({"$message": "not json"}));
/// assert!(parse_json("not json", true).is_err());
/// ```
pub fn parse_json(text: &str, strict: bool) -> Result<Value, Error> {
    match parse_json_safe(text) {
        Ok(value) => Ok(value),
        Err(err) if strict => Err(Error::invalid_argument("malformed json entry")
            .with_context("entry", text)
            .with_source(err)),
        Err(err) => {
            log::trace!("wrapping non-json entry as {MESSAGE_KEY}: {err}");
            let mut wrapper = Map::new();
            wrapper.insert(MESSAGE_KEY.to_owned(), Value::String(text.to_owned()));
            Ok(Value::Object(wrapper))
        }
    }
}
