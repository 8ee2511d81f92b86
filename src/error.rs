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

use std::convert::Infallible;
use std::fmt;

/// The kind of an [`Error`].
///
/// Each kind owns a numeric code. Codes are negative when attached to an error; the magnitude
/// identifies the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The fallback kind when nothing more specific applies.
    #[default]
    Unknown,
    /// An argument could not be interpreted: an unknown level, a line without a timestamp, a
    /// malformed JSON document in strict mode, and so on.
    InvalidArgument,
}

impl ErrorKind {
    /// The symbolic name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Unknown => "ERR_UNKNOWN_ERROR",
            ErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
        }
    }

    /// The (negative) numeric code of the kind.
    pub fn code(&self) -> i32 {
        match self {
            ErrorKind::Unknown => -101,
            ErrorKind::InvalidArgument => -102,
        }
    }

    /// Look up a kind by its numeric code.
    ///
    /// Only the magnitude is considered, so both `102` and `-102` resolve to
    /// [`ErrorKind::InvalidArgument`]. Unrecognized codes resolve to [`ErrorKind::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// use logline::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::from_code(-102).name(), "ERR_INVALID_ARGUMENT");
    /// assert_eq!(ErrorKind::from_code(7), ErrorKind::Unknown);
    /// ```
    pub fn from_code(code: i32) -> ErrorKind {
        match code.unsigned_abs() {
            102 => ErrorKind::InvalidArgument,
            _ => ErrorKind::Unknown,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The error struct of logline.
pub struct Error {
    kind: ErrorKind,
    message: String,
    sources: Vec<anyhow::Error>,
    context: Vec<(&'static str, String)>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.sources.is_empty() {
            write!(f, ", sources: [")?;
            for (i, source) in self.sources.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{source}")?;
            }
            write!(f, "]")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("code", &self.code());
            de.field("message", &self.message);
            de.field("context", &self.context);
            de.field("sources", &self.sources);
            return de.finish();
        }

        write!(f, "[{}] {}", self.kind, self.message)?;
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }
        if !self.sources.is_empty() {
            writeln!(f)?;
            writeln!(f, "Sources:")?;
            for source in self.sources.iter() {
                writeln!(f, "   {source:#}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.sources.first().map(|v| v.as_ref())
    }
}

impl From<Infallible> for Error {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            sources: vec![],
            context: vec![],
        }
    }

    /// Shorthand for an [`ErrorKind::InvalidArgument`] error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Add one more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Add one more source in error.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        self.sources.push(src.into());
        self
    }

    /// Return the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the negative numeric code of this error.
    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    /// Return the symbolic name of this error's code, e.g. `ERR_INVALID_ARGUMENT`.
    pub fn code_name(&self) -> &'static str {
        ErrorKind::from_code(self.code()).name()
    }

    /// Return the message of this error, without context or sources.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Return the context pairs attached to this error.
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Return an iterator over all sources of this error.
    pub fn sources(&self) -> impl ExactSizeIterator<Item = &(dyn std::error::Error + 'static)> {
        self.sources.iter().map(|v| v.as_ref())
    }

    /// Default constructor for [`Error`] from [`serde_json::Error`].
    pub fn from_json_error(err: serde_json::Error) -> Error {
        Error::new(ErrorKind::Unknown, "failed to perform json").with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for kind in [ErrorKind::Unknown, ErrorKind::InvalidArgument] {
            assert!(kind.code() < 0);
            assert_eq!(ErrorKind::from_code(kind.code()), kind);
            assert_eq!(ErrorKind::from_code(-kind.code()), kind);
        }
        assert_eq!(ErrorKind::from_code(0), ErrorKind::Unknown);
        assert_eq!(ErrorKind::from_code(i32::MIN), ErrorKind::Unknown);
        assert_eq!(ErrorKind::default(), ErrorKind::Unknown);
    }

    #[test]
    fn test_display_with_context_and_source() {
        let err = Error::invalid_argument("no timestamp")
            .with_context("input", "hello")
            .with_source(anyhow::anyhow!("inner"));
        assert_eq!(err.code(), -102);
        assert_eq!(err.code_name(), "ERR_INVALID_ARGUMENT");
        assert_eq!(
            err.to_string(),
            "no timestamp, context: { input: hello }, sources: [inner]"
        );
        assert_eq!(err.sources().len(), 1);
        assert!(std::error::Error::source(&err).is_some());
        assert!(format!("{err:?}").starts_with("[ERR_INVALID_ARGUMENT] no timestamp\n"));
    }
}
