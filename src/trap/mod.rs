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

//! Traps for errors the caller chose not to handle inline.

use std::fmt;

use crate::Error;

mod default;

pub use self::default::DefaultTrap;

/// A trap receives errors the caller chose not to handle inline, for example a line passed to
/// [`extract_level`](crate::extract_level) that carries no level. See [`catch`].
///
/// The host process decides what escalation means: print, count, abort.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Receive an error.
    fn trap(&self, err: &Error);
}

impl<T: Trap> From<T> for Box<dyn Trap> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Unwrap `result`, handing an error to `trap` instead of returning it.
///
/// # Examples
///
/// ```
/// use logline::trap::DefaultTrap;
/// use logline::trap::catch;
///
/// let trap = DefaultTrap::default();
/// assert!(catch(&trap, logline::extract_level("[INFO] up")).is_some());
/// // written to standard error as `[ERR_INVALID_ARGUMENT] ...`
/// assert!(catch(&trap, logline::extract_level("no level here")).is_none());
/// ```
pub fn catch<T>(trap: &dyn Trap, result: Result<T, Error>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            trap.trap(&err);
            None
        }
    }
}
