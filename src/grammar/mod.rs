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

//! Grammars for reading and writing rendered log lines.
//!
//! Each grammar is a set of pure functions over strings:
//!
//! * timestamps: [`extract_timestamp`] recognizes them, [`normalize_text_entry`] strips the
//!   `<timestamp> [<level>]` prefix a render puts in front of a message;
//! * properties: [`format_properties`] and [`parse_properties`] for the bracketed `key=value`
//!   block;
//! * structured lines: [`format_slf`] and [`parse_slf`] for a message followed by a properties
//!   block.

pub use properties::format_properties;
pub use properties::parse_properties;
pub use slf::SlfRecord;
pub use slf::format_slf;
pub use slf::parse_slf;
pub use timestamp::extract_timestamp;
pub use timestamp::normalize_text_entry;
pub use timestamp::parse_text;

mod properties;
mod slf;
mod timestamp;
