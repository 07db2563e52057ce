// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! # Chrome Tracing
//!
//! A small append-only recorder for the Chrome Trace Event Format, the JSON
//! representation understood by `chrome://tracing` and Perfetto.
//!
//! The recorder keeps an ordered list of events and only ever appends to it:
//! - **Metadata events** (M): process and thread names
//! - **Duration events** (B/E): the begin and end of a span
//!
//! Reading the recorder out produces either the full JSON array
//! ([`ChromeTracing::json`]) or the array body framed with a caller supplied
//! prefix and suffix ([`ChromeTracing::traces`]). The latter lets several
//! independently built recorders be concatenated into one trace without
//! re-parsing, see [`FragmentWriter`].
//!
//! ## Capabilities
//!
//! Time and serialization are injected through [`RecorderOptions`]. By
//! default timestamps are wall clock microseconds since the UNIX epoch and
//! events are encoded as compact JSON.
//!
//! ```
//! use chrome_tracing::{clock, ChromeTracing, RecorderOptions, TraceOptions};
//!
//! let options = RecorderOptions::builder()
//!     .time_source(clock::fixed(42))
//!     .build();
//! let mut trace = ChromeTracing::with_options(options);
//! trace.begin_event("load").finish_event("load");
//!
//! assert_eq!(
//!     trace.json().unwrap(),
//!     r#"[{"name":"load","ts":42,"ph":"B","args":{}},{"name":"load","ts":42,"ph":"E","args":{}}]"#
//! );
//! assert_eq!(
//!     trace.traces(&TraceOptions::builder().prefix("[").suffix("]").build()).unwrap(),
//!     trace.json().unwrap()
//! );
//! ```

use thiserror::Error;

pub mod clock;
pub mod event;
pub mod recorder;
pub mod stitch;

pub use event::{Args, Phase, TraceEvent};
pub use recorder::{ChromeTracing, RecorderOptions, Stringify, TimeSource, TraceOptions};
pub use stitch::FragmentWriter;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("stringify failed: {0}")]
    Stringify(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TraceError>;

/// Drops the first and the last character of `text`.
///
/// This is the framing used by [`ChromeTracing::traces`] to turn a serialized
/// array into its comma-separated body. The input is not inspected: whatever
/// the two outer characters are, they go. Inputs shorter than two characters
/// become empty.
pub fn strip_array_brackets(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
