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

use std::fmt;
use std::sync::Arc;

use bon::Builder;
use tracing::{debug, trace};

use crate::event::{name_args, Args, Phase, TraceEvent, PROCESS_NAME, THREAD_NAME};
use crate::{clock, strip_array_brackets, Result};

/// Zero-argument capability returning the current timestamp.
pub type TimeSource = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Capability turning the recorded events into JSON text.
///
/// The recorder expects array output; [`ChromeTracing::traces`] trims the
/// first and last character of whatever this returns.
pub type Stringify = Arc<dyn Fn(&[TraceEvent]) -> serde_json::Result<String> + Send + Sync>;

fn compact_json(events: &[TraceEvent]) -> serde_json::Result<String> {
    serde_json::to_string(events)
}

/// Capabilities injected into a [`ChromeTracing`] recorder.
///
/// Every field is optional; a missing one falls back to the system default
/// (wall clock microseconds, compact JSON).
#[derive(Clone, Default, Builder)]
pub struct RecorderOptions {
    time_source: Option<TimeSource>,
    stringify: Option<Stringify>,
}

/// Framing applied around the array body returned by [`ChromeTracing::traces`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct TraceOptions {
    /// Text placed before the body.
    #[builder(default, into)]
    pub prefix: String,
    /// Text placed after the body.
    #[builder(default, into)]
    pub suffix: String,
}

/// Append-only recorder of Chrome trace events.
///
/// Mutators return `&mut Self` so calls can be chained:
///
/// ```
/// # use chrome_tracing::ChromeTracing;
/// let mut trace = ChromeTracing::new();
/// trace
///     .start_process("1", "app")
///     .start_thread("1", "main")
///     .begin_event("work")
///     .finish_event("work");
/// assert_eq!(trace.len(), 4);
/// ```
///
/// Begin and end events are not stamped with the current process or thread;
/// only [`start_process`](Self::start_process) and
/// [`start_thread`](Self::start_thread) set lanes.
pub struct ChromeTracing {
    time_source: TimeSource,
    stringify: Stringify,
    process_id: Option<String>,
    thread_id: Option<String>,
    events: Vec<TraceEvent>,
}

impl Default for ChromeTracing {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChromeTracing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromeTracing")
            .field("process_id", &self.process_id)
            .field("thread_id", &self.thread_id)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl ChromeTracing {
    /// Creates an empty recorder with the system clock and compact JSON.
    pub fn new() -> Self {
        Self::with_options(RecorderOptions::default())
    }

    pub fn with_options(options: RecorderOptions) -> Self {
        let custom_clock = options.time_source.is_some();
        let custom_stringify = options.stringify.is_some();
        debug!(custom_clock, custom_stringify, "chrome tracing recorder created");
        Self {
            time_source: options.time_source.unwrap_or_else(clock::system),
            stringify: options
                .stringify
                .unwrap_or_else(|| Arc::new(compact_json)),
            process_id: None,
            thread_id: None,
            events: Vec::new(),
        }
    }

    /// Names the process lane `id` and makes it the current process.
    ///
    /// The metadata event carries `id` as its `pid` and whatever thread is
    /// current at this moment as its `tid`.
    pub fn start_process(&mut self, id: impl Into<String>, name: impl Into<String>) -> &mut Self {
        let id = id.into();
        let tid = self.thread_id.clone();
        self.push(PROCESS_NAME, Some(id.clone()), tid, Phase::Metadata, name_args(name.into()));
        self.process_id = Some(id);
        self
    }

    /// Names the thread lane `id` and makes it the current thread.
    ///
    /// The metadata event carries the current process as its `pid`.
    pub fn start_thread(&mut self, id: impl Into<String>, name: impl Into<String>) -> &mut Self {
        let id = id.into();
        let pid = self.process_id.clone();
        self.push(THREAD_NAME, pid, Some(id.clone()), Phase::Metadata, name_args(name.into()));
        self.thread_id = Some(id);
        self
    }

    /// Opens a span named `name` with an empty payload.
    pub fn begin_event(&mut self, name: impl Into<String>) -> &mut Self {
        self.begin_event_with_args(name, Args::new())
    }

    pub fn begin_event_with_args(&mut self, name: impl Into<String>, args: Args) -> &mut Self {
        self.push(name, None, None, Phase::DurationBegin, args);
        self
    }

    /// Closes a span named `name` with an empty payload.
    ///
    /// Nothing checks that a matching [`begin_event`](Self::begin_event) was
    /// recorded.
    pub fn finish_event(&mut self, name: impl Into<String>) -> &mut Self {
        self.finish_event_with_args(name, Args::new())
    }

    pub fn finish_event_with_args(&mut self, name: impl Into<String>, args: Args) -> &mut Self {
        self.push(name, None, None, Phase::DurationEnd, args);
        self
    }

    fn push(
        &mut self,
        name: impl Into<String>,
        pid: Option<String>,
        tid: Option<String>,
        ph: Phase,
        args: Args,
    ) {
        let ts = (self.time_source)();
        self.events.push(TraceEvent {
            name: name.into(),
            pid,
            tid,
            ts,
            ph,
            args,
        });
    }

    /// Serializes every recorded event, in append order, with the stringify
    /// capability.
    pub fn json(&self) -> Result<String> {
        trace!(events = self.events.len(), "serializing chrome trace");
        Ok((self.stringify)(self.events.as_slice())?)
    }

    /// Returns the body of [`json`](Self::json) framed by `options`.
    ///
    /// The body is the serialized text minus its first and last character,
    /// so an empty recorder yields just `prefix + suffix`.
    pub fn traces(&self, options: &TraceOptions) -> Result<String> {
        let json = self.json()?;
        let body = strip_array_brackets(&json);
        let mut out = String::with_capacity(options.prefix.len() + body.len() + options.suffix.len());
        out.push_str(&options.prefix);
        out.push_str(body);
        out.push_str(&options.suffix);
        Ok(out)
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The process id set by the latest [`start_process`](Self::start_process).
    pub fn process_id(&self) -> Option<&str> {
        self.process_id.as_deref()
    }

    /// The thread id set by the latest [`start_thread`](Self::start_thread).
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }
}
