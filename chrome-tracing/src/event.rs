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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event payload shown in the trace viewer's details pane.
///
/// Keys keep their insertion order when serialized.
pub type Args = Map<String, Value>;

/// Name of the metadata event that labels a process lane.
pub const PROCESS_NAME: &str = "process_name";
/// Name of the metadata event that labels a thread lane.
pub const THREAD_NAME: &str = "thread_name";

/// Event phase types emitted by the recorder.
///
/// Only the subset of the Chrome trace phases needed for named lanes and
/// begin/end spans is modelled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Metadata event naming a process or a thread.
    #[serde(rename = "M")]
    Metadata,
    /// Begin phase of a duration event.
    /// Pairing with a DurationEnd (E) event is up to the caller.
    #[serde(rename = "B")]
    DurationBegin,
    /// End phase of a duration event.
    #[serde(rename = "E")]
    DurationEnd,
}

/// A single recorded event.
///
/// Field declaration order is the serialized key order: `name`, `pid`,
/// `tid`, `ts`, `ph`, `args`. Unset lanes are left out of the JSON object
/// entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Display name of the event, or the fixed name of a metadata event.
    pub name: String,
    /// Process lane the event belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    /// Thread lane within the process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    /// Timestamp taken from the recorder's time source when the event was
    /// appended.
    pub ts: u64,
    pub ph: Phase,
    #[serde(default)]
    pub args: Args,
}

/// Builds the `{"name": <name>}` payload carried by metadata events.
pub(crate) fn name_args(name: String) -> Args {
    let mut args = Args::new();
    args.insert("name".to_string(), Value::String(name));
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_fields_in_declaration_order() {
        let event = TraceEvent {
            name: PROCESS_NAME.to_string(),
            pid: Some("testPid".to_string()),
            tid: Some("testTid".to_string()),
            ts: 1487076708000,
            ph: Phase::Metadata,
            args: name_args("detox".to_string()),
        };

        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"name":"process_name","pid":"testPid","tid":"testTid","ts":1487076708000,"ph":"M","args":{"name":"detox"}}"#
        );
    }

    #[test]
    fn omits_unset_lanes() {
        let event = TraceEvent {
            name: "eventName".to_string(),
            pid: None,
            tid: None,
            ts: 7,
            ph: Phase::DurationEnd,
            args: Args::new(),
        };

        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"name":"eventName","ts":7,"ph":"E","args":{}}"#
        );
    }

    #[test]
    fn args_keep_insertion_order() {
        let mut args = Args::new();
        args.insert("zeta".to_string(), json!(1));
        args.insert("alpha".to_string(), json!({"nested": [true, null]}));
        let event = TraceEvent {
            name: "ordered".to_string(),
            pid: None,
            tid: None,
            ts: 0,
            ph: Phase::DurationBegin,
            args,
        };

        let text = serde_json::to_string(&event).unwrap();
        assert!(text.ends_with(r#""args":{"zeta":1,"alpha":{"nested":[true,null]}}}"#));
    }

    #[test]
    fn reads_back_events_without_lanes() {
        let event: TraceEvent =
            serde_json::from_str(r#"{"name":"x","ts":3,"ph":"B"}"#).unwrap();
        assert_eq!(event.pid, None);
        assert_eq!(event.tid, None);
        assert_eq!(event.ph, Phase::DurationBegin);
        assert!(event.args.is_empty());
    }
}
