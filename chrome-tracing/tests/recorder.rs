use chrome_tracing::{
    clock, Args, ChromeTracing, FragmentWriter, Phase, RecorderOptions, TimeSource, TraceEvent,
    TraceOptions,
};
use rstest::{fixture, rstest};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

const TS: u64 = 1487076708000;

#[fixture]
fn trace() -> ChromeTracing {
    ChromeTracing::with_options(RecorderOptions::builder().time_source(clock::fixed(TS)).build())
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(17)]
fn length_and_order_follow_calls(mut trace: ChromeTracing, #[case] count: usize) {
    for i in 0..count {
        if i % 2 == 0 {
            trace.begin_event(format!("event-{i}"));
        } else {
            trace.finish_event(format!("event-{i}"));
        }
    }

    assert_eq!(trace.len(), count);
    let parsed: Vec<TraceEvent> = serde_json::from_str(&trace.json().unwrap()).unwrap();
    assert_eq!(parsed.len(), count);
    for (i, event) in parsed.iter().enumerate() {
        assert_eq!(event.name, format!("event-{i}"));
        let expected = if i % 2 == 0 {
            Phase::DurationBegin
        } else {
            Phase::DurationEnd
        };
        assert_eq!(event.ph, expected);
    }
}

#[rstest]
fn session_reads_back_as_chrome_trace(mut trace: ChromeTracing) {
    let mut args = Args::new();
    args.insert("testName".to_string(), json!("login flow"));
    trace
        .start_process("testPid", "detox")
        .start_thread("testTid", "deviceType")
        .begin_event_with_args("test", args)
        .finish_event("test");

    let events: Vec<Value> = serde_json::from_str(&trace.json().unwrap()).unwrap();
    assert_eq!(events[0]["name"], "process_name");
    assert_eq!(events[0].get("tid"), None);
    assert_eq!(events[1]["name"], "thread_name");
    assert_eq!(events[1]["pid"], "testPid");
    assert_eq!(events[2]["args"]["testName"], "login flow");
    assert_eq!(events[2].get("pid"), None);
    assert_eq!(events[3]["args"], json!({}));
    for event in &events {
        assert_eq!(event["ts"], TS);
    }
}

#[rstest]
fn fragments_rebuild_the_full_array(mut trace: ChromeTracing) {
    trace.start_process("1", "app").begin_event("x").finish_event("x");

    let framed = trace
        .traces(&TraceOptions::builder().prefix("[").suffix("]").build())
        .unwrap();
    assert_eq!(framed, trace.json().unwrap());

    let mut writer = FragmentWriter::new(Vec::new());
    writer.push(&trace).unwrap();
    let stitched = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert_eq!(stitched, trace.json().unwrap());
}

#[test]
fn shared_recorder_keeps_every_append() {
    let ticks = Arc::new(AtomicU64::new(0));
    let source = ticks.clone();
    let time_source: TimeSource = Arc::new(move || source.fetch_add(1, Ordering::SeqCst));
    let trace = Arc::new(Mutex::new(ChromeTracing::with_options(
        RecorderOptions::builder().time_source(time_source).build(),
    )));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let trace = trace.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    let mut trace = trace.lock().unwrap();
                    trace.begin_event(format!("worker-{worker}"));
                    trace.finish_event(format!("worker-{worker}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let trace = trace.lock().unwrap();
    assert_eq!(trace.len(), 200);
    for pair in trace.events().chunks(2) {
        assert_eq!(pair[0].name, pair[1].name);
        assert_eq!(pair[0].ph, Phase::DurationBegin);
        assert_eq!(pair[1].ph, Phase::DurationEnd);
        assert_eq!(pair[0].ts + 1, pair[1].ts);
    }
}
