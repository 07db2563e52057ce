use chrome_tracing::{Args, ChromeTracing};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thread_local::ThreadLocal;
use tracing::span::{Attributes, Record};
use tracing::{Id, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

pub type SharedRecorder = Arc<Mutex<ChromeTracing>>;

/// Span fields captured when the span is created and updated on `record`.
pub(crate) struct SpanFields {
    pub args: Args,
}

pub struct ChromeLayer {
    recorder: SharedRecorder,
    thread_ids: ThreadLocal<String>,
    next_thread: AtomicU64,
}

impl ChromeLayer {
    /// Records into a fresh recorder using the system clock.
    pub fn new(process_name: &str) -> Self {
        Self::with_recorder(ChromeTracing::new(), process_name)
    }

    /// Records into `recorder`, naming the current OS process `process_name`.
    pub fn with_recorder(mut recorder: ChromeTracing, process_name: &str) -> Self {
        recorder.start_process(std::process::id().to_string(), process_name);
        Self {
            recorder: Arc::new(Mutex::new(recorder)),
            thread_ids: ThreadLocal::new(),
            next_thread: AtomicU64::new(1),
        }
    }

    /// Handle to the recorder, for reading the trace out.
    pub fn recorder(&self) -> SharedRecorder {
        self.recorder.clone()
    }

    fn ensure_thread(&self) {
        self.thread_ids.get_or(|| {
            let index = self.next_thread.fetch_add(1, Ordering::Relaxed);
            let id = index.to_string();
            let name = std::thread::current()
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("thread-{}", index));
            if let Ok(mut recorder) = self.recorder.lock() {
                recorder.start_thread(id.clone(), name);
            }
            id
        });
    }
}

impl<S> Layer<S> for ChromeLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = SpanFields { args: Args::new() };
        attrs.record(&mut fields);
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(fields);
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if let Some(fields) = span.extensions_mut().get_mut::<SpanFields>() {
                values.record(fields);
            }
        }
    }

    fn on_enter(&self, id: &Id, ctx: Context<'_, S>) {
        self.ensure_thread();
        if let Some(span) = ctx.span(id) {
            let args = span
                .extensions()
                .get::<SpanFields>()
                .map(|fields| fields.args.clone())
                .unwrap_or_default();
            let Ok(mut recorder) = self.recorder.lock() else {
                return;
            };
            recorder.begin_event_with_args(span.metadata().name(), args);
        }
    }

    fn on_exit(&self, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let Ok(mut recorder) = self.recorder.lock() else {
                return;
            };
            recorder.finish_event(span.metadata().name());
        }
    }
}
