#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use logging_sentry::{AppConfig, Application, ErrorReporter, ReporterOptions, RequestContext};
use sentry::protocol::Event;
use sentry::types::Uuid;
use sentry::{Hub, Level};
use serde_json::Value;
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

pub const DSN: &str = "https://public@sentry.example.com/1";

/// Reporter that records what the adapter asks of it.
#[derive(Default)]
pub struct RecordingReporter {
    pub options: Mutex<Vec<ReporterOptions>>,
    pub levels: Mutex<Vec<Level>>,
    last_event_id: Mutex<Option<Uuid>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn init_count(&self) -> usize {
        self.options.lock().unwrap().len()
    }

    /// Sends `event` the way the client would: through the registered
    /// before-send hook, then records it as the last event.
    pub fn capture(&self, event: Event<'static>, ctx: &RequestContext) -> Option<Event<'static>> {
        let hook = self
            .options
            .lock()
            .unwrap()
            .last()
            .map(|options| options.before_send.clone())
            .expect("reporter not initialized");

        let event_id = event.event_id;
        let event = hook(event, ctx);
        *self.last_event_id.lock().unwrap() = Some(event_id);
        event
    }

    pub fn set_last_event_id(&self, event_id: Uuid) {
        *self.last_event_id.lock().unwrap() = Some(event_id);
    }
}

impl ErrorReporter for RecordingReporter {
    fn init(&self, options: ReporterOptions) -> logging_sentry::Result<()> {
        self.options.lock().unwrap().push(options);
        Ok(())
    }

    fn set_level(&self, level: Level) {
        self.levels.lock().unwrap().push(level);
    }

    fn last_event_id(&self) -> Option<Uuid> {
        *self.last_event_id.lock().unwrap()
    }

    fn bind_request(&self, _ctx: Arc<RequestContext>) -> Option<Arc<Hub>> {
        None
    }

    fn flush(&self, _timeout: Option<Duration>) -> bool {
        true
    }
}

pub fn app_with(settings: &[(&str, Value)]) -> Application {
    let config: AppConfig = settings
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    Application::new("test-app", config)
}

/// Counts WARN events.
#[derive(Clone, Default)]
pub struct WarningCounter(Arc<AtomicUsize>);

impl WarningCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarningCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}
