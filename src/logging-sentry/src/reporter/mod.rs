//! The error-reporting client as seen by the adapter.
//!
//! [`ErrorReporter`] is the handle the adapter initializes and queries. The
//! Sentry-backed implementation lives behind the `sdk` feature; tests plug in
//! their own.

mod integrations;
#[cfg(feature = "sdk")]
mod sentry_reporter;

use std::sync::Arc;
use std::time::Duration;

use sentry::protocol::Event;
use sentry::types::Uuid;
use sentry::{Hub, Level};

use crate::app::RequestContext;
use crate::config::InitKwargs;
use crate::error::Result;

pub use integrations::Integration;
#[cfg(feature = "sdk")]
pub use sentry_reporter::{bind_before_send, SentryReporter};

/// Called synchronously with every event about to be sent, together with the
/// context of the request it was captured in. Returning `None` drops the event.
pub type BeforeSend =
    Arc<dyn Fn(Event<'static>, &RequestContext) -> Option<Event<'static>> + Send + Sync>;

/// Everything the client is initialized with.
pub struct ReporterOptions {
    pub dsn: String,
    /// `None` keeps every module in in-app grouping.
    pub in_app_exclude: Option<Vec<&'static str>>,
    pub integrations: Vec<Integration>,
    pub before_send: BeforeSend,
    pub init_kwargs: InitKwargs,
}

impl std::fmt::Debug for ReporterOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReporterOptions")
            .field("dsn", &self.dsn)
            .field("in_app_exclude", &self.in_app_exclude)
            .field("integrations", &self.integrations)
            .field("init_kwargs", &self.init_kwargs)
            .finish_non_exhaustive()
    }
}

pub trait ErrorReporter: Send + Sync {
    /// Initializes the client. Fails on a malformed DSN; no retries.
    fn init(&self, options: ReporterOptions) -> Result<()>;

    /// Sets the level of the active scope.
    fn set_level(&self, level: Level);

    fn last_event_id(&self) -> Option<Uuid>;

    /// Returns the hub to run a request on. Events captured through it go
    /// through the before-send hook with `ctx`. `None` when the client is not
    /// initialized.
    fn bind_request(&self, ctx: Arc<RequestContext>) -> Option<Arc<Hub>>;

    /// Waits for queued events to be sent. Returns `false` on timeout.
    fn flush(&self, timeout: Option<Duration>) -> bool;
}

/// The reporter this build can offer, if any.
#[cfg(feature = "sdk")]
pub fn default_reporter() -> Option<Arc<dyn ErrorReporter>> {
    Some(Arc::new(SentryReporter::default()))
}

#[cfg(not(feature = "sdk"))]
pub fn default_reporter() -> Option<Arc<dyn ErrorReporter>> {
    None
}
