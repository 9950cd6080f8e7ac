use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use sentry::types::{Dsn, Uuid};
use sentry::{ClientInitGuard, ClientOptions, Hub, Level, TransportFactory};

use crate::app::RequestContext;
use crate::config::InitKwargs;
use crate::error::{Result, SentryLoggingError};
use crate::reporter::{BeforeSend, ErrorReporter, ReporterOptions};

/// [`ErrorReporter`] backed by the process-wide Sentry client.
///
/// Owns the client guard, so events are flushed when the reporter is dropped.
#[derive(Default)]
pub struct SentryReporter {
    guard: Mutex<Option<ClientInitGuard>>,
    before_send: RwLock<Option<BeforeSend>>,
    transport: Option<Arc<dyn TransportFactory>>,
}

impl SentryReporter {
    /// Sends events through `transport` instead of the default HTTP one.
    pub fn with_transport(transport: Arc<dyn TransportFactory>) -> Self {
        Self {
            transport: Some(transport),
            ..Default::default()
        }
    }
}

impl ErrorReporter for SentryReporter {
    fn init(&self, options: ReporterOptions) -> Result<()> {
        let dsn: Dsn = options
            .dsn
            .parse()
            .map_err(|source| SentryLoggingError::InvalidDsn {
                dsn: options.dsn.clone(),
                source,
            })?;

        let mut client_options = ClientOptions {
            dsn: Some(dsn),
            in_app_exclude: options.in_app_exclude.unwrap_or_default(),
            integrations: options
                .integrations
                .iter()
                .map(|integration| integration.into_sentry())
                .collect(),
            transport: self.transport.clone(),
            ..Default::default()
        };
        apply_init_kwargs(&options.init_kwargs, &mut client_options);

        *self
            .before_send
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(options.before_send);

        let guard = sentry::init(client_options);
        tracing::debug!(enabled = guard.is_enabled(), "sentry client initialized");
        *self.guard.lock().unwrap_or_else(PoisonError::into_inner) = Some(guard);

        Ok(())
    }

    fn set_level(&self, level: Level) {
        sentry::configure_scope(|scope| scope.set_level(Some(level)));
    }

    fn last_event_id(&self) -> Option<Uuid> {
        sentry::last_event_id()
    }

    fn bind_request(&self, ctx: Arc<RequestContext>) -> Option<Arc<Hub>> {
        let hook = self
            .before_send
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;

        let hub = Arc::new(Hub::new_from_top(Hub::current()));
        bind_before_send(&hub, ctx, hook);
        Some(hub)
    }

    fn flush(&self, timeout: Option<Duration>) -> bool {
        self.guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(true, |guard| guard.flush(timeout))
    }
}

/// Runs `hook` with `ctx` on every event captured through `hub`.
pub fn bind_before_send(hub: &Hub, ctx: Arc<RequestContext>, hook: BeforeSend) {
    hub.configure_scope(|scope| {
        scope.add_event_processor(move |event| hook(event, &ctx));
    });
}

fn apply_init_kwargs(kwargs: &InitKwargs, options: &mut ClientOptions) {
    if let Some(release) = &kwargs.release {
        options.release = Some(release.clone().into());
    }
    if let Some(environment) = &kwargs.environment {
        options.environment = Some(environment.clone().into());
    }
    if let Some(server_name) = &kwargs.server_name {
        options.server_name = Some(server_name.clone().into());
    }
    if let Some(sample_rate) = kwargs.sample_rate {
        options.sample_rate = sample_rate;
    }
    if let Some(traces_sample_rate) = kwargs.traces_sample_rate {
        options.traces_sample_rate = traces_sample_rate;
    }
    if let Some(max_breadcrumbs) = kwargs.max_breadcrumbs {
        options.max_breadcrumbs = max_breadcrumbs;
    }
    if let Some(attach_stacktrace) = kwargs.attach_stacktrace {
        options.attach_stacktrace = attach_stacktrace;
    }
    if let Some(send_default_pii) = kwargs.send_default_pii {
        options.send_default_pii = send_default_pii;
    }
    if let Some(debug) = kwargs.debug {
        options.debug = debug;
    }
    if let Some(seconds) = kwargs.shutdown_timeout {
        options.shutdown_timeout = Duration::from_secs_f64(seconds);
    }
}
