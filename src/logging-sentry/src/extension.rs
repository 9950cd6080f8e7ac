use std::sync::Arc;

use sentry::protocol::Event;
use serde_json::{Map, Value};
use tracing_subscriber::filter::LevelFilter;

use crate::app::{resolve_level, Application, LogHandler, RequestContext};
use crate::config::{sentry_defaults, SentrySettings};
use crate::constants::{
    EXTENSION_NAME, IN_APP_EXCLUDE, REQUEST_ID_TAG, SENTRY_DSN, SENTRY_EVENT_ID, WEB_SERVER_TARGET,
};
use crate::error::Result;
use crate::reporter::{BeforeSend, ErrorReporter, Integration, ReporterOptions};

/// Sentry extension of an [`Application`].
///
/// ```no_run
/// # use logging_sentry::{default_reporter, AppConfig, Application, LoggingSentry};
/// let mut app = Application::new("app", AppConfig::new());
/// LoggingSentry::new(default_reporter()).init_app(&mut app)?;
/// # Ok::<(), logging_sentry::SentryLoggingError>(())
/// ```
pub struct LoggingSentry {
    reporter: Option<Arc<dyn ErrorReporter>>,
}

impl LoggingSentry {
    /// `reporter` is `None` when no reporting client is available in this
    /// build, see [`crate::default_reporter`].
    pub fn new(reporter: Option<Arc<dyn ErrorReporter>>) -> Arc<Self> {
        Arc::new(Self { reporter })
    }

    pub fn reporter(&self) -> Option<&Arc<dyn ErrorReporter>> {
        self.reporter.as_ref()
    }

    /// Sets up Sentry reporting on `app`.
    ///
    /// Does nothing besides filling in default settings when `SENTRY_DSN` is
    /// unset, and only logs a warning when no reporting client is available.
    /// Calling it twice on the same application registers everything twice.
    pub fn init_app(self: &Arc<Self>, app: &mut Application) -> Result<()> {
        self.init_config(app);

        let dsn_configured = match app.config.get(SENTRY_DSN) {
            None | Some(Value::Null) => false,
            Some(Value::String(dsn)) => !dsn.is_empty(),
            Some(_) => true,
        };
        if !dsn_configured {
            return Ok(());
        }

        let Some(reporter) = self.reporter.clone() else {
            tracing::warn!(
                app = %app.name,
                "The `SENTRY_DSN` config is set, but no Sentry client is available. \
                 Build with the `sdk` feature to use the Sentry logging extension."
            );
            return Ok(());
        };

        self.install_handler(app, reporter.as_ref())?;

        app.extensions.insert(EXTENSION_NAME, Arc::clone(self));

        app.context_processor(move |ctx| {
            let event_id = ctx.sentry_event_id().or_else(|| {
                let event_id = reporter.last_event_id();
                if let Some(event_id) = event_id {
                    ctx.set_sentry_event_id(event_id);
                }
                event_id
            });

            let mut context = Map::new();
            context.insert(
                SENTRY_EVENT_ID.to_string(),
                event_id.map_or(Value::Null, |id| Value::String(id.to_string())),
            );
            context
        });

        tracing::info!(app = %app.name, "Sentry logging enabled");
        Ok(())
    }

    /// Fills in every Sentry setting `app` does not define yet.
    pub fn init_config(&self, app: &mut Application) {
        for (key, value) in sentry_defaults() {
            app.config.set_default(key, value);
        }
    }

    /// Installs the Sentry log handler and initializes the client.
    ///
    /// Fails on an unknown `LOGGING_SENTRY_LEVEL`.
    pub fn install_handler(&self, app: &mut Application, reporter: &dyn ErrorReporter) -> Result<()> {
        let settings: SentrySettings = app.config.extract()?;
        let level = resolve_level(&settings.level)?;

        let exclusions = if settings.include_warnings {
            None
        } else {
            Some(IN_APP_EXCLUDE.to_vec())
        };

        self.install_sentry_sdk_handler(app, reporter, exclusions, level)?;

        app.logging
            .root_mut()
            .add_handler(LogHandler::Sentry { level });

        // The request log only reaches the console through a handler of its
        // own once another handler exists.
        if app.debug {
            app.logging
                .ensure_console_handler(WEB_SERVER_TARGET, LevelFilter::INFO);
        }

        Ok(())
    }

    /// Initializes the client with the integrations enabled in the settings.
    pub fn install_sentry_sdk_handler(
        &self,
        app: &Application,
        reporter: &dyn ErrorReporter,
        exclusions: Option<Vec<&'static str>>,
        level: sentry::Level,
    ) -> Result<()> {
        let settings: SentrySettings = app.config.extract()?;

        let mut integrations = vec![Integration::Web];
        if settings.task_queue {
            integrations.push(Integration::TaskQueue);
        }
        if settings.database {
            integrations.push(Integration::Database);
        }
        if settings.cache {
            integrations.push(Integration::Cache);
        }

        let init_kwargs = settings.init_kwargs()?;
        let before_send: BeforeSend = Arc::new(Self::before_send);

        reporter.init(ReporterOptions {
            dsn: settings.dsn().unwrap_or_default().to_string(),
            in_app_exclude: exclusions,
            integrations,
            before_send,
            init_kwargs,
        })?;
        reporter.set_level(level);

        Ok(())
    }

    /// Tags `event` with the request id and remembers its id on the request.
    /// Tags are a map, so an existing `request_id` tag is replaced rather than
    /// duplicated. Never drops the event.
    pub fn before_send(mut event: Event<'static>, ctx: &RequestContext) -> Option<Event<'static>> {
        if let Some(request_id) = ctx.request_id() {
            event
                .tags
                .insert(REQUEST_ID_TAG.to_string(), request_id.to_string());
        }
        ctx.set_sentry_event_id(event.event_id);
        Some(event)
    }
}
