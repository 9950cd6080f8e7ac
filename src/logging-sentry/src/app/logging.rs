use std::collections::BTreeMap;

use sentry::integrations::tracing::{EventFilter, SentryLayer};
use tracing::{Level as TracingLevel, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter, Targets};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::{LookupSpan, Registry};
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::error::{Result, SentryLoggingError};

/// Where the records of a [`Logger`] go.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogHandler {
    /// Human readable output on stderr.
    Console,
    /// Records at or above `level` become Sentry events, lower ones down to
    /// INFO become breadcrumbs.
    Sentry { level: sentry::Level },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Logger {
    level: Option<LevelFilter>,
    handlers: Vec<LogHandler>,
}

impl Logger {
    pub fn level(&self) -> Option<LevelFilter> {
        self.level
    }

    pub fn set_level(&mut self, level: LevelFilter) {
        self.level = Some(level);
    }

    pub fn handlers(&self) -> &[LogHandler] {
        &self.handlers
    }

    pub fn add_handler(&mut self, handler: LogHandler) {
        self.handlers.push(handler);
    }

    pub fn has_console_handler(&self) -> bool {
        self.handlers.contains(&LogHandler::Console)
    }
}

/// Logging setup of an application: the root logger plus loggers for
/// individual tracing targets. Nothing is installed until [`Logging::try_init`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Logging {
    root: Logger,
    loggers: BTreeMap<String, Logger>,
}

impl Logging {
    pub fn root(&self) -> &Logger {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Logger {
        &mut self.root
    }

    pub fn logger(&self, target: &str) -> Option<&Logger> {
        self.loggers.get(target)
    }

    pub fn logger_mut(&mut self, target: &str) -> &mut Logger {
        self.loggers.entry(target.to_string()).or_default()
    }

    /// Makes sure `target` prints to the console at `level`, whatever other
    /// handlers exist.
    pub fn ensure_console_handler(&mut self, target: &str, level: LevelFilter) {
        let logger = self.logger_mut(target);
        logger.set_level(level);
        if !logger.has_console_handler() {
            logger.add_handler(LogHandler::Console);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.root.handlers.len()
            + self
                .loggers
                .values()
                .map(|logger| logger.handlers.len())
                .sum::<usize>()
    }

    /// One layer per handler.
    pub fn layers<S>(&self) -> Vec<Box<dyn Layer<S> + Send + Sync>>
    where
        S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    {
        let mut layers = Vec::with_capacity(self.handler_count());

        for handler in &self.root.handlers {
            let layer = match *handler {
                LogHandler::Console => fmt::layer()
                    .with_target(true)
                    .with_filter(self.root_filter())
                    .boxed(),
                LogHandler::Sentry { level } => sentry_layer(level).boxed(),
            };
            layers.push(layer);
        }

        for (target, logger) in &self.loggers {
            let level = logger.level.unwrap_or(LevelFilter::INFO);
            for handler in &logger.handlers {
                let targets = Targets::new().with_target(target.clone(), level);
                let layer = match *handler {
                    LogHandler::Console => fmt::layer()
                        .with_target(true)
                        .with_filter(targets)
                        .boxed(),
                    LogHandler::Sentry { level } => sentry_layer(level).with_filter(targets).boxed(),
                };
                layers.push(layer);
            }
        }

        layers
    }

    /// Installs the handlers as the global tracing subscriber.
    pub fn try_init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.layers::<Registry>())
            .try_init()
            .map_err(SentryLoggingError::from)?;

        tracing::debug!(handlers = self.handler_count(), "logging initialized");
        Ok(())
    }

    /// Filter of the root console handler. Targets printing to the console
    /// through a logger of their own are left out so their lines show once.
    fn root_filter(&self) -> EnvFilter {
        let default = self.root.level.unwrap_or(LevelFilter::INFO);
        let filter = EnvFilter::builder()
            .with_default_directive(default.into())
            .from_env_lossy();

        self.loggers
            .iter()
            .filter(|(_, logger)| logger.has_console_handler())
            .filter_map(|(target, _)| format!("{target}=off").parse::<Directive>().ok())
            .fold(filter, EnvFilter::add_directive)
    }
}

/// Resolves a level name (`CRITICAL`, `FATAL`, `ERROR`, `WARNING`, `WARN`,
/// `INFO`, `DEBUG`, `NOTSET`, `TRACE`) into a Sentry level. Names are case
/// sensitive.
pub fn resolve_level(name: &str) -> Result<sentry::Level> {
    let level = match name {
        "CRITICAL" | "FATAL" => sentry::Level::Fatal,
        "ERROR" => sentry::Level::Error,
        "WARNING" | "WARN" => sentry::Level::Warning,
        "INFO" => sentry::Level::Info,
        "DEBUG" | "NOTSET" | "TRACE" => sentry::Level::Debug,
        _ => return Err(SentryLoggingError::InvalidLevel(name.to_string())),
    };
    Ok(level)
}

fn tracing_level(level: sentry::Level) -> TracingLevel {
    match level {
        sentry::Level::Fatal | sentry::Level::Error => TracingLevel::ERROR,
        sentry::Level::Warning => TracingLevel::WARN,
        sentry::Level::Info => TracingLevel::INFO,
        sentry::Level::Debug => TracingLevel::DEBUG,
    }
}

/// The Sentry log handler: records at or above `level` are captured as events
/// (errors as exceptions), lower records down to INFO as breadcrumbs.
pub fn sentry_layer<S>(level: sentry::Level) -> SentryLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let threshold = tracing_level(level);
    sentry::integrations::tracing::layer().event_filter(move |metadata| {
        let level = *metadata.level();
        if level <= threshold {
            if level == TracingLevel::ERROR {
                EventFilter::Exception
            } else {
                EventFilter::Event
            }
        } else if level <= TracingLevel::INFO {
            EventFilter::Breadcrumb
        } else {
            EventFilter::Ignore
        }
    })
}
