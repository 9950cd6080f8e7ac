//! Sentry error reporting for axum applications.
//!
//! [`LoggingSentry`] reads the `SENTRY_*` / `LOGGING_SENTRY_*` settings of an
//! [`Application`], initializes the reporting client, attaches a log handler
//! and exposes the last event id of each request to the template context.

pub mod app;
pub mod config;
pub mod constants;
mod error;
pub mod extension;
pub mod middleware;
pub mod reporter;

pub use app::{Application, Extensions, LogHandler, Logger, Logging, RequestContext};
pub use crate::config::{AppConfig, ConfigLoader, InitKwargs, SentrySettings};
pub use error::{Result, SentryLoggingError};
pub use extension::LoggingSentry;
pub use reporter::{default_reporter, BeforeSend, ErrorReporter, Integration, ReporterOptions};
