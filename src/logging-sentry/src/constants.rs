/// Name under which the adapter registers itself in [`crate::Extensions`].
pub const EXTENSION_NAME: &str = "invenio-logging-sentry";

pub const SENTRY_DSN: &str = "SENTRY_DSN";
pub const LOGGING_SENTRY_LEVEL: &str = "LOGGING_SENTRY_LEVEL";
pub const LOGGING_SENTRY_PYWARNINGS: &str = "LOGGING_SENTRY_PYWARNINGS";
pub const LOGGING_SENTRY_CELERY: &str = "LOGGING_SENTRY_CELERY";
pub const LOGGING_SENTRY_SQLALCHEMY: &str = "LOGGING_SENTRY_SQLALCHEMY";
pub const LOGGING_SENTRY_REDIS: &str = "LOGGING_SENTRY_REDIS";
pub const LOGGING_SENTRY_INIT_KWARGS: &str = "LOGGING_SENTRY_INIT_KWARGS";

/// Host setting toggling debug mode.
pub const DEBUG: &str = "DEBUG";

pub const DEFAULT_LEVEL: &str = "WARNING";

/// Template context key holding the last event id of the request.
pub const SENTRY_EVENT_ID: &str = "sentry_event_id";
pub const REQUEST_ID_TAG: &str = "request_id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request log target of the HTTP server. It only prints to the console when
/// it has a handler of its own.
pub const WEB_SERVER_TARGET: &str = "tower_http";

/// Module prefixes kept out of in-app frame grouping: process runtime, HTTP
/// server, the reporting client, request log, serialization and the `log`
/// bridge carrying legacy warnings.
pub const IN_APP_EXCLUDE: &[&str] = &["tokio", "hyper", "sentry", "tower_http", "serde", "log"];

/// Prefix for environment variables read by [`crate::ConfigLoader`].
pub const ENV_PREFIX: &str = "APP";
