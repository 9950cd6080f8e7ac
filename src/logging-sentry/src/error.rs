use thiserror::Error;

pub type Result<T, E = SentryLoggingError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SentryLoggingError {
    #[error("`{0}` is not a valid logging level")]
    InvalidLevel(String),

    #[error("invalid Sentry DSN `{dsn}`")]
    InvalidDsn {
        dsn: String,
        #[source]
        source: sentry::types::ParseDsnError,
    },

    #[error("`{0}` cannot be set through LOGGING_SENTRY_INIT_KWARGS")]
    ReservedInitKwarg(String),

    #[error("invalid LOGGING_SENTRY_INIT_KWARGS")]
    InvalidInitKwargs(#[source] serde_json::Error),

    #[error("invalid Sentry settings")]
    Settings(#[from] serde_json::Error),

    #[error("failed to load configuration")]
    Load(#[from] ::config::ConfigError),

    #[error("failed to install the tracing subscriber")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
