use serde_json::{json, Value};

use crate::constants::{
    DEFAULT_LEVEL, LOGGING_SENTRY_CELERY, LOGGING_SENTRY_INIT_KWARGS, LOGGING_SENTRY_LEVEL,
    LOGGING_SENTRY_PYWARNINGS, LOGGING_SENTRY_REDIS, LOGGING_SENTRY_SQLALCHEMY, SENTRY_DSN,
};

/// Default values of every setting read by [`crate::LoggingSentry`].
pub fn sentry_defaults() -> Vec<(&'static str, Value)> {
    vec![
        (SENTRY_DSN, Value::Null),
        (LOGGING_SENTRY_LEVEL, json!(DEFAULT_LEVEL)),
        (LOGGING_SENTRY_PYWARNINGS, json!(false)),
        (LOGGING_SENTRY_CELERY, json!(false)),
        (LOGGING_SENTRY_SQLALCHEMY, json!(false)),
        (LOGGING_SENTRY_REDIS, json!(false)),
        (LOGGING_SENTRY_INIT_KWARGS, json!({})),
    ]
}
