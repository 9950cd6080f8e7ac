use serde::Deserialize;
use serde_json::{Map, Value};

use crate::constants::LOGGING_SENTRY_INIT_KWARGS;
use crate::error::{Result, SentryLoggingError};

/// Typed view over the Sentry settings of an [`crate::AppConfig`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SentrySettings {
    #[serde(rename = "SENTRY_DSN")]
    pub dsn: Option<String>,

    #[serde(rename = "LOGGING_SENTRY_LEVEL")]
    pub level: String,

    /// Keep warning channels in in-app grouping instead of excluding the
    /// usual noisy module prefixes.
    #[serde(rename = "LOGGING_SENTRY_PYWARNINGS")]
    pub include_warnings: bool,

    #[serde(rename = "LOGGING_SENTRY_CELERY")]
    pub task_queue: bool,

    #[serde(rename = "LOGGING_SENTRY_SQLALCHEMY")]
    pub database: bool,

    #[serde(rename = "LOGGING_SENTRY_REDIS")]
    pub cache: bool,

    #[serde(rename = "LOGGING_SENTRY_INIT_KWARGS")]
    pub init_kwargs: Option<Map<String, Value>>,
}

impl SentrySettings {
    /// The configured DSN, treating an empty string as unset.
    pub fn dsn(&self) -> Option<&str> {
        self.dsn.as_deref().filter(|dsn| !dsn.is_empty())
    }

    pub fn init_kwargs(&self) -> Result<InitKwargs> {
        match &self.init_kwargs {
            Some(map) => InitKwargs::from_map(map),
            None => Ok(InitKwargs::default()),
        }
    }
}

/// Client options that may be passed through `LOGGING_SENTRY_INIT_KWARGS`.
///
/// They are applied on top of the options computed by the adapter. The
/// computed ones ([`InitKwargs::RESERVED`]) can not be overridden.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InitKwargs {
    pub release: Option<String>,
    pub environment: Option<String>,
    pub server_name: Option<String>,
    pub sample_rate: Option<f32>,
    pub traces_sample_rate: Option<f32>,
    pub max_breadcrumbs: Option<usize>,
    pub attach_stacktrace: Option<bool>,
    pub send_default_pii: Option<bool>,
    pub debug: Option<bool>,
    /// Seconds to wait for queued events on shutdown.
    pub shutdown_timeout: Option<f64>,
}

impl InitKwargs {
    pub const RESERVED: &'static [&'static str] =
        &["dsn", "in_app_exclude", "integrations", "before_send"];

    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        if let Some(key) = map.keys().find(|key| Self::RESERVED.contains(&key.as_str())) {
            tracing::debug!(key = %key, setting = LOGGING_SENTRY_INIT_KWARGS, "rejecting reserved client option");
            return Err(SentryLoggingError::ReservedInitKwarg(key.clone()));
        }

        serde_json::from_value(Value::Object(map.clone()))
            .map_err(SentryLoggingError::InvalidInitKwargs)
    }
}
