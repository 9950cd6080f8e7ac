#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use serde_json::{json, Map, Value};
    use serial_test::serial;

    use crate::config::{sentry_defaults, AppConfig, ConfigLoader, InitKwargs, SentrySettings};
    use crate::error::SentryLoggingError;

    fn defaults() -> AppConfig {
        sentry_defaults().into_iter().collect()
    }

    #[test]
    fn test_set_default_keeps_existing_value() {
        let mut config = AppConfig::new();
        config.insert("SENTRY_DSN", "https://public@example.com/1");

        config.set_default("SENTRY_DSN", Value::Null);
        config.set_default("LOGGING_SENTRY_LEVEL", "ERROR");

        assert_eq!(config.get("SENTRY_DSN"), Some(&json!("https://public@example.com/1")));
        assert_eq!(config.get("LOGGING_SENTRY_LEVEL"), Some(&json!("ERROR")));
    }

    #[test]
    fn test_default_settings() {
        let settings: SentrySettings = defaults().extract().unwrap();

        assert_eq!(settings.dsn(), None);
        assert_eq!(settings.level, "WARNING");
        assert!(!settings.include_warnings);
        assert!(!settings.task_queue && !settings.database && !settings.cache);
        assert_eq!(settings.init_kwargs().unwrap(), InitKwargs::default());
    }

    #[test]
    fn test_empty_dsn_is_unset() {
        let mut config = defaults();
        config.insert("SENTRY_DSN", "");
        let settings: SentrySettings = config.extract().unwrap();

        assert_eq!(settings.dsn(), None);
    }

    #[test]
    fn test_init_kwargs_are_parsed() {
        let map: Map<String, Value> = serde_json::from_value(json!({
            "environment": "staging",
            "traces_sample_rate": 0.25,
            "attach_stacktrace": true,
        }))
        .unwrap();

        let kwargs = InitKwargs::from_map(&map).unwrap();

        assert_eq!(kwargs.environment.as_deref(), Some("staging"));
        assert_eq!(kwargs.traces_sample_rate, Some(0.25));
        assert_eq!(kwargs.attach_stacktrace, Some(true));
        assert_eq!(kwargs.release, None);
    }

    #[rstest]
    #[case::dsn("dsn")]
    #[case::exclusions("in_app_exclude")]
    #[case::integrations("integrations")]
    #[case::hook("before_send")]
    fn test_reserved_init_kwargs_are_rejected(#[case] key: &str) {
        let mut map = Map::new();
        map.insert(key.to_string(), json!(null));

        let err = InitKwargs::from_map(&map).unwrap_err();
        assert!(matches!(err, SentryLoggingError::ReservedInitKwarg(k) if k == key));
    }

    #[test]
    fn test_unknown_init_kwargs_are_rejected() {
        let mut map = Map::new();
        map.insert("transport".to_string(), json!("udp"));

        let err = InitKwargs::from_map(&map).unwrap_err();
        assert!(matches!(err, SentryLoggingError::InvalidInitKwargs(_)));
    }

    #[test]
    #[serial]
    fn test_load_from_file_and_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
SENTRY_DSN = "https://public@example.com/1"
LOGGING_SENTRY_LEVEL = "INFO"

[LOGGING_SENTRY_INIT_KWARGS]
environment = "staging"
"#
        )
        .unwrap();

        std::env::set_var("APP_LOGGING_SENTRY_REDIS", "true");
        let config = ConfigLoader::load(Some(file.path()));
        std::env::remove_var("APP_LOGGING_SENTRY_REDIS");
        let config = config.unwrap();

        assert_eq!(config.get("SENTRY_DSN"), Some(&json!("https://public@example.com/1")));
        assert_eq!(config.get("LOGGING_SENTRY_LEVEL"), Some(&json!("INFO")));
        assert_eq!(config.get("LOGGING_SENTRY_REDIS"), Some(&json!(true)));
        assert_eq!(
            config.get("LOGGING_SENTRY_INIT_KWARGS"),
            Some(&json!({"environment": "staging"}))
        );
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
LOGGING_SENTRY_LEVEL = "INFO"
LOGGING_SENTRY_CELERY = false
"#
        )
        .unwrap();

        std::env::set_var("APP_LOGGING_SENTRY_LEVEL", "ERROR");
        std::env::set_var("APP_LOGGING_SENTRY_CELERY", "true");
        let config = ConfigLoader::load(Some(file.path()));
        std::env::remove_var("APP_LOGGING_SENTRY_LEVEL");
        std::env::remove_var("APP_LOGGING_SENTRY_CELERY");
        let config = config.unwrap();

        assert_eq!(config.get("LOGGING_SENTRY_LEVEL"), Some(&json!("ERROR")));
        assert_eq!(config.get("LOGGING_SENTRY_CELERY"), Some(&json!(true)));
        assert!(config.keys().all(|key| key == key.to_uppercase()));
    }

    #[test]
    #[serial]
    fn test_load_missing_file_fails() {
        let err = ConfigLoader::load(Some(std::path::Path::new("/nonexistent/app.toml")));
        assert!(matches!(err, Err(SentryLoggingError::Load(_))));
    }
}
