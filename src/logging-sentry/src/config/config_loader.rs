use std::collections::HashMap;
use std::path::Path;

use config::builder::DefaultState;
use config::{Config as RConfig, ConfigBuilder, Environment, File, FileFormat};
use serde_json::Value;

use crate::config::AppConfig;
use crate::constants::ENV_PREFIX;
use crate::error::Result;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the application settings from an optional TOML file, overridden
    /// by `APP_`-prefixed environment variables (`APP_SENTRY_DSN`, ...).
    ///
    /// The file keeps its keys as written while the environment source is
    /// lower-cased, so each source is normalised to upper case on its own
    /// before the environment is layered over the file.
    pub fn load(path: Option<&Path>) -> Result<AppConfig> {
        let mut settings = match path {
            Some(path) => Self::collect(
                RConfig::builder().add_source(File::from(path).format(FileFormat::Toml)),
            )?,
            None => HashMap::new(),
        };

        let environment = Self::collect(
            RConfig::builder().add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true),
            ),
        )?;
        settings.extend(environment);

        Ok(settings.into_iter().collect())
    }

    fn collect(builder: ConfigBuilder<DefaultState>) -> Result<HashMap<String, Value>> {
        let raw: HashMap<String, Value> = builder.build()?.try_deserialize()?;

        Ok(raw
            .into_iter()
            .map(|(key, value)| (key.to_uppercase(), value))
            .collect())
    }
}
