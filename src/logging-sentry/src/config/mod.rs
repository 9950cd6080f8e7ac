mod app_config;
mod config_loader;
mod defaults;
mod settings;
mod tests;

pub use app_config::AppConfig;
pub use config_loader::ConfigLoader;
pub use defaults::sentry_defaults;
pub use settings::{InitKwargs, SentrySettings};
