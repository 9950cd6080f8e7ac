use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

fn footer_message() -> String {
    "Settings are read from the --config file and from APP_-prefixed environment \
     variables, e.g. APP_SENTRY_DSN or APP_LOGGING_SENTRY_LEVEL."
        .to_string()
}

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "logging-server",
    about = "HTTP server reporting errors to Sentry",
    version,
    after_help = footer_message()
)]
pub struct Cli {
    /// TOML settings file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[clap(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Enable debug mode (request logs on the console)
    #[clap(long)]
    pub debug: bool,
}
