mod app;
mod cli;
mod handlers;
mod routes;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use logging_sentry::{
    default_reporter, Application, ConfigLoader, ErrorReporter, LogHandler, LoggingSentry,
};
use tokio::net::TcpListener;

use crate::cli::Cli;

const APP_NAME: &str = "logging-server";
const FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?;
    let mut app = Application::new(APP_NAME, config);
    app.debug |= cli.debug;
    app.logging.root_mut().add_handler(LogHandler::Console);

    // The global subscriber is only installed once the extension attached
    // its handlers, so startup messages go to stderr directly.
    let sentry = LoggingSentry::new(default_reporter());
    let startup = tracing_subscriber::fmt().with_writer(std::io::stderr).finish();
    tracing::subscriber::with_default(startup, || sentry.init_app(&mut app))
        .context("failed to set up Sentry logging")?;

    app.logging.try_init().context("failed to set up logging")?;

    let app = Arc::new(app);
    let listener = TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    tracing::info!(address = %cli.bind, debug = app.debug, "listening");

    axum::serve(listener, app::get_app(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(reporter) = sentry.reporter() {
        if !reporter.flush(Some(FLUSH_TIMEOUT)) {
            tracing::warn!("timed out flushing Sentry events");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
    tracing::info!("shutting down");
}
