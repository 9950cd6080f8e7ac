use std::sync::Arc;

use sentry::protocol::Event;
use sentry::ClientOptions;

const SUBSYSTEM_TAG: &str = "subsystem";

/// Subsystems the client can be told about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Integration {
    Web,
    TaskQueue,
    Database,
    Cache,
}

impl Integration {
    pub fn name(self) -> &'static str {
        match self {
            Integration::Web => "web",
            Integration::TaskQueue => "task_queue",
            Integration::Database => "database",
            Integration::Cache => "cache",
        }
    }

    /// Tracing targets emitted by the libraries of this subsystem.
    pub fn targets(self) -> &'static [&'static str] {
        match self {
            Integration::Web => &["axum", "hyper", "tower_http"],
            Integration::TaskQueue => &["apalis", "tokio_cron_scheduler"],
            Integration::Database => &["sqlx", "sea_orm", "diesel"],
            Integration::Cache => &["redis", "deadpool_redis", "bb8_redis"],
        }
    }

    pub fn matches(self, target: &str) -> bool {
        self.targets().iter().any(|prefix| {
            target == *prefix
                || target
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with("::"))
        })
    }

    pub fn into_sentry(self) -> Arc<dyn sentry::Integration> {
        Arc::new(SubsystemIntegration(self))
    }
}

/// Tags events logged from one of the subsystem's targets with
/// `subsystem = <name>`.
struct SubsystemIntegration(Integration);

impl sentry::Integration for SubsystemIntegration {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn process_event(
        &self,
        mut event: Event<'static>,
        _options: &ClientOptions,
    ) -> Option<Event<'static>> {
        let from_subsystem = event
            .logger
            .as_deref()
            .is_some_and(|logger| self.0.matches(logger));
        if from_subsystem {
            event
                .tags
                .entry(SUBSYSTEM_TAG.to_string())
                .or_insert_with(|| self.0.name().to_string());
        }
        Some(event)
    }
}
