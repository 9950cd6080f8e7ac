use serde_json::{Map, Value};

use crate::app::{Extensions, Logging, RequestContext};
use crate::config::AppConfig;
use crate::constants::DEBUG;

/// Builds the template variables contributed by one extension.
pub type ContextProcessor = Box<dyn Fn(&RequestContext) -> Map<String, Value> + Send + Sync>;

/// The host application extensions plug into.
pub struct Application {
    pub name: String,
    pub debug: bool,
    pub config: AppConfig,
    pub logging: Logging,
    pub extensions: Extensions,
    context_processors: Vec<ContextProcessor>,
}

impl Application {
    /// Debug mode is taken from the `DEBUG` setting when present.
    pub fn new(name: impl Into<String>, config: AppConfig) -> Self {
        let debug = config.get(DEBUG).and_then(Value::as_bool).unwrap_or(false);

        Self {
            name: name.into(),
            debug,
            config,
            logging: Logging::default(),
            extensions: Extensions::default(),
            context_processors: Vec::new(),
        }
    }

    pub fn context_processor<F>(&mut self, processor: F)
    where
        F: Fn(&RequestContext) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.context_processors.push(Box::new(processor));
    }

    pub fn context_processor_count(&self) -> usize {
        self.context_processors.len()
    }

    /// Variables available to templates rendered for the request. Later
    /// processors win on duplicate keys.
    pub fn template_context(&self, ctx: &RequestContext) -> Map<String, Value> {
        let mut context = Map::new();
        for processor in &self.context_processors {
            context.extend(processor(ctx));
        }
        context
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("debug", &self.debug)
            .field("config", &self.config)
            .field("logging", &self.logging)
            .field("extensions", &self.extensions)
            .field("context_processors", &self.context_processors.len())
            .finish()
    }
}
