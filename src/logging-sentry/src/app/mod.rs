mod application;
mod extensions;
mod logging;
mod request;

pub use application::{Application, ContextProcessor};
pub use extensions::Extensions;
pub use logging::{resolve_level, sentry_layer, LogHandler, Logger, Logging};
pub use request::RequestContext;
