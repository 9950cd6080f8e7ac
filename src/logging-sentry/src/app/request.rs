use std::sync::{Mutex, PoisonError};

use sentry::types::Uuid;

/// State tied to one in-flight request.
///
/// Created by [`crate::middleware::request_context`] and handed to the
/// before-send hook and to context processors explicitly.
#[derive(Debug, Default)]
pub struct RequestContext {
    request_id: Option<String>,
    sentry_event_id: Mutex<Option<Uuid>>,
}

impl RequestContext {
    pub fn new(request_id: Option<String>) -> Self {
        Self {
            request_id,
            sentry_event_id: Mutex::new(None),
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Id of the last event reported while handling this request.
    pub fn sentry_event_id(&self) -> Option<Uuid> {
        *self
            .sentry_event_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_sentry_event_id(&self, event_id: Uuid) {
        *self
            .sentry_event_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(event_id);
    }
}
