use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use sentry::SentryFutureExt;

use crate::app::{Application, RequestContext};
use crate::constants::{EXTENSION_NAME, REQUEST_ID_HEADER};
use crate::extension::LoggingSentry;
use crate::reporter::ErrorReporter;

/// Creates the [`RequestContext`] of each request.
///
/// The context is stored in the request extensions, so handlers can take an
/// `Extension<Arc<RequestContext>>`. When Sentry logging is enabled on `app`
/// the request runs on its own hub, whose events pass through the
/// before-send hook with this context.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use axum::{middleware, Router};
/// # use logging_sentry::{middleware::request_context, AppConfig, Application};
/// let app = Arc::new(Application::new("app", AppConfig::new()));
/// let router: Router = Router::new()
///     .layer(middleware::from_fn_with_state(Arc::clone(&app), request_context));
/// ```
pub async fn request_context(
    State(app): State<Arc<Application>>,
    mut request: Request,
    next: Next,
) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    let ctx = Arc::new(RequestContext::new(request_id));
    request.extensions_mut().insert(Arc::clone(&ctx));

    let hub = app
        .extensions
        .get::<LoggingSentry>(EXTENSION_NAME)
        .and_then(|sentry| sentry.reporter().cloned())
        .and_then(|reporter| reporter.bind_request(ctx));

    match hub {
        Some(hub) => next.run(request).bind_hub(hub).await,
        None => next.run(request).await,
    }
}
