use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use logging_sentry::{Application, RequestContext};
use serde_json::Value;

pub const ERROR_ENDPOINT: &str = "/error";

const ERROR_MESSAGE: &str = "something went wrong";

/// Logs an error, which the Sentry handler reports, and renders the error
/// page context including the id of the reported event.
pub async fn error(
    State(app): State<Arc<Application>>,
    Extension(ctx): Extension<Arc<RequestContext>>,
) -> impl IntoResponse {
    tracing::error!(request_id = ctx.request_id(), "{ERROR_MESSAGE}");

    let mut context = app.template_context(&ctx);
    context.insert("error".to_string(), Value::from(ERROR_MESSAGE));
    (StatusCode::INTERNAL_SERVER_ERROR, Json(context))
}
