use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use logging_sentry::{Application, RequestContext};

pub const INDEX_ENDPOINT: &str = "/";

/// Renders the template context of the request.
pub async fn index(
    State(app): State<Arc<Application>>,
    Extension(ctx): Extension<Arc<RequestContext>>,
) -> impl IntoResponse {
    Json(app.template_context(&ctx))
}
