use std::sync::Arc;

use axum::{middleware, Router};
use logging_sentry::middleware::request_context;
use logging_sentry::Application;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::routes::ROUTES;

pub fn get_app(app: Arc<Application>) -> Router {
    let mut router = Router::new();
    for (path, method_router) in ROUTES.iter() {
        router = router.route(path, method_router.clone());
    }
    router
        .layer(middleware::from_fn_with_state(
            Arc::clone(&app),
            request_context,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(app)
}
