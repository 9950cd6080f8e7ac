mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{middleware, Extension, Json, Router};
use common::{app_with, RecordingReporter, DSN};
use logging_sentry::middleware::request_context;
use logging_sentry::{Application, ErrorReporter, LoggingSentry, RequestContext};
use sentry::protocol::Event;
use serde_json::{json, Map, Value};
use tower::ServiceExt;

fn router(app: Arc<Application>, reporter: Arc<RecordingReporter>) -> Router {
    Router::new()
        .route(
            "/",
            get(
                |State(app): State<Arc<Application>>, Extension(ctx): Extension<Arc<RequestContext>>| async move {
                    Json(app.template_context(&ctx))
                },
            ),
        )
        .route(
            "/error",
            get(
                move |State(app): State<Arc<Application>>, Extension(ctx): Extension<Arc<RequestContext>>| {
                    let reporter = Arc::clone(&reporter);
                    async move {
                        let event = reporter.capture(Event::default(), &ctx);
                        let tags = event.map(|event| event.tags).unwrap_or_default();
                        let mut body = app.template_context(&ctx);
                        body.insert("tags".into(), json!(tags));
                        (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
                    }
                },
            ),
        )
        .layer(middleware::from_fn_with_state(Arc::clone(&app), request_context))
        .with_state(app)
}

fn enabled_app() -> (Arc<Application>, Arc<RecordingReporter>) {
    let mut app = app_with(&[("SENTRY_DSN", json!(DSN))]);
    let reporter = RecordingReporter::new();
    LoggingSentry::new(Some(Arc::clone(&reporter) as Arc<dyn ErrorReporter>))
        .init_app(&mut app)
        .unwrap();
    (Arc::new(app), reporter)
}

async fn get_json(router: Router, uri: &str, request_id: Option<&str>) -> (StatusCode, Map<String, Value>) {
    let mut request = Request::builder().uri(uri);
    if let Some(request_id) = request_id {
        request = request.header("X-Request-ID", request_id);
    }
    let response = router
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_no_event_yields_null_event_id() {
    let (app, reporter) = enabled_app();

    let (status, body) = get_json(router(app, reporter), "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("sentry_event_id"), Some(&Value::Null));
}

#[tokio::test]
async fn test_captured_event_is_tagged_and_exposed() {
    let (app, reporter) = enabled_app();

    let (status, body) = get_json(router(app, Arc::clone(&reporter)), "/error", Some("req-99")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["tags"]["request_id"], json!("req-99"));
    assert_eq!(
        body["sentry_event_id"],
        json!(reporter.last_event_id().unwrap().to_string())
    );
}

#[tokio::test]
async fn test_request_without_id_is_not_tagged() {
    let (app, reporter) = enabled_app();

    let (_, body) = get_json(router(app, reporter), "/error", None).await;

    assert_eq!(body["tags"], json!({}));
    assert!(body["sentry_event_id"].is_string());
}

#[tokio::test]
async fn test_disabled_app_has_empty_template_context() {
    let mut app = app_with(&[]);
    let reporter = RecordingReporter::new();
    LoggingSentry::new(Some(Arc::clone(&reporter) as Arc<dyn ErrorReporter>))
        .init_app(&mut app)
        .unwrap();

    let (status, body) = get_json(router(Arc::new(app), reporter), "/", Some("req-1")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}
