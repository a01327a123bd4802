use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use pomodoro_widget::{
    create_router,
    services::SilentNotifier,
    state::{AppState, TimerConfig},
    TimerEngine,
};

fn app() -> (Router, TimerEngine) {
    let engine = TimerEngine::new(TimerConfig::default(), Arc::new(SilentNotifier));
    let state = Arc::new(AppState::new(engine.clone(), 0, "127.0.0.1".to_string()));
    (create_router(state), engine)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_status_renders_initial_state() {
    let (app, _engine) = app();
    let (status, body) = send(&app, "GET", "/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["clock"], "50:00");
    assert_eq!(body["timer"]["session_label"], "Work");
    assert_eq!(body["timer"]["is_running"], false);
    assert_eq!(body["last_action"], Value::Null);
}

#[tokio::test]
async fn test_start_and_pause() {
    let (app, engine) = app();

    let (_, body) = send(&app, "POST", "/start", None).await;
    assert_eq!(body["status"], "running");
    assert!(engine.snapshot().is_running());

    let (_, body) = send(&app, "POST", "/pause", None).await;
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["timer"]["remaining_seconds"], 3000);
}

#[tokio::test]
async fn test_skip_and_reset() {
    let (app, _engine) = app();

    let (_, body) = send(&app, "POST", "/skip", None).await;
    assert_eq!(body["timer"]["session"], "break");
    assert_eq!(body["timer"]["clock"], "10:00");
    assert_eq!(body["message"], "Skipped to Break session");

    let (_, body) = send(&app, "POST", "/reset", None).await;
    assert_eq!(body["timer"]["session"], "break");
    assert_eq!(body["timer"]["remaining_seconds"], 600);

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["last_action"], "reset");
}

#[tokio::test]
async fn test_duration_drafts_commit_and_clamp() {
    let (app, _engine) = app();

    let (_, body) = send(&app, "POST", "/work-duration", Some(json!({ "minutes": "25" }))).await;
    assert_eq!(body["timer"]["work_minutes"], 25);
    assert_eq!(body["timer"]["clock"], "25:00");

    let (_, body) = send(&app, "POST", "/break-duration", Some(json!({ "minutes": 90 }))).await;
    assert_eq!(body["timer"]["break_minutes"], 60);
    // Work countdown untouched by a break change
    assert_eq!(body["timer"]["clock"], "25:00");

    let (_, body) = send(&app, "POST", "/work-duration", Some(json!({ "minutes": "-4" }))).await;
    assert_eq!(body["timer"]["work_minutes"], 1);
}

#[tokio::test]
async fn test_unparseable_draft_is_ignored() {
    let (app, engine) = app();

    let (status, body) = send(&app, "POST", "/work-duration", Some(json!({ "minutes": "soon" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unchanged");
    assert_eq!(body["timer"]["work_minutes"], 50);
    assert_eq!(engine.snapshot().config().work_duration_seconds, 3000);
}

#[tokio::test]
async fn test_page_and_health() {
    let (app, _engine) = app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("id=\"clock\""));
    assert!(page.contains("/work-duration"));

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
