use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use exam_clock::{
    create_router,
    state::AppState,
    storage::{KeyValueStore, MemoryStore},
};

fn test_app(store: Arc<MemoryStore>) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), store, 10, true));
    (create_router(Arc::clone(&state)), state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json")
    };
    (status, value)
}

#[tokio::test]
async fn timer_starts_from_configured_duration() {
    let (app, _state) = test_app(Arc::new(MemoryStore::new()));

    let (status, timer) = send(&app, "GET", "/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(timer["configured_seconds"], 600);
    assert_eq!(timer["remaining_seconds"], 600);
    assert_eq!(timer["phase"], "stopped");
    assert_eq!(timer["display"], "00:10:00");

    let (status, response) = send(&app, "POST", "/timer/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "applied");
    assert_eq!(response["timer"]["is_running"], true);
    assert_eq!(response["timer"]["phase"], "running");
}

#[tokio::test]
async fn edits_are_ignored_while_running() {
    let (app, _state) = test_app(Arc::new(MemoryStore::new()));
    send(&app, "POST", "/timer/start", None).await;

    let (status, response) = send(&app, "POST", "/timer/adjust", Some(json!({ "delta_seconds": -60 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ignored");
    assert_eq!(response["timer"]["remaining_seconds"], 600);

    let (_, response) = send(&app, "POST", "/timer/remaining", Some(json!({ "seconds": 5 }))).await;
    assert_eq!(response["status"], "ignored");

    let (_, response) = send(&app, "POST", "/timer/stop", None).await;
    assert_eq!(response["status"], "applied");
    let (_, response) = send(&app, "POST", "/timer/stop", None).await;
    assert_eq!(response["status"], "ignored");
}

#[tokio::test]
async fn adjust_clamps_to_bounds() {
    let (app, _state) = test_app(Arc::new(MemoryStore::new()));

    let (_, response) = send(&app, "POST", "/timer/adjust", Some(json!({ "delta_seconds": 60 }))).await;
    assert_eq!(response["timer"]["remaining_seconds"], 600);

    let (_, response) = send(&app, "POST", "/timer/adjust", Some(json!({ "delta_seconds": -650 }))).await;
    assert_eq!(response["timer"]["remaining_seconds"], 0);
    assert_eq!(response["timer"]["phase"], "expired");

    let (_, response) = send(&app, "POST", "/timer/start", None).await;
    assert_eq!(response["status"], "ignored");

    let (_, response) = send(&app, "POST", "/timer/reset", None).await;
    assert_eq!(response["timer"]["remaining_seconds"], 600);
}

#[tokio::test]
async fn direct_edit_raises_reset_target() {
    let (app, _state) = test_app(Arc::new(MemoryStore::new()));

    let (_, response) = send(
        &app,
        "POST",
        "/timer/remaining",
        Some(json!({ "hours": "0", "minutes": 15, "seconds": "x" })),
    )
    .await;
    assert_eq!(response["status"], "applied");
    assert_eq!(response["timer"]["remaining_seconds"], 900);
    assert_eq!(response["timer"]["configured_seconds"], 900);

    send(&app, "POST", "/timer/adjust", Some(json!({ "delta_seconds": -300 }))).await;
    let (_, response) = send(&app, "POST", "/timer/reset", None).await;
    assert_eq!(response["timer"]["remaining_seconds"], 900);

    let (_, response) = send(&app, "POST", "/timer/remaining", Some(json!({ "seconds": -20 }))).await;
    assert_eq!(response["timer"]["remaining_seconds"], 0);
    assert_eq!(response["timer"]["configured_seconds"], 900);
}

#[tokio::test]
async fn exam_setup_reconfigures_timer() {
    let store = Arc::new(MemoryStore::new());
    let (app, _state) = test_app(store.clone());

    let (_, mut exam) = send(&app, "GET", "/exam", None).await;
    assert_eq!(exam["durationMinutes"], 10);
    exam["durationMinutes"] = json!(20);
    exam["subject"] = json!("Physics");

    let (status, response) = send(&app, "PUT", "/exam", Some(exam)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["timer_reconfigured"], true);
    assert_eq!(response["timer"]["remaining_seconds"], 1200);
    assert_eq!(response["duration_label"], "20 分鐘");

    let saved: Value = serde_json::from_str(&store.get("examDetails").unwrap().unwrap()).unwrap();
    assert_eq!(saved["subject"], "Physics");
    assert_eq!(store.get("timerInitialSeconds").unwrap().as_deref(), Some("1200"));
}

#[tokio::test]
async fn exam_setup_is_ignored_by_running_timer() {
    let (app, _state) = test_app(Arc::new(MemoryStore::new()));
    send(&app, "POST", "/timer/start", None).await;

    let (_, mut exam) = send(&app, "GET", "/exam", None).await;
    exam["durationMinutes"] = json!(20);
    let (_, response) = send(&app, "PUT", "/exam", Some(exam)).await;

    assert_eq!(response["timer_reconfigured"], false);
    assert_eq!(response["timer"]["configured_seconds"], 600);
    assert_eq!(response["exam"]["durationMinutes"], 20);
}

#[tokio::test]
async fn presets_follow_display_language() {
    let (app, _state) = test_app(Arc::new(MemoryStore::new()));

    let (status, settings) = send(&app, "PUT", "/settings", Some(json!({ "language": "en", "font_scale": 9.0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["language"], "en");
    assert_eq!(settings["font_scale"], 1.5);

    let (_, presets) = send(&app, "GET", "/presets", None).await;
    let first = &presets.as_array().expect("array")[0];
    assert_eq!(first["id"], "va_1_2");
    assert_eq!(first["durationMinutes"], 240);
    assert_eq!(first["duration_label"], "4 hours");

    let (status, response) = send(&app, "POST", "/presets/econ_2/apply", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["exam"]["durationMinutes"], 150);
    assert_eq!(response["duration_label"], "2 hours 30 minutes");
    assert_eq!(response["timer"]["display"], "02:30:00");

    let (status, _) = send(&app, "POST", "/presets/unknown/apply", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_reports_last_action() {
    let (app, _state) = test_app(Arc::new(MemoryStore::new()));
    send(&app, "POST", "/timer/reset", None).await;

    let (status, response) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["last_action"], "reset");
    assert_eq!(response["timer"]["remaining_seconds"], 600);
    assert_eq!(response["settings"]["language"], "zh-hk");

    let clock = response["current_time"].as_str().unwrap();
    assert!(chrono::NaiveTime::parse_from_str(clock, "%H:%M:%S").is_ok(), "{clock}");

    let (status, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (app, state) = test_app(Arc::new(MemoryStore::new()));

    let (status, _) = send(&app, "POST", "/timer/adjust", Some(json!({ "delta_seconds": "lots" }))).await;
    assert!(status.is_client_error());
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 600);
}
