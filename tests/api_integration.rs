//! Integration tests for the HTTP API.
//!
//! Requests are sent straight into the router without binding a socket.

use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use pomodoro_server::{
    create_router,
    state::{AppState, ControllerOptions},
    store::MemoryStore,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::time::{sleep, timeout};
use tower::ServiceExt;

fn router_with(store: MemoryStore) -> Router {
    let state = AppState::new(
        20554,
        "127.0.0.1".to_string(),
        Box::new(store),
        ControllerOptions::default(),
    );
    create_router(Arc::new(state))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Read the first server-sent event frame from `/events`
async fn first_event(router: &Router) -> (StatusCode, String) {
    let request = Request::builder().uri("/events").body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let mut body = response.into_body().into_data_stream();
    let mut frame = String::new();
    while !frame.contains("\n\n") {
        let chunk = timeout(Duration::from_secs(5), body.next())
            .await
            .expect("no event within 5s")
            .expect("event stream ended")
            .unwrap();
        frame.push_str(std::str::from_utf8(&chunk).unwrap());
    }
    (status, frame)
}

fn timer<'a>(snapshot: &'a Value, mode: &str) -> &'a Value {
    snapshot["timers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["mode"] == mode)
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let router = router_with(MemoryStore::new());
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn status_shows_fresh_timer() {
    let router = router_with(MemoryStore::new());
    let (status, body) = send(&router, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);

    let snapshot = &body["snapshot"];
    assert_eq!(snapshot["current_mode"], "pomodoro");
    assert_eq!(snapshot["session_count"], 0);

    let work = timer(snapshot, "pomodoro");
    assert_eq!(work["display"], "25:00");
    assert_eq!(work["action"], "start");
    assert_eq!(work["running"], false);
    assert_eq!(body["port"], 20554);
}

#[tokio::test]
async fn start_and_pause_a_countdown() {
    let router = router_with(MemoryStore::new());

    let (status, body) = send(&router, Method::POST, "/timer/short-break/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["snapshot"]["current_mode"], "short-break");
    assert_eq!(timer(&body["snapshot"], "short-break")["action"], "pause");

    let (status, body) = send(&router, Method::POST, "/timer/short-break/pause", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(timer(&body["snapshot"], "short-break")["running"], false);

    let (_, body) = send(&router, Method::GET, "/status", None).await;
    assert_eq!(body["last_action"], "pause");
}

#[tokio::test]
async fn press_toggles_the_button() {
    let router = router_with(MemoryStore::new());

    let (_, body) = send(&router, Method::POST, "/timer/pomodoro/press", None).await;
    assert_eq!(timer(&body["snapshot"], "pomodoro")["action"], "pause");

    let (_, body) = send(&router, Method::POST, "/timer/pomodoro/press", None).await;
    assert_eq!(timer(&body["snapshot"], "pomodoro")["action"], "start");
    assert_eq!(body["message"], "pomodoro button pressed, now shows start");
}

#[tokio::test]
async fn unknown_mode_is_not_found() {
    let router = router_with(MemoryStore::new());
    let (status, body) = send(&router, Method::POST, "/timer/nap/start", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Unknown timer mode: nap");

    let (status, _) = send(&router, Method::POST, "/mode/shortBreak", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn select_mode_switches_without_counting() {
    let router = router_with(MemoryStore::new());
    send(&router, Method::POST, "/timer/pomodoro/start", None).await;

    let (status, body) = send(&router, Method::POST, "/mode/long-break", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["snapshot"]["current_mode"], "long-break");
    assert_eq!(body["status"], "idle");

    let (_, stats) = send(&router, Method::GET, "/stats", None).await;
    assert_eq!(stats["total"], 0);
    assert_eq!(stats["session_count"], 0);
}

#[tokio::test]
async fn settings_are_clamped_persisted_and_applied() {
    let store = MemoryStore::new();
    let router = router_with(store.clone());
    send(&router, Method::POST, "/timer/pomodoro/start", None).await;

    let update = json!({ "pomodoro": 99, "short-break": 0, "font": "roboto-slab", "color": "cyan" });
    let (status, body) = send(&router, Method::PUT, "/settings", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["settings"]["pomodoro"], 60);
    assert_eq!(body["settings"]["short-break"], 1);
    assert_eq!(body["settings"]["long-break"], 15);
    assert_eq!(body["font_css_var"], "--font-roboto");
    assert_eq!(body["color_css_var"], "--clr-cyan");

    assert_eq!(store.get("pomodoro").as_deref(), Some("60"));
    assert_eq!(store.get("font").as_deref(), Some("roboto-slab"));

    let (_, body) = send(&router, Method::GET, "/status", None).await;
    let work = timer(&body["snapshot"], "pomodoro");
    assert_eq!(work["running"], false);
    assert_eq!(work["display"], "60:00");

    let (_, body) = send(&router, Method::GET, "/settings", None).await;
    assert_eq!(body["settings"]["color"], "cyan");
}

#[tokio::test]
async fn bad_settings_body_is_rejected() {
    let router = router_with(MemoryStore::new());
    let (status, _) = send(&router, Method::PUT, "/settings", Some(json!({ "font": "papyrus" }))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn stats_come_from_the_store() {
    let store = MemoryStore::with_entries([
        ("sessionCount", "6"),
        ("pomodoroCount", "6"),
        ("shortBreakCount", "4"),
        ("longBreakCount", "1"),
    ]);
    let router = router_with(store);

    let (status, body) = send(&router, Method::GET, "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["pomodoro"], 6);
    assert_eq!(body["stats"]["short-break"], 4);
    assert_eq!(body["stats"]["long-break"], 1);
    assert_eq!(body["session_count"], 6);
    assert_eq!(body["total"], 11);
}

#[tokio::test(start_paused = true)]
async fn reset_reloads_a_running_countdown() {
    let router = router_with(MemoryStore::new());
    send(&router, Method::POST, "/timer/pomodoro/start", None).await;
    sleep(Duration::from_millis(2500)).await;

    let (_, body) = send(&router, Method::GET, "/status", None).await;
    assert_eq!(timer(&body["snapshot"], "pomodoro")["display"], "24:58");

    let (status, body) = send(&router, Method::POST, "/timer/pomodoro/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["message"], "pomodoro countdown reset");
    let work = timer(&body["snapshot"], "pomodoro");
    assert_eq!(work["display"], "25:00");
    assert_eq!(work["running"], false);
    assert_eq!(work["action"], "start");

    sleep(Duration::from_secs(3)).await;
    let (_, body) = send(&router, Method::GET, "/status", None).await;
    assert_eq!(timer(&body["snapshot"], "pomodoro")["remaining_seconds"], 1500);

    let (status, _) = send(&router, Method::POST, "/timer/nap/reset", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn events_stream_starts_with_the_current_snapshot() {
    let router = router_with(MemoryStore::new());
    send(&router, Method::POST, "/timer/short-break/start", None).await;

    let (status, frame) = first_event(&router).await;
    assert_eq!(status, StatusCode::OK);
    assert!(frame.contains("event: snapshot"), "unexpected frame: {frame}");

    let data = frame
        .lines()
        .find_map(|line| line.strip_prefix("data:"))
        .expect("frame has no data line");
    let snapshot: Value = serde_json::from_str(data.trim()).unwrap();
    assert_eq!(snapshot["current_mode"], "short-break");
    assert_eq!(timer(&snapshot, "short-break")["running"], true);
}
