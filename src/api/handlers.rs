//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info};

use crate::state::{AppState, Mode, SettingsUpdate, Snapshot};
use super::responses::{
    ApiError, ApiResponse, HealthResponse, SettingsResponse, StatsResponse, StatusResponse,
};

fn parse_mode(raw: &str) -> Result<Mode, ApiError> {
    raw.parse().map_err(ApiError::UnknownMode)
}

/// Log an internal failure and turn it into a 500
fn internal(context: &str) -> impl FnOnce(String) -> ApiError + '_ {
    move |e| {
        error!("Failed to {}: {}", context, e);
        ApiError::Internal
    }
}

fn respond(message: String, snapshot: Snapshot) -> Json<ApiResponse> {
    Json(ApiResponse::from_snapshot(message, snapshot))
}

/// Handle POST /timer/:mode/start - Start a countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let mode = parse_mode(&mode)?;
    let snapshot = state.start(mode).map_err(internal("start countdown"))?;
    Ok(respond(format!("{} countdown started", mode), snapshot))
}

/// Handle POST /timer/:mode/pause - Pause a countdown
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let mode = parse_mode(&mode)?;
    let snapshot = state.pause(mode).map_err(internal("pause countdown"))?;
    info!("Pause endpoint called for {}", mode);
    Ok(respond(format!("{} countdown paused", mode), snapshot))
}

/// Handle POST /timer/:mode/reset - Reload a countdown with its configured duration
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let mode = parse_mode(&mode)?;
    let snapshot = state.reset(mode).map_err(internal("reset countdown"))?;
    info!("Reset endpoint called for {}", mode);
    Ok(respond(format!("{} countdown reset", mode), snapshot))
}

/// Handle POST /timer/:mode/press - The panel's start/pause/restart button
pub async fn press_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let mode = parse_mode(&mode)?;
    let snapshot = state.press(mode).map_err(internal("press timer button"))?;
    let action = snapshot
        .timer(mode)
        .map(|t| t.action.label())
        .unwrap_or("start");
    Ok(respond(format!("{} button pressed, now shows {}", mode, action), snapshot))
}

/// Handle POST /mode/:mode - Manually switch mode
pub async fn select_mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let mode = parse_mode(&mode)?;
    let snapshot = state.select_mode(mode).map_err(internal("select mode"))?;
    Ok(respond(format!("Switched to {}", mode), snapshot))
}

/// Handle GET /settings - Current settings
pub async fn get_settings_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let snapshot = state.snapshot().map_err(internal("read settings"))?;
    Ok(Json(SettingsResponse::new(snapshot.settings)))
}

/// Handle PUT /settings - Apply the settings form and reset every countdown
pub async fn put_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let (settings, _) = state.apply_settings(&update).map_err(internal("apply settings"))?;
    info!("Settings endpoint called - settings applied");
    Ok(Json(SettingsResponse::new(settings)))
}

/// Handle GET /stats - Completed-session statistics
pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let snapshot = state.snapshot().map_err(internal("read statistics"))?;
    Ok(Json(StatsResponse {
        total: snapshot.stats.total(),
        stats: snapshot.stats,
        session_count: snapshot.session_count,
    }))
}

/// Handle GET /status - Return the full timer snapshot
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let snapshot = state.snapshot().map_err(internal("get snapshot"))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        snapshot,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream a snapshot on every change
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = stream::unfold((state.subscribe(), true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let snapshot = rx.borrow_and_update().clone();
        let event = Event::default().event("snapshot").json_data(&snapshot);
        Some((event, (rx, false)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
