//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{SessionStats, Settings, Snapshot};

/// API response structure for timer operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub snapshot: Snapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, snapshot: Snapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            snapshot,
        }
    }

    /// Status is `running` while any countdown runs, `idle` otherwise
    pub fn from_snapshot(message: String, snapshot: Snapshot) -> Self {
        let status = if snapshot.running().is_some() { "running" } else { "idle" };
        Self::new(status.to_string(), message, snapshot)
    }
}

/// Full status with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub snapshot: Snapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Settings with the CSS custom properties the front end applies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub settings: Settings,
    pub font_css_var: String,
    pub color_css_var: String,
}

impl SettingsResponse {
    pub fn new(settings: Settings) -> Self {
        Self {
            font_css_var: settings.font.css_var().to_string(),
            color_css_var: settings.color.css_var().to_string(),
            settings,
        }
    }
}

/// Completed-session statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub stats: SessionStats,
    pub session_count: u64,
    pub total: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error body returned for failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Request failures and the status codes they map to
#[derive(Debug)]
pub enum ApiError {
    UnknownMode(String),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            ApiError::UnknownMode(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = ErrorResponse {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        };
        (code, Json(body)).into_response()
    }
}
