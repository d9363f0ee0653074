//! Heartbeat endpoint handler.
//!
//! Returns server status information: uptime, the sampler mode and the
//! live poll counters.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::SystemTime;
use uuid::Uuid;

use crate::sampler::{Mode, PollStats};
use crate::state::AppState;

/// Server ID, unique per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Active sampler mode
    pub mode: Mode,
    /// Whether frames are currently driven by the fallback signal
    pub fallback_active: bool,
    /// Seconds between weather polls
    pub poll_interval_seconds: u64,
    /// Live poll counters
    pub poll: PollStats,
    /// Server status
    pub status: String,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let uptime = state.started.elapsed();

    let status = if state.sampler.is_closed() {
        "stopped"
    } else {
        "healthy"
    };

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        mode: state.sampler.mode(),
        fallback_active: state.sampler.current().is_none(),
        poll_interval_seconds: state.config.weather.poll_interval_secs,
        poll: state.sampler.stats(),
        status: status.to_string(),
    })
}
