//! Manual control surface: the Live/Manual toggle and the manual sliders.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::error_response;
use super::reading::ReadingStatus;
use crate::logging::generate_request_id;
use crate::sampler::Mode;
use crate::state::AppState;

/// Body for POST /mode
#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: Mode,
}

/// Body for POST /manual
#[derive(Debug, Deserialize)]
pub struct ManualRequest {
    /// Degrees Celsius, clamped to [-20, 50]
    pub temperature_c: f64,
    /// Percent, clamped to [0, 100]
    pub humidity_percent: f64,
}

/// Handle POST /mode requests
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> Json<ReadingStatus> {
    state.sampler.set_mode(request.mode);
    Json(ReadingStatus::from_state(&state))
}

/// Handle POST /manual requests
pub async fn manual_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ManualRequest>,
) -> Response {
    let request_id = generate_request_id();

    match state
        .sampler
        .set_manual_reading(request.temperature_c, request.humidity_percent)
    {
        Ok(reading) => {
            info!(
                endpoint = "/manual",
                request_id = %request_id,
                temperature_c = reading.temperature_c,
                humidity = reading.humidity,
                "Manual reading set"
            );
            Json(ReadingStatus::from_state(&state)).into_response()
        }
        Err(error) => error_response(
            &error,
            "/manual",
            &request_id,
            Some(&format!(
                "temperature_c={}, humidity_percent={}",
                request.temperature_c, request.humidity_percent
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sampler::Sampler;
    use crate::visualization::LatestFrame;
    use axum::http::StatusCode;

    fn test_state() -> Arc<AppState> {
        AppState::new_shared(Config::default(), Sampler::new(), LatestFrame::new())
    }

    #[test]
    fn test_mode_request_parsing() {
        let request: ModeRequest = serde_json::from_str(r#"{"mode": "manual"}"#).unwrap();
        assert_eq!(request.mode, Mode::Manual);
        assert!(serde_json::from_str::<ModeRequest>(r#"{"mode": "auto"}"#).is_err());
    }

    #[tokio::test]
    async fn test_mode_handler_switches() {
        let state = test_state();
        let Json(status) = mode_handler(
            State(state.clone()),
            Json(ModeRequest { mode: Mode::Manual }),
        )
        .await;

        assert_eq!(status.mode, Mode::Manual);
        assert_eq!(state.sampler.mode(), Mode::Manual);
    }

    #[tokio::test]
    async fn test_manual_handler_clamps() {
        let state = test_state();
        let response = manual_handler(
            State(state.clone()),
            Json(ManualRequest {
                temperature_c: 70.0,
                humidity_percent: 120.0,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let manual = state.sampler.manual_reading();
        assert_eq!(manual.temperature_c, 50.0);
        assert_eq!(manual.humidity, 1.0);
    }

    #[tokio::test]
    async fn test_manual_handler_rejects_non_finite() {
        let state = test_state();
        let response = manual_handler(
            State(state.clone()),
            Json(ManualRequest {
                temperature_c: f64::NAN,
                humidity_percent: 50.0,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.sampler.manual_reading().temperature_c, 20.0);
    }
}
