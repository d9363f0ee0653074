//! HTTP request handlers for the weatherglass API.
//!
//! This module contains all the endpoint handlers for the web server and the
//! router that wires them together.

pub mod control;
pub mod heartbeat;
pub mod params;
pub mod preview;
pub mod reading;

pub use control::{manual_handler, mode_handler};
pub use heartbeat::heartbeat_handler;
pub use params::{params_handler, uniforms_handler};
pub use preview::preview_handler;
pub use reading::reading_handler;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::error::WeatherglassError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/params", get(params_handler))
        .route("/params/uniforms", get(uniforms_handler))
        .route("/reading", get(reading_handler))
        .route("/mode", post(mode_handler))
        .route("/manual", post(manual_handler))
        .route("/preview", get(preview_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .layer(
            ServiceBuilder::new()
                .layer(create_http_trace_layer())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Turn an error into a JSON error response and log it
pub(crate) fn error_response(
    error: &WeatherglassError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(error, endpoint, request_id, params);

    let status = match error {
        WeatherglassError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}
