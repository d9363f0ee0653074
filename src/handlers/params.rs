//! Rendering parameter endpoints.
//!
//! Returns the parameter set the renderer should draw with: the last frame
//! the frame loop produced, or a freshly mapped one before the first frame.

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use crate::logging::generate_request_id;
use crate::mapper::{RenderParams, Uniform};
use crate::state::AppState;

/// Handle GET /params requests
pub async fn params_handler(State(state): State<Arc<AppState>>) -> Json<RenderParams> {
    let request_id = generate_request_id();
    let params = state.current_params();

    debug!(
        endpoint = "/params",
        request_id = %request_id,
        temperature = params.temperature,
        lens_count = params.lens_count,
        fallback = params.fallback,
        "Serving render parameters"
    );

    Json(params)
}

/// Handle GET /params/uniforms requests
pub async fn uniforms_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Uniform>> {
    Json(state.current_params().uniforms())
}
