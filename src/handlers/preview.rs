//! Palette preview endpoint.
//!
//! Returns a PNG rendering of a palette: either a swatch for one temperature
//! (the current one by default) or the ramp over the whole anchored range.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::error_response;
use crate::error::{Result, WeatherglassError};
use crate::logging::{generate_request_id, log_timed_operation};
use crate::mapper::CANVAS_SIZE;
use crate::palette::{encode_png, interpolated_palette, render_ramp, render_swatch};
use crate::state::AppState;

/// Largest accepted width or height
const MAX_DIMENSION: u32 = 2048;

/// Query parameters for preview endpoint
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Temperature in °C (defaults to the temperature currently rendered)
    pub temp: Option<f64>,
    /// Image width in pixels
    pub width: Option<u32>,
    /// Image height in pixels
    pub height: Option<u32>,
    /// "swatch" (default) or "ramp"
    pub kind: Option<String>,
}

fn checked_dimension(name: &str, value: Option<u32>) -> Result<u32> {
    let value = value.unwrap_or(CANVAS_SIZE);
    if value == 0 || value > MAX_DIMENSION {
        return Err(WeatherglassError::InvalidParameter {
            param: name.to_string(),
            message: format!("must be between 1 and {}, got {}", MAX_DIMENSION, value),
        });
    }
    Ok(value)
}

fn render_preview(state: &AppState, params: &PreviewQuery) -> Result<Vec<u8>> {
    let width = checked_dimension("width", params.width)?;
    let height = checked_dimension("height", params.height)?;

    let img = match params.kind.as_deref().unwrap_or("swatch") {
        "swatch" => {
            let temp = match params.temp {
                Some(t) if !t.is_finite() => {
                    return Err(WeatherglassError::InvalidParameter {
                        param: "temp".to_string(),
                        message: format!("must be a finite number, got {}", t),
                    });
                }
                Some(t) => t,
                None => state.current_params().temperature as f64,
            };
            render_swatch(&interpolated_palette(temp), width, height)
        }
        "ramp" => render_ramp(width, height),
        other => {
            return Err(WeatherglassError::InvalidParameter {
                param: "kind".to_string(),
                message: format!("Unknown preview kind: {}. Must be one of: swatch, ramp", other),
            });
        }
    };

    log_timed_operation("encode_preview", || encode_png(&img))
}

/// Handle GET /preview requests
pub async fn preview_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PreviewQuery>,
) -> Response {
    let request_id = generate_request_id();

    match render_preview(&state, &params) {
        Ok(bytes) => (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(error) => error_response(&error, "/preview", &request_id, Some(&format!("{:?}", params))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sampler::Sampler;
    use crate::visualization::LatestFrame;

    fn query(kind: Option<&str>, width: Option<u32>) -> PreviewQuery {
        PreviewQuery {
            temp: Some(10.0),
            width,
            height: None,
            kind: kind.map(str::to_string),
        }
    }

    #[test]
    fn test_render_preview() {
        let state = AppState::new(Config::default(), Sampler::new(), LatestFrame::new());

        let bytes = render_preview(&state, &query(None, None)).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        assert!(render_preview(&state, &query(Some("ramp"), Some(64))).is_ok());
        assert!(render_preview(&state, &query(Some("spiral"), None)).is_err());
        assert!(render_preview(&state, &query(None, Some(0))).is_err());
        assert!(render_preview(&state, &query(None, Some(4096))).is_err());
    }

    #[test]
    fn test_default_dimension_is_canvas_size() {
        assert_eq!(checked_dimension("width", None).unwrap(), 300);
    }
}
