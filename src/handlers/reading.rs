//! Reading status endpoint.
//!
//! Reports the mode, both readings, the display conversions the control
//! surface shows, and the live poll counters.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::mapper::SpeedModifier;
use crate::reading::{Reading, ReadingSource};
use crate::sampler::{Mode, PollStats};
use crate::state::AppState;
use crate::units::celsius_to_fahrenheit;

/// A reading plus its display conversions
#[derive(Debug, Serialize)]
pub struct ReadingView {
    pub source: ReadingSource,
    pub temperature_c: f64,
    /// Fahrenheit, rounded to a whole degree for display
    pub temperature_f: i64,
    pub humidity_percent: f64,
    pub pressure_ratio: Option<f64>,
    pub wind_ratio: f64,
    pub observed_at: String,
}

impl From<&Reading> for ReadingView {
    fn from(reading: &Reading) -> Self {
        Self {
            source: reading.source,
            temperature_c: reading.temperature_c,
            temperature_f: celsius_to_fahrenheit(reading.temperature_c).round() as i64,
            humidity_percent: reading.humidity_percent(),
            pressure_ratio: reading.pressure_ratio,
            wind_ratio: reading.wind_ratio,
            observed_at: reading.observed_at.to_rfc3339(),
        }
    }
}

/// Response for GET /reading
#[derive(Debug, Serialize)]
pub struct ReadingStatus {
    pub mode: Mode,
    /// The reading feeding the visualization, None while the fallback runs
    pub active: Option<ReadingView>,
    pub live: Option<ReadingView>,
    pub manual: ReadingView,
    pub speed_modifier: SpeedModifier,
    pub speed_label: &'static str,
    pub poll: PollStats,
}

impl ReadingStatus {
    pub fn from_state(state: &AppState) -> Self {
        let sampler = &state.sampler;
        let manual = sampler.manual_reading();
        let speed_modifier = SpeedModifier::from_humidity_percent(manual.humidity_percent());

        Self {
            mode: sampler.mode(),
            active: sampler.current().as_ref().map(ReadingView::from),
            live: sampler.live_reading().as_ref().map(ReadingView::from),
            manual: ReadingView::from(&manual),
            speed_modifier,
            speed_label: speed_modifier.label(),
            poll: sampler.stats(),
        }
    }
}

/// Handle GET /reading requests
pub async fn reading_handler(State(state): State<Arc<AppState>>) -> Json<ReadingStatus> {
    Json(ReadingStatus::from_state(&state))
}
