//! Environment sampler.
//!
//! The sampler owns the current live and manual readings and the Live/Manual
//! mode switch. A background task polls a [`WeatherSource`] on a fixed
//! interval; that task keeps running whichever mode is active, and only the
//! active mode's reading is handed to the mapper.
//!
//! Readings are replaced whole under a write lock and copied out under a read
//! lock, so a consumer only ever sees a fully formed reading.

pub mod source;

pub use source::{HttpWeatherSource, WeatherSource};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::error::{Result, WeatherglassError};
use crate::logging::{log_fetch_failure, log_reading};
use crate::reading::Reading;

/// Shortest poll period; `tokio::time::interval` rejects zero
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Which reading feeds the mapper
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Live,
    Manual,
}

impl FromStr for Mode {
    type Err = WeatherglassError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(Mode::Live),
            "manual" => Ok(Mode::Manual),
            _ => Err(WeatherglassError::InvalidParameter {
                param: "mode".to_string(),
                message: format!("Unknown mode: {}. Must be one of: live, manual", s),
            }),
        }
    }
}

/// Counters for the live poll
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PollStats {
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub last_error_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct SamplerState {
    mode: Mode,
    live: Option<Reading>,
    manual: Reading,
    closed: bool,
    stats: PollStats,
}

/// Shared handle to the sampler state. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Sampler {
    inner: Arc<RwLock<SamplerState>>,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler {
    /// A sampler in Live mode with no live reading yet and the default
    /// manual reading (20 °C, 50 %)
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SamplerState {
                mode: Mode::default(),
                live: None,
                manual: Reading::default_manual(),
                closed: false,
                stats: PollStats::default(),
            })),
        }
    }

    pub fn mode(&self) -> Mode {
        self.inner.read().mode
    }

    /// Switch modes. The poll task is not touched.
    pub fn set_mode(&self, mode: Mode) {
        let mut state = self.inner.write();
        if state.mode != mode {
            info!(from = ?state.mode, to = ?mode, "Sampler mode changed");
            state.mode = mode;
        }
    }

    /// The active mode's reading, if one exists
    pub fn current(&self) -> Option<Reading> {
        let state = self.inner.read();
        match state.mode {
            Mode::Live => state.live,
            Mode::Manual => Some(state.manual),
        }
    }

    pub fn live_reading(&self) -> Option<Reading> {
        self.inner.read().live
    }

    pub fn manual_reading(&self) -> Reading {
        self.inner.read().manual
    }

    /// Replace the manual reading from operator-supplied values.
    ///
    /// Temperature is clamped to [-20, 50] °C and humidity to [0, 100] %.
    pub fn set_manual_reading(&self, temperature_c: f64, humidity_percent: f64) -> Result<Reading> {
        let reading = Reading::manual(temperature_c, humidity_percent)?;
        self.inner.write().manual = reading;
        log_reading(&reading);
        Ok(reading)
    }

    /// Store a fresh live reading. Returns `false` and leaves the state alone
    /// once the sampler has been closed.
    pub fn apply_live(&self, reading: Reading) -> bool {
        let mut state = self.inner.write();
        if state.closed {
            return false;
        }
        state.live = Some(reading);
        state.stats.successes += 1;
        state.stats.last_success_at = Some(reading.observed_at);
        true
    }

    /// Record a failed fetch. The previous live reading is kept.
    pub fn record_failure(&self, error: &WeatherglassError) -> bool {
        let mut state = self.inner.write();
        if state.closed {
            return false;
        }
        state.stats.failures += 1;
        state.stats.last_error = Some(error.to_string());
        state.stats.last_error_at = Some(Utc::now());
        true
    }

    pub fn stats(&self) -> PollStats {
        self.inner.read().stats.clone()
    }

    /// Stop accepting live readings
    pub fn close(&self) {
        self.inner.write().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.read().closed
    }

    /// Fetch once from `source` and apply the result.
    ///
    /// Returns `true` when a new live reading was stored. Failures are logged
    /// and recorded, never returned; a result arriving after [`Sampler::close`]
    /// is dropped.
    pub async fn poll_once<S: WeatherSource>(&self, source: &S) -> bool {
        {
            let mut state = self.inner.write();
            if state.closed {
                return false;
            }
            state.stats.attempts += 1;
        }

        match source.fetch().await {
            Ok(reading) => {
                if self.apply_live(reading) {
                    log_reading(&reading);
                    true
                } else {
                    debug!("Discarding weather reading delivered after teardown");
                    false
                }
            }
            Err(error) => {
                if self.record_failure(&error) {
                    log_fetch_failure(&error, &source.describe());
                }
                false
            }
        }
    }

    /// Spawn the poll task: one fetch immediately, then one per `interval`.
    ///
    /// Intervals shorter than 1 ms are raised to 1 ms. Must be called from
    /// within a tokio runtime.
    pub fn start<S>(&self, source: S, interval: Duration) -> SamplerHandle
    where
        S: WeatherSource + 'static,
    {
        let interval = interval.max(MIN_POLL_INTERVAL);
        let sampler = self.clone();
        info!(
            source = %source.describe(),
            interval_secs = interval.as_secs(),
            "Starting weather poll"
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                sampler.poll_once(&source).await;
            }
        });

        SamplerHandle {
            sampler: self.clone(),
            task: Some(task),
        }
    }
}

/// Owner of a running poll task. Tearing it down (or dropping it) closes the
/// sampler and cancels the task.
#[derive(Debug)]
pub struct SamplerHandle {
    sampler: Sampler,
    task: Option<JoinHandle<()>>,
}

impl SamplerHandle {
    /// A handle with no poll task, for manual-only use
    pub fn detached(sampler: Sampler) -> Self {
        Self {
            sampler,
            task: None,
        }
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn is_polling(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Close the sampler and cancel the poll task. Idempotent.
    pub fn teardown(&mut self) {
        self.sampler.close();
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Weather poll cancelled");
        }
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}
