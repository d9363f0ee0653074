//! Environmental readings and the weather endpoint's JSON body.
//!
//! A [`Reading`] is a complete, immutable sample. Producers build a new value
//! and replace the previous one; nothing mutates a reading field by field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherglassError};
use crate::palette::{MAX_TEMPERATURE_C, MIN_TEMPERATURE_C};
use crate::units::{fahrenheit_to_celsius, percent_to_fraction, pressure_ratio, wind_ratio};

/// Default manual temperature in degrees Celsius
pub const DEFAULT_MANUAL_TEMPERATURE_C: f64 = 20.0;

/// Default manual relative humidity in percent
pub const DEFAULT_MANUAL_HUMIDITY_PERCENT: f64 = 50.0;

/// Where a reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSource {
    /// Polled from the weather endpoint
    Live,
    /// Set by an operator
    Manual,
}

/// A single environmental sample driving the visualization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature in degrees Celsius
    pub temperature_c: f64,
    /// Relative humidity as a fraction in [0, 1]
    pub humidity: f64,
    /// Pressure relative to sea level, absent when the source did not report it
    pub pressure_ratio: Option<f64>,
    /// Wind speed relative to 50 mph, 0 when unavailable
    pub wind_ratio: f64,
    /// Provenance of the reading
    pub source: ReadingSource,
    /// When the reading was produced
    pub observed_at: DateTime<Utc>,
}

/// The `main` block of a weather response (imperial units)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MainBlock {
    /// Temperature in degrees Fahrenheit
    #[serde(default)]
    pub temp: Option<f64>,
    /// Relative humidity in percent
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Pressure in hPa
    #[serde(default)]
    pub pressure: Option<f64>,
}

/// The `wind` block of a weather response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindBlock {
    /// Wind speed in mph
    #[serde(default)]
    pub speed: Option<f64>,
}

/// Subset of the weather endpoint's body that the sampler consumes.
///
/// Every field is optional at the serde level so a missing block produces a
/// [`WeatherglassError::MalformedReading`] naming the field instead of a
/// generic decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub wind: Option<WindBlock>,
}

impl Reading {
    /// Build a live reading from a decoded weather response
    pub fn from_response(response: &WeatherResponse) -> Result<Self> {
        let main = response
            .main
            .as_ref()
            .ok_or_else(|| malformed("response has no `main` block"))?;
        let temp_f = main.temp.ok_or_else(|| malformed("missing `main.temp`"))?;
        let humidity_percent = main
            .humidity
            .ok_or_else(|| malformed("missing `main.humidity`"))?;

        if !temp_f.is_finite() || !humidity_percent.is_finite() {
            return Err(malformed("non-finite temperature or humidity"));
        }

        let wind_speed = response.wind.as_ref().and_then(|w| w.speed);

        Ok(Self {
            temperature_c: fahrenheit_to_celsius(temp_f),
            humidity: percent_to_fraction(humidity_percent).clamp(0.0, 1.0),
            pressure_ratio: main.pressure.filter(|p| p.is_finite()).map(pressure_ratio),
            wind_ratio: wind_speed.filter(|s| s.is_finite()).map_or(0.0, wind_ratio),
            source: ReadingSource::Live,
            observed_at: Utc::now(),
        })
    }

    /// Parse a raw JSON body into a live reading
    pub fn from_json(body: &str) -> Result<Self> {
        let response: WeatherResponse =
            serde_json::from_str(body).map_err(|e| malformed(&e.to_string()))?;
        Self::from_response(&response)
    }

    /// Build a reading from operator-supplied values.
    ///
    /// Temperature is clamped to [-20, 50] °C and humidity to [0, 100] %
    /// before conversion. Non-finite values are rejected.
    pub fn manual(temperature_c: f64, humidity_percent: f64) -> Result<Self> {
        if !temperature_c.is_finite() {
            return Err(WeatherglassError::InvalidParameter {
                param: "temperature_c".to_string(),
                message: format!("must be a finite number, got {}", temperature_c),
            });
        }
        if !humidity_percent.is_finite() {
            return Err(WeatherglassError::InvalidParameter {
                param: "humidity_percent".to_string(),
                message: format!("must be a finite number, got {}", humidity_percent),
            });
        }

        Ok(Self {
            temperature_c: temperature_c.clamp(MIN_TEMPERATURE_C, MAX_TEMPERATURE_C),
            humidity: percent_to_fraction(humidity_percent.clamp(0.0, 100.0)),
            pressure_ratio: None,
            wind_ratio: 0.0,
            source: ReadingSource::Manual,
            observed_at: Utc::now(),
        })
    }

    /// The reading Manual mode starts with (20 °C, 50 %)
    pub fn default_manual() -> Self {
        Self {
            temperature_c: DEFAULT_MANUAL_TEMPERATURE_C,
            humidity: percent_to_fraction(DEFAULT_MANUAL_HUMIDITY_PERCENT),
            pressure_ratio: None,
            wind_ratio: 0.0,
            source: ReadingSource::Manual,
            observed_at: Utc::now(),
        }
    }

    /// Relative humidity in percent
    pub fn humidity_percent(&self) -> f64 {
        self.humidity * 100.0
    }
}

fn malformed(message: &str) -> WeatherglassError {
    WeatherglassError::MalformedReading {
        message: message.to_string(),
    }
}
