//! Error types for the weatherglass application.
//!
//! This module defines one error enum covering every failure the sampler,
//! mapper, configuration layer and HTTP host can report.

use thiserror::Error;

/// The main error type for weatherglass operations.
#[derive(Error, Debug)]
pub enum WeatherglassError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Network or HTTP status failure while talking to the weather endpoint
    #[error("Weather fetch failed: {message}")]
    Fetch { message: String },

    /// The weather endpoint answered, but the body is not a usable reading
    #[error("Malformed weather reading: {message}")]
    MalformedReading { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Image generation errors
    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl From<reqwest::Error> for WeatherglassError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WeatherglassError::MalformedReading {
                message: err.to_string(),
            }
        } else {
            WeatherglassError::Fetch {
                message: err.to_string(),
            }
        }
    }
}

/// Convenience type alias for Results with WeatherglassError
pub type Result<T> = std::result::Result<T, WeatherglassError>;
