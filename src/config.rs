//! Configuration management for weatherglass.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, WeatherglassError};

/// Command-line arguments for weatherglass
#[derive(Parser, Debug, Default)]
#[command(name = "weatherglass")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "WEATHERGLASS_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "WEATHERGLASS_PORT")]
    pub port: Option<u16>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "WEATHERGLASS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "WEATHERGLASS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Weather endpoint URL
    #[arg(long, env = "WEATHERGLASS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Latitude of the observed location
    #[arg(long, env = "WEATHERGLASS_LAT", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the observed location
    #[arg(long, env = "WEATHERGLASS_LON", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// API key sent as `appid`
    #[arg(long, env = "WEATHERGLASS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Seconds between weather polls
    #[arg(long, env = "WEATHERGLASS_POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Frames rendered per second
    #[arg(long, env = "WEATHERGLASS_FPS")]
    pub fps: Option<u32>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Weather endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Endpoint URL, queried with lat/lon/units/appid parameters
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// API key (None = no `appid` parameter)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Seconds between polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Frame loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_fps")]
    pub frames_per_second: u32,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather endpoint configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Frame loop configuration
    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build a configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load_from_file(path)?,
            None => Config::default(),
        };
        config.apply_args(args);
        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Override values with any that were given on the command line or environment
    fn apply_args(&mut self, args: Args) {
        if let Some(host) = args.host {
            self.server.host = host;
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(endpoint) = args.endpoint {
            self.weather.endpoint = endpoint;
        }
        if let Some(lat) = args.lat {
            self.weather.latitude = lat;
        }
        if let Some(lon) = args.lon {
            self.weather.longitude = lon;
        }
        if args.api_key.is_some() {
            self.weather.api_key = args.api_key;
        }
        if let Some(poll_interval) = args.poll_interval {
            self.weather.poll_interval_secs = poll_interval;
        }
        if let Some(fps) = args.fps {
            self.render.frames_per_second = fps;
        }
    }

    /// Interval between weather polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.weather.poll_interval_secs)
    }

    /// Interval between rendered frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.render.frames_per_second.max(1) as u64)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(config_error("Server host cannot be empty"));
        }

        if self.server.port == 0 {
            return Err(config_error("Server port cannot be 0"));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(config_error(&format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.log_level
                )));
            }
        }

        let endpoint = &self.weather.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(config_error(&format!(
                "Weather endpoint must be an http(s) URL, got: {}",
                endpoint
            )));
        }

        if !(-90.0..=90.0).contains(&self.weather.latitude) {
            return Err(config_error("Latitude must be in the range -90 to 90"));
        }

        if !(-180.0..=180.0).contains(&self.weather.longitude) {
            return Err(config_error("Longitude must be in the range -180 to 180"));
        }

        if self.weather.poll_interval_secs == 0 {
            return Err(config_error("Poll interval must be at least 1 second"));
        }

        if self.weather.timeout_secs == 0 {
            return Err(config_error("Request timeout must be at least 1 second"));
        }

        if !(1..=240).contains(&self.render.frames_per_second) {
            return Err(config_error("Frames per second must be between 1 and 240"));
        }

        Ok(())
    }
}

fn config_error(message: &str) -> WeatherglassError {
    WeatherglassError::Config {
        message: message.to_string(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
            render: RenderConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            api_key: None,
            poll_interval_secs: default_poll_interval(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frames_per_second: default_fps(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_endpoint() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

// New York City
fn default_latitude() -> f64 {
    40.7128
}

fn default_longitude() -> f64 {
    -74.0060
}

fn default_poll_interval() -> u64 {
    300
}

fn default_timeout() -> u64 {
    10
}

fn default_fps() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}
