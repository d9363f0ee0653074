//! # weatherglass
//!
//! Weather-driven palette and shader parameters.
//!
//! A sampler polls a weather endpoint (or takes manual values), a pure mapper
//! turns the current reading into a four-color palette and a set of shader
//! uniforms, and a frame loop hands those to a rendering surface every frame.
//!
//! ## Architecture
//!
//! - **Sampler**: owns the live and manual readings and the Live/Manual mode
//! - **Mapper**: temperature → palette, humidity → lens count, plus fixed uniforms
//! - **Visualization**: frame loop and teardown around one rendering surface
//! - **API Layer**: control surface and parameter feed over HTTP

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod mapper;
pub mod palette;
pub mod reading;
pub mod sampler;
pub mod state;
pub mod units;
pub mod visualization;

pub use config::Config;
pub use error::{Result, WeatherglassError};
pub use logging::{generate_request_id, init_tracing, log_error, log_timed_operation};
pub use mapper::{lens_count, map_frame, RenderParams};
pub use palette::{interpolated_palette, Palette};
pub use reading::{Reading, ReadingSource};
pub use sampler::{HttpWeatherSource, Mode, Sampler, SamplerHandle, WeatherSource};
pub use state::AppState;
pub use visualization::{LatestFrame, RenderSurface, Visualization};
