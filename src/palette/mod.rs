//! Temperature-driven color palettes.
//!
//! This module holds the fixed temperature anchors, the interpolation that
//! turns a temperature into a four-color palette, and a PNG preview renderer.

pub mod anchors;
pub mod interpolate;
pub mod preview;

pub use anchors::{ControlPoint, Rgb, TEMPERATURE_ANCHORS};
pub use interpolate::{interpolated_palette, lerp_color, Palette};
pub use preview::{encode_png, render_ramp, render_swatch};

/// Lowest anchored temperature in degrees Celsius
pub const MIN_TEMPERATURE_C: f64 = TEMPERATURE_ANCHORS[0].temp;

/// Highest anchored temperature in degrees Celsius
pub const MAX_TEMPERATURE_C: f64 = TEMPERATURE_ANCHORS[TEMPERATURE_ANCHORS.len() - 1].temp;
