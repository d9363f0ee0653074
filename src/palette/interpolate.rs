//! Piecewise-linear interpolation between temperature anchors.

use serde::{Deserialize, Serialize};

use super::anchors::{ControlPoint, Rgb, TEMPERATURE_ANCHORS};
use super::{MAX_TEMPERATURE_C, MIN_TEMPERATURE_C};

/// Four palette colors derived from a temperature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgb,
    pub primary: Rgb,
    pub accent1: Rgb,
    pub accent2: Rgb,
}

impl From<&ControlPoint> for Palette {
    fn from(point: &ControlPoint) -> Self {
        Self {
            background: point.background,
            primary: point.primary,
            accent1: point.accent1,
            accent2: point.accent2,
        }
    }
}

/// Linear interpolation between two colors.
///
/// This is `a + (b - a) * t` rearranged. Written as `a * (1 - t) + b * t` so
/// that `t == 0` and `t == 1` return the endpoints exactly.
pub fn lerp_color(c1: Rgb, c2: Rgb, t: f32) -> Rgb {
    [
        c1[0] * (1.0 - t) + c2[0] * t,
        c1[1] * (1.0 - t) + c2[1] * t,
        c1[2] * (1.0 - t) + c2[2] * t,
    ]
}

/// Find the first adjacent anchor pair enclosing `temp_c`
fn bracketing_anchors(temp_c: f64) -> (&'static ControlPoint, &'static ControlPoint) {
    TEMPERATURE_ANCHORS
        .windows(2)
        .find(|pair| pair[0].temp <= temp_c && temp_c <= pair[1].temp)
        .map(|pair| (&pair[0], &pair[1]))
        .unwrap_or((
            &TEMPERATURE_ANCHORS[0],
            &TEMPERATURE_ANCHORS[TEMPERATURE_ANCHORS.len() - 1],
        ))
}

/// Palette for a temperature in degrees Celsius.
///
/// The temperature is clamped to the anchored range first, so values beyond
/// either end return that end's colors. NaN resolves to the coldest anchor.
pub fn interpolated_palette(temp_c: f64) -> Palette {
    let clamped = if temp_c.is_nan() {
        MIN_TEMPERATURE_C
    } else {
        temp_c.clamp(MIN_TEMPERATURE_C, MAX_TEMPERATURE_C)
    };

    let (lower, upper) = bracketing_anchors(clamped);
    let span = upper.temp - lower.temp;
    let t = if span > 0.0 {
        ((clamped - lower.temp) / span) as f32
    } else {
        0.0
    };

    Palette {
        background: lerp_color(lower.background, upper.background, t),
        primary: lerp_color(lower.primary, upper.primary, t),
        accent1: lerp_color(lower.accent1, upper.accent1, t),
        accent2: lerp_color(lower.accent2, upper.accent2, t),
    }
}
