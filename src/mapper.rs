//! Mapping from a reading to the per-frame rendering parameters.
//!
//! Everything here is a pure function of its inputs: no I/O, no retained
//! state, nothing that blocks. The frame loop calls [`map_frame`] once per
//! frame with the current reading (if any) and the elapsed time.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::palette::{interpolated_palette, Palette, Rgb};
use crate::reading::Reading;

/// Fewest lenses the shader draws
pub const MIN_LENSES: u32 = 1;

/// Most lenses the shader draws
pub const MAX_LENSES: u32 = 8;

/// Internal resolution uniform, independent of the canvas size
pub const RESOLUTION: [f32; 2] = [800.0, 800.0];

/// Logical canvas size in pixels
pub const CANVAS_SIZE: u32 = 300;

/// Pattern selector for Lissajous curves
pub const PATTERN_LISSAJOUS: f32 = 2.0;

/// Fixed seed pair for the rectangle pattern
pub const RECT_SEED: [f32; 2] = [0.5, 0.5];

/// UV warp strength
pub const UV_WARP: f32 = 0.8;

/// Pressure ratio used when a reading carries none
pub const DEFAULT_PRESSURE_RATIO: f64 = 1.0;

/// Number of lenses for a humidity fraction.
///
/// `round(1 + h * 7)` with the humidity clamped to [0, 1] first. Rounding is
/// half away from zero, which on this non-negative domain is half-up, so
/// `lens_count(0.5) == 5`. Every caller goes through this one function.
pub fn lens_count(humidity: f64) -> u32 {
    let humidity = if humidity.is_nan() {
        0.0
    } else {
        humidity.clamp(0.0, 1.0)
    };
    let span = (MAX_LENSES - MIN_LENSES) as f64;
    (MIN_LENSES as f64 + humidity * span).round() as u32
}

/// Label shown next to the humidity control.
///
/// This is display only; it never feeds into [`RenderParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedModifier {
    Slow,
    Fast,
}

impl SpeedModifier {
    /// `Slow` above 50 % humidity, `Fast` at or below
    pub fn from_humidity_percent(percent: f64) -> Self {
        if percent > 50.0 {
            SpeedModifier::Slow
        } else {
            SpeedModifier::Fast
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedModifier::Slow => "Slow speed modifier",
            SpeedModifier::Fast => "Fast speed modifier",
        }
    }
}

/// Synthetic temperature/humidity used until the first reading exists
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackSignal {
    pub temperature_c: f64,
    pub humidity: f64,
}

impl FallbackSignal {
    /// Slow sine sweep: 15 ± 10 °C and 0.5 ± 0.3 humidity
    pub fn at(elapsed: Duration) -> Self {
        let ms = elapsed.as_secs_f64() * 1000.0;
        Self {
            temperature_c: 15.0 + 10.0 * (ms * 0.0005).sin(),
            humidity: 0.5 + 0.3 * (ms * 0.0003).sin(),
        }
    }
}

/// The full set of values handed to the renderer for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderParams {
    pub resolution: [f32; 2],
    /// Seconds since the visualization started
    pub time: f32,
    pub pattern_type: f32,
    pub palette: Palette,
    pub rect_seed: [f32; 2],
    pub uv_warp: f32,
    /// Degrees Celsius, as read (not clamped)
    pub temperature: f32,
    /// Fraction in [0, 1]
    pub humidity: f32,
    pub lens_count: u32,
    /// Pressure relative to sea level
    pub pressure: f32,
    /// Wind speed relative to 50 mph
    pub wind_speed: f32,
    /// Whether the values came from the fallback signal
    pub fallback: bool,
}

/// A shader uniform value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
}

/// A named uniform as the shader declares it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Uniform {
    pub name: &'static str,
    pub value: UniformValue,
}

impl RenderParams {
    /// Flatten into the shader's named uniforms
    pub fn uniforms(&self) -> Vec<Uniform> {
        let vec3 = |name: &'static str, value: Rgb| Uniform {
            name,
            value: UniformValue::Vec3(value),
        };
        let float = |name: &'static str, value: f32| Uniform {
            name,
            value: UniformValue::Float(value),
        };

        vec![
            Uniform {
                name: "resolution",
                value: UniformValue::Vec2(self.resolution),
            },
            float("time", self.time),
            float("patternType", self.pattern_type),
            vec3("paletteBackground", self.palette.background),
            vec3("palettePrimary", self.palette.primary),
            vec3("paletteAccent1", self.palette.accent1),
            vec3("paletteAccent2", self.palette.accent2),
            Uniform {
                name: "rectSeed",
                value: UniformValue::Vec2(self.rect_seed),
            },
            float("uvWarp", self.uv_warp),
            float("temperature", self.temperature),
            float("humidity", self.humidity),
            float("lensCount", self.lens_count as f32),
            float("pressure", self.pressure),
            float("windSpeed", self.wind_speed),
        ]
    }
}

/// Derive the rendering parameters for one frame
pub fn map_frame(reading: Option<&Reading>, elapsed: Duration) -> RenderParams {
    let (temperature_c, humidity, pressure, wind, fallback) = match reading {
        Some(reading) => (
            reading.temperature_c,
            reading.humidity.clamp(0.0, 1.0),
            reading.pressure_ratio.unwrap_or(DEFAULT_PRESSURE_RATIO),
            reading.wind_ratio,
            false,
        ),
        None => {
            let signal = FallbackSignal::at(elapsed);
            (
                signal.temperature_c,
                signal.humidity,
                DEFAULT_PRESSURE_RATIO,
                0.0,
                true,
            )
        }
    };

    RenderParams {
        resolution: RESOLUTION,
        time: elapsed.as_secs_f32(),
        pattern_type: PATTERN_LISSAJOUS,
        palette: interpolated_palette(temperature_c),
        rect_seed: RECT_SEED,
        uv_warp: UV_WARP,
        temperature: temperature_c as f32,
        humidity: humidity as f32,
        lens_count: lens_count(humidity),
        pressure: pressure as f32,
        wind_speed: wind as f32,
        fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lens_count_endpoints() {
        assert_eq!(lens_count(0.0), 1);
        assert_eq!(lens_count(1.0), 8);
        assert_eq!(lens_count(0.5), 5);
        assert_eq!(lens_count(-0.3), 1);
        assert_eq!(lens_count(1.7), 8);
        assert_eq!(lens_count(f64::NAN), 1);
    }

    #[test]
    fn test_lens_count_monotonic() {
        let mut previous = lens_count(0.0);
        for step in 1..=10_000 {
            let current = lens_count(step as f64 / 10_000.0);
            assert!(current >= previous);
            assert!((MIN_LENSES..=MAX_LENSES).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn test_speed_modifier_label() {
        assert_eq!(SpeedModifier::from_humidity_percent(51.0), SpeedModifier::Slow);
        assert_eq!(SpeedModifier::from_humidity_percent(50.0), SpeedModifier::Fast);
        assert_eq!(SpeedModifier::Slow.label(), "Slow speed modifier");
    }

    #[test]
    fn test_map_frame_from_reading() {
        let reading = Reading::manual(20.0, 50.0).unwrap();
        let params = map_frame(Some(&reading), Duration::from_millis(2500));

        assert!(!params.fallback);
        assert_eq!(params.time, 2.5);
        assert_eq!(params.temperature, 20.0);
        assert_eq!(params.humidity, 0.5);
        assert_eq!(params.lens_count, 5);
        assert_eq!(params.palette, interpolated_palette(20.0));
        assert_eq!(params.pressure, 1.0);
        assert_eq!(params.wind_speed, 0.0);
        assert_eq!(params.resolution, [800.0, 800.0]);
        assert_eq!(params.pattern_type, 2.0);
        assert_eq!(params.rect_seed, [0.5, 0.5]);
        assert_eq!(params.uv_warp, 0.8);
    }

    #[test]
    fn test_map_frame_live_optionals() {
        let reading = Reading::from_json(
            r#"{"main": {"temp": 86, "humidity": 80, "pressure": 1000}, "wind": {"speed": 12.5}}"#,
        )
        .unwrap();
        let params = map_frame(Some(&reading), Duration::ZERO);

        assert!((params.pressure - (1000.0 / 1013.25) as f32).abs() < 1e-6);
        assert_eq!(params.wind_speed, 0.25);
        assert_eq!(params.lens_count, lens_count(0.8));
    }

    #[test]
    fn test_map_frame_fallback() {
        let params = map_frame(None, Duration::ZERO);
        assert!(params.fallback);
        assert_eq!(params.temperature, 15.0);
        assert_eq!(params.humidity, 0.5);
        assert_eq!(params.lens_count, 5);

        // Fallback sweeps over time
        let later = map_frame(None, Duration::from_millis(3000));
        assert!(later.temperature > 15.0 && later.temperature <= 25.0);
        assert!(later.humidity > 0.5 && later.humidity <= 0.8);
    }

    #[test]
    fn test_fallback_never_used_with_reading() {
        let reading = Reading::manual(-5.0, 10.0).unwrap();
        for ms in [0, 1_000, 10_000, 1_000_000] {
            let params = map_frame(Some(&reading), Duration::from_millis(ms));
            assert!(!params.fallback);
            assert_eq!(params.temperature, -5.0);
        }
    }

    #[test]
    fn test_uniform_names() {
        let params = map_frame(None, Duration::ZERO);
        let names: Vec<&str> = params.uniforms().iter().map(|u| u.name).collect();
        assert_eq!(
            names,
            vec![
                "resolution",
                "time",
                "patternType",
                "paletteBackground",
                "palettePrimary",
                "paletteAccent1",
                "paletteAccent2",
                "rectSeed",
                "uvWarp",
                "temperature",
                "humidity",
                "lensCount",
                "pressure",
                "windSpeed",
            ]
        );
    }
}
