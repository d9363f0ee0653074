//! Unit conversions between the weather endpoint's imperial values and the
//! normalized quantities the mapper works with.

/// Sea-level reference pressure in hPa
pub const SEA_LEVEL_PRESSURE_HPA: f64 = 1013.25;

/// Wind speed (mph) that maps to a wind ratio of 1.0
pub const WIND_SPEED_SCALE: f64 = 50.0;

/// Convert degrees Fahrenheit to degrees Celsius
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Convert degrees Celsius to degrees Fahrenheit
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert a relative humidity percentage (0-100) to a fraction (0-1)
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Ambient pressure relative to sea level
pub fn pressure_ratio(pressure_hpa: f64) -> f64 {
    pressure_hpa / SEA_LEVEL_PRESSURE_HPA
}

/// Wind speed relative to [`WIND_SPEED_SCALE`]
pub fn wind_ratio(speed_mph: f64) -> f64 {
    speed_mph / WIND_SPEED_SCALE
}
