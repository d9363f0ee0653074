//! Fixed temperature-to-color calibration anchors.

/// A normalized RGB color, each channel in [0, 1]
pub type Rgb = [f32; 3];

/// One temperature anchor with its four palette colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Anchor temperature in degrees Celsius
    pub temp: f64,
    pub background: Rgb,
    pub primary: Rgb,
    pub accent1: Rgb,
    pub accent2: Rgb,
}

/// The eight anchors, sorted ascending by temperature from -20 °C to 50 °C
pub const TEMPERATURE_ANCHORS: [ControlPoint; 8] = [
    // Freezing - icy white
    ControlPoint {
        temp: -20.0,
        background: [0.02, 0.05, 0.15],
        primary: [0.9, 0.95, 1.0],
        accent1: [0.95, 0.98, 1.0],
        accent2: [1.0, 1.0, 1.0],
    },
    // Cold - light blue
    ControlPoint {
        temp: -10.0,
        background: [0.05, 0.1, 0.2],
        primary: [0.7, 0.8, 1.0],
        accent1: [0.85, 0.9, 1.0],
        accent2: [0.95, 0.97, 1.0],
    },
    // Cool - blue
    ControlPoint {
        temp: 0.0,
        background: [0.1, 0.15, 0.3],
        primary: [0.4, 0.6, 1.0],
        accent1: [0.6, 0.7, 1.0],
        accent2: [0.8, 0.85, 1.0],
    },
    // Mild-cool - blue-gray
    ControlPoint {
        temp: 10.0,
        background: [0.15, 0.2, 0.35],
        primary: [0.3, 0.5, 0.9],
        accent1: [0.5, 0.65, 0.95],
        accent2: [0.7, 0.8, 0.98],
    },
    // Mild - yellowish
    ControlPoint {
        temp: 20.0,
        background: [0.25, 0.25, 0.2],
        primary: [0.8, 0.7, 0.3],
        accent1: [0.9, 0.8, 0.5],
        accent2: [1.0, 0.9, 0.7],
    },
    // Warm - orange
    ControlPoint {
        temp: 30.0,
        background: [0.3, 0.2, 0.1],
        primary: [1.0, 0.6, 0.2],
        accent1: [1.0, 0.75, 0.4],
        accent2: [1.0, 0.85, 0.6],
    },
    // Hot - red-orange
    ControlPoint {
        temp: 40.0,
        background: [0.4, 0.1, 0.1],
        primary: [1.0, 0.3, 0.2],
        accent1: [1.0, 0.5, 0.3],
        accent2: [1.0, 0.7, 0.4],
    },
    // Scorching - deep red
    ControlPoint {
        temp: 50.0,
        background: [0.5, 0.05, 0.05],
        primary: [1.0, 0.2, 0.1],
        accent1: [1.0, 0.35, 0.2],
        accent2: [1.0, 0.5, 0.3],
    },
];
