//! Assertion utilities for testing, mostly floating-point comparisons.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a JSON array of numbers matches `expected` element-wise.
///
/// # Panics
///
/// Panics if the value is not an array of numbers of the same length, or if
/// any element differs by more than `epsilon`.
pub fn assert_json_color_eq(actual: &serde_json::Value, expected: [f32; 3], epsilon: Option<f64>) {
    let values: Vec<f64> = actual
        .as_array()
        .unwrap_or_else(|| panic!("Expected a JSON array, got {}", actual))
        .iter()
        .map(|v| v.as_f64().expect("Expected a number"))
        .collect();

    assert_eq!(values.len(), 3, "Color has {} channels", values.len());
    for (a, e) in values.iter().zip(expected) {
        assert_approx_eq(*a, e as f64, epsilon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0000001, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_json_color_eq() {
        assert_json_color_eq(&serde_json::json!([0.25, 0.25, 0.2]), [0.25, 0.25, 0.2], None);
    }
}
