//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use swatch_theme::{Hsl, Rgb};

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error response carries the JSON error envelope
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(expected.as_u16() as u64));
    assert!(json["error"].is_string(), "Expected error message: {json}");
}

/// Parse a hex color from a JSON response field
pub fn hex_field(json: &serde_json::Value, field: &str) -> Rgb {
    let hex = json[field]
        .as_str()
        .unwrap_or_else(|| panic!("Expected {field} to be a hex string: {json}"));
    hex.parse().expect("Invalid hex color")
}

/// Assert a color clears the default readability floors
pub fn assert_readable(color: Rgb) {
    let hsl = Hsl::from(color);
    assert!(hsl.l >= 0.549, "{color} too dark: {hsl:?}");
    assert!(hsl.s >= 0.299 || hsl.s == 0.0, "{color} too gray: {hsl:?}");
}
