//! Numeric formatting for G-code words
//!
//! Coordinates are written with a fixed number of decimals that depends on
//! the dialect. Other numeric words are written in their shortest form, so
//! `800.0` becomes `800` and `1.5` stays `1.5`.

/// Decimal places for coordinates in the CNC and modern laser dialects.
pub const MODERN_PRECISION: usize = 2;

/// Decimal places for coordinates in the legacy Grbl laser dialect.
pub const LEGACY_PRECISION: usize = 3;

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_string())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else {
        None
    }
}

/// Format a value with exactly `precision` decimals.
///
/// Rounds the exact binary value to nearest at the last kept digit; exact
/// ties go to the even digit (`0.125` → `0.12`, `2.5` → `2`). `NaN` renders as `NaN` and
/// infinities as `Infinity`/`-Infinity`. Negative zero renders as `0.00`;
/// small negatives that round to zero keep their sign (`-0.001` → `-0.00`).
pub fn format_fixed(value: f64, precision: usize) -> String {
    if let Some(text) = non_finite(value) {
        return text;
    }
    // -0.0 == 0.0, so this strips the sign bit of an exact zero only
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", precision, value)
}

/// Format a value in shortest form for non-coordinate words.
pub fn format_number(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        return text;
    }
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}", value)
}
