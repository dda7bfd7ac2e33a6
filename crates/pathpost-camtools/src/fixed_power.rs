//! Fixed laser power preamble.
//!
//! Bakes the configured power level into the program by firing the laser
//! briefly at that power before the job starts. Works on the joined G-code
//! text, after multi-pass expansion.

use crate::error::{CamToolError, CamToolResult};
use pathpost_core::{format_number, GcodeConfig};

/// Full scale of the `S` word written in the preamble
const POWER_STRENGTH_MAX: f64 = 255.0;

/// Convert a power percentage to the 0-255 strength word
pub fn power_strength(fixed_power: f64) -> f64 {
    (fixed_power * POWER_STRENGTH_MAX / 100.0).floor()
}

/// The preamble lines for a power percentage, without the trailing blank line
pub fn preamble(fixed_power: f64) -> [String; 4] {
    [
        format!(";Laser fixed power: {}%", format_number(fixed_power)),
        format!(
            "M3 P{} S{}",
            format_number(fixed_power),
            format_number(power_strength(fixed_power))
        ),
        "G4 P1".to_string(),
        "M5".to_string(),
    ]
}

/// Prepend the fixed-power preamble when `fixedPowerEnabled` is set.
///
/// Not idempotent: applying it twice writes the preamble twice.
pub fn process_for_fixed_power(gcode: &str, config: &GcodeConfig) -> String {
    if !config.fixed_power_enabled() {
        return gcode.to_string();
    }
    let power = config.fixed_power();
    tracing::debug!(power, "prepending fixed power preamble");
    format!("{}\n\n{}", preamble(power).join("\n"), gcode)
}

/// Like [`process_for_fixed_power`], but rejects a power outside 0-100%.
pub fn process_for_fixed_power_checked(
    gcode: &str,
    config: &GcodeConfig,
) -> CamToolResult<String> {
    if config.fixed_power_enabled() {
        let power = config.fixed_power();
        if !(0.0..=100.0).contains(&power) {
            return Err(CamToolError::InvalidParameters(format!(
                "fixed power must be within 0-100%, got {}",
                format_number(power)
            )));
        }
    }
    Ok(process_for_fixed_power(gcode, config))
}
