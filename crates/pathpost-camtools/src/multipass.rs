//! Multi-pass expansion for laser toolpaths.
//!
//! Repeats the emitted line block once per pass, stepping the head down by the
//! configured depth between passes and returning it to the reference height
//! afterwards. The legacy Grbl variant keeps the pass structure but only
//! echoes the positioning-mode toggles between passes.

use pathpost_core::{format_fixed, format_number, GcodeConfig, MODERN_PRECISION};

/// Feed rate for Z moves inserted by the post-processor (mm/min)
pub const Z_MOVE_FEED: f64 = 150.0;

const PATH_TYPE_PATH: &str = "path";

/// Multi-pass settings read from a [`GcodeConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPassPlan {
    /// Number of repetitions; 1 when multi-pass is off
    pub passes: u32,
    /// Z step between passes (mm)
    pub depth: f64,
    /// Lift applied before the first pass (mm); 0 when not applicable
    pub initial_height_offset: f64,
    enabled: bool,
}

impl MultiPassPlan {
    /// Read the plan from a config.
    ///
    /// A non-positive pass count disables multi-pass even when the switch is
    /// on. The initial height offset only applies to `path` toolpaths.
    pub fn from_config(config: &GcodeConfig) -> Self {
        let requested = config.multi_passes();
        let enabled = config.multi_pass_enabled() && requested > 0;
        let initial_height_offset = if config.path_type() == Some(PATH_TYPE_PATH) {
            config.initial_height_offset()
        } else {
            0.0
        };
        Self {
            passes: if enabled {
                u32::try_from(requested).unwrap_or(u32::MAX)
            } else {
                1
            },
            depth: config.multi_pass_depth(),
            initial_height_offset,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cumulative Z of a zero-based pass index
    pub fn pass_z(&self, pass_index: u32) -> f64 {
        -(pass_index as f64) * self.depth
    }

    /// Upward move that returns the head to the reference height after the
    /// last pass
    pub fn return_distance(&self) -> f64 {
        self.depth * (self.passes.saturating_sub(1)) as f64 - self.initial_height_offset
    }
}

fn relative_z_move(distance: f64) -> String {
    format!(
        "G91 G0 Z{} F{}",
        format_fixed(distance, MODERN_PRECISION),
        format_number(Z_MOVE_FEED)
    )
}

fn pass_comment(pass_index: u32, z: f64) -> String {
    format!(
        ";Laser multi-pass, pass {} with Z = {}",
        pass_index + 1,
        format_number(z)
    )
}

/// Expand a line block for the modern laser dialect
pub fn process_multi_pass(lines: Vec<String>, config: &GcodeConfig) -> Vec<String> {
    let plan = MultiPassPlan::from_config(config);
    let mut result = Vec::new();

    if plan.initial_height_offset != 0.0 && !plan.initial_height_offset.is_nan() {
        result.push(relative_z_move(plan.initial_height_offset));
        result.push("G90".to_string());
    }

    if !plan.is_enabled() {
        result.extend(lines);
        return result;
    }

    tracing::debug!(
        passes = plan.passes,
        depth = plan.depth,
        "expanding laser multi-pass"
    );
    result.reserve(lines.len() * plan.passes as usize + 3 * plan.passes as usize + 2);
    for pass in 0..plan.passes {
        if pass > 0 {
            result.push(pass_comment(pass, plan.pass_z(pass)));
            result.push(relative_z_move(-plan.depth));
            result.push("G90".to_string());
        }
        result.extend(lines.iter().cloned());
    }
    result.push(relative_z_move(plan.return_distance()));
    result.push("G90".to_string());
    result
}

/// Expand a line block for the legacy Grbl laser dialect.
///
/// Only the pass comment and the `G91`/`G90` toggles separate the passes; no
/// Z moves are written and the initial height offset is ignored.
pub fn process_legacy_multi_pass(lines: Vec<String>, config: &GcodeConfig) -> Vec<String> {
    let plan = MultiPassPlan::from_config(config);
    if !plan.is_enabled() {
        return lines;
    }

    let mut result = Vec::with_capacity(lines.len() * plan.passes as usize);
    for pass in 0..plan.passes {
        if pass > 0 {
            result.push(pass_comment(pass, plan.pass_z(pass)));
            result.push("G91".to_string());
            result.push("G90".to_string());
        }
        result.extend(lines.iter().cloned());
    }
    result
}
