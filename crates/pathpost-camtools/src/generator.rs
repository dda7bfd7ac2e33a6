//! G-code generation from toolpath descriptors.
//!
//! [`GcodeGenerator`] turns a [`ToolpathDescriptor`] and its resolved
//! [`GcodeConfig`] into G-code lines: one line per path item in machining
//! order, followed by multi-pass expansion for laser heads. The generator
//! holds only its options, so one instance can serve any number of threads.

use crate::dialect::Dialect;
use crate::error::{CamToolError, CamToolResult};
use crate::multipass::{process_legacy_multi_pass, process_multi_pass};
use crate::optimizer::GCodeOptimizer;
use crate::validation::validate;
use pathpost_core::{GcodeConfig, GenerationError, GenerationResult, ToolpathDescriptor};
use serde::{Deserialize, Serialize};

/// Laser firmware family of the target machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaserFirmware {
    /// Current firmware
    #[default]
    Modern,
    /// Older Grbl-based firmware with 0-1000 power words
    LegacyGrbl,
}

/// How much the generator trusts its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Best effort for every item; never fails
    #[default]
    Permissive,
    /// Reject descriptors the permissive path would have to guess about
    Strict,
}

/// Generator options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub laser_firmware: LaserFirmware,
    pub validation: Validation,
    /// Drop redundant `M5` and positioning-mode lines from the output
    pub optimize: bool,
}

/// Join generated lines into G-code text
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// G-code generator for laser and CNC toolpaths.
#[derive(Debug, Clone, Default)]
pub struct GcodeGenerator {
    options: GeneratorOptions,
}

impl GcodeGenerator {
    /// Creates a new generator.
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generates G-code lines for a toolpath.
    ///
    /// Returns `None` when the head type is not supported; there is nothing
    /// to generate in that case. Malformed words never fail the call: they are
    /// written as-is (CNC, modern laser) or skipped (legacy laser).
    pub fn generate(
        &self,
        toolpath: &ToolpathDescriptor,
        config: &GcodeConfig,
    ) -> Option<Vec<String>> {
        let Some(dialect) = Dialect::select(&toolpath.head_type, self.options.laser_firmware)
        else {
            tracing::warn!(head_type = %toolpath.head_type, "unsupported head type, nothing to generate");
            return None;
        };

        tracing::debug!(
            dialect = dialect.name(),
            items = toolpath.data.len(),
            "generating G-code"
        );

        let lines: Vec<String> = toolpath
            .data
            .iter()
            .map(|item| dialect.emit_line(item, toolpath, config))
            .collect();

        let lines = match dialect {
            Dialect::Cnc => lines,
            Dialect::Laser => process_multi_pass(lines, config),
            Dialect::LegacyGrblLaser => process_legacy_multi_pass(lines, config),
        };

        Some(if self.options.optimize {
            GCodeOptimizer::optimize(&lines)
        } else {
            lines
        })
    }

    /// Generates from inputs that may be missing; either one absent yields `None`.
    pub fn generate_optional(
        &self,
        toolpath: Option<&ToolpathDescriptor>,
        config: Option<&GcodeConfig>,
    ) -> Option<Vec<String>> {
        self.generate(toolpath?, config?)
    }

    /// Validates the toolpath strictly, then generates.
    pub fn generate_checked(
        &self,
        toolpath: &ToolpathDescriptor,
        config: &GcodeConfig,
    ) -> GenerationResult<Vec<String>> {
        validate(toolpath, config)?;
        self.generate(toolpath, config)
            .ok_or_else(|| GenerationError::UnsupportedHeadType {
                head_type: toolpath.head_type.to_string(),
            })
    }

    /// Generates several toolpaths with one config and concatenates the lines.
    ///
    /// In permissive mode descriptors that yield nothing are skipped. In
    /// strict mode the first invalid descriptor fails the whole batch with
    /// [`CamToolError::Batch`] naming its position.
    pub fn generate_batch(
        &self,
        toolpaths: &[ToolpathDescriptor],
        config: &GcodeConfig,
    ) -> CamToolResult<Vec<String>> {
        let mut lines = Vec::new();
        for (index, toolpath) in toolpaths.iter().enumerate() {
            match self.options.validation {
                Validation::Strict => {
                    let generated = self
                        .generate_checked(toolpath, config)
                        .map_err(|source| CamToolError::Batch {
                            descriptor: index,
                            source,
                        })?;
                    lines.extend(generated);
                }
                Validation::Permissive => match self.generate(toolpath, config) {
                    Some(generated) => lines.extend(generated),
                    None => tracing::info!(index, "skipping toolpath with nothing to generate"),
                },
            }
        }
        Ok(lines)
    }
}
