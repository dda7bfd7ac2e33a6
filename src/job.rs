//! Input files and the generate pipeline behind the `generate` command.

use pathpost_camtools::{
    join_lines, process_for_fixed_power_checked, CamToolResult, GcodeGenerator, GeneratorOptions,
};
use pathpost_core::{GcodeConfig, HeadType, ToolpathDescriptor};
use serde_json::value::RawValue;

fn parse_descriptor(index: usize, raw: &RawValue) -> Option<ToolpathDescriptor> {
    if raw.get() == "null" {
        return None;
    }
    match serde_json::from_str(raw.get()) {
        Ok(toolpath) => Some(toolpath),
        Err(err) => {
            tracing::warn!(index, error = %err, "skipping malformed toolpath descriptor");
            None
        }
    }
}

/// Parse the descriptors of a toolpath file.
///
/// A file holds one descriptor, `null`, or an array of either. Descriptors
/// that do not parse (missing or non-string `headType`, bad word values) are
/// logged and skipped like `null`; only invalid JSON or a top-level value of
/// the wrong kind fails the file.
pub fn parse_toolpaths(json: &str) -> serde_json::Result<Vec<ToolpathDescriptor>> {
    let raw: &RawValue = serde_json::from_str(json)?;
    let text = raw.get();
    match text.as_bytes().first() {
        Some(b'[') => {
            let entries: Vec<&RawValue> = serde_json::from_str(text)?;
            Ok(entries
                .into_iter()
                .enumerate()
                .filter_map(|(index, entry)| parse_descriptor(index, entry))
                .collect())
        }
        Some(b'{') => Ok(parse_descriptor(0, raw).into_iter().collect()),
        _ if text == "null" => Ok(Vec::new()),
        _ => serde_json::from_str::<ToolpathDescriptor>(text).map(|toolpath| vec![toolpath]),
    }
}

/// Everything needed to produce one G-code program
#[derive(Debug, Clone, Default)]
pub struct GenerateJob {
    pub toolpaths: Vec<ToolpathDescriptor>,
    pub config: GcodeConfig,
    pub options: GeneratorOptions,
    /// Run the fixed-power post-process over the joined program
    pub fixed_power: bool,
}

impl GenerateJob {
    fn has_laser(&self) -> bool {
        self.toolpaths
            .iter()
            .any(|toolpath| toolpath.head_type == HeadType::Laser)
    }

    /// Generate, join and post-process the program text.
    ///
    /// The fixed-power preamble is only considered when the job holds at
    /// least one laser toolpath.
    pub fn run(&self) -> CamToolResult<String> {
        let generator = GcodeGenerator::new(self.options);
        let lines = generator.generate_batch(&self.toolpaths, &self.config)?;
        tracing::info!(
            toolpaths = self.toolpaths.len(),
            lines = lines.len(),
            "Generated G-code"
        );

        let text = join_lines(&lines);
        if !self.fixed_power {
            return Ok(text);
        }
        if !self.has_laser() {
            tracing::debug!("no laser toolpath, fixed power preamble skipped");
            return Ok(text);
        }
        process_for_fixed_power_checked(&text, &self.config)
    }
}
