//! # pathpost
//!
//! Turns laser and CNC toolpath descriptors into G-code text.
//!
//! ## Architecture
//!
//! pathpost is organized as a workspace with multiple crates:
//!
//! 1. **pathpost-core** - Toolpath descriptors, G-code config, number formatting, errors
//! 2. **pathpost-camtools** - Dialects, multi-pass, fixed power, validation, optimizer
//! 3. **pathpost-settings** - Settings file, machine profiles, config file loading
//! 4. **pathpost** - Command line binary and the generate pipeline

pub mod job;

pub use job::{parse_toolpaths, GenerateJob};

pub use pathpost_core::{
    keys, ConfigValue, GcodeConfig, GenerationError, HeadType, ParamValue, PathItem,
    ToolpathDescriptor,
};

pub use pathpost_camtools::{
    join_lines, process_for_fixed_power, CamToolError, GcodeGenerator, GeneratorOptions,
    LaserFirmware, Validation,
};

pub use pathpost_settings::{load_gcode_config, MachineProfile, Settings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for G-code
/// - RUST_LOG environment variable support, falling back to `default_level`
/// - JSON lines instead of text when `json` is set
pub fn init_logging(default_level: tracing::Level, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
