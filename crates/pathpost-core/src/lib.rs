//! # pathpost Core
//!
//! Core types shared by the pathpost crates.
//! Provides the toolpath descriptor handed over by the toolpath builder,
//! the flat G-code parameter map resolved from model settings, numeric
//! word formatting and the error types used across the workspace.

pub mod config;
pub mod error;
pub mod format;
pub mod toolpath;

pub use config::{keys, ConfigValue, GcodeConfig};
pub use error::{GenerationError, GenerationResult};
pub use format::{format_fixed, format_number, LEGACY_PRECISION, MODERN_PRECISION};
pub use toolpath::{Axis, HeadType, ParamValue, PathItem, ToolpathDescriptor};
