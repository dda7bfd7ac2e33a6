//! # pathpost CAM Tools
//!
//! This crate turns toolpath descriptors into G-code text for laser and CNC
//! heads.
//!
//! ## Pipeline
//!
//! - **Tokens**: classify each path item word once (comment, coordinate,
//!   literal, config reference)
//! - **Dialects**: CNC, modern laser and legacy Grbl laser line emission
//! - **Multi-pass**: repeat laser passes with Z step-down between them
//! - **Fixed power**: preamble baking a laser power level into the program
//! - **Validation**: opt-in strict checks of descriptors
//! - **Optimizer**: opt-in removal of redundant lines

pub mod dialect;
pub mod error;
pub mod fixed_power;
pub mod generator;
pub mod multipass;
pub mod optimizer;
pub mod tokens;
pub mod validation;

// Re-export commonly used items
pub use dialect::Dialect;
pub use error::{CamToolError, CamToolResult};
pub use fixed_power::{process_for_fixed_power, process_for_fixed_power_checked};
pub use generator::{join_lines, GcodeGenerator, GeneratorOptions, LaserFirmware, Validation};
pub use multipass::{process_legacy_multi_pass, process_multi_pass, MultiPassPlan};
pub use optimizer::GCodeOptimizer;
pub use tokens::{classify, Token};
pub use validation::validate;
