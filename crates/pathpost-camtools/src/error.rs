//! Error types for the CAM tools crate.
//!
//! The permissive generation path never fails; these errors surface only from
//! the opt-in strict entry points.

use pathpost_core::GenerationError;
use thiserror::Error;

/// Errors that can occur during strict G-code generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CamToolError {
    /// A toolpath descriptor failed validation.
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// A descriptor of a batch failed validation.
    #[error("Toolpath {descriptor} of batch: {source}")]
    Batch {
        /// Position of the descriptor within the batch.
        descriptor: usize,
        source: GenerationError,
    },

    /// Invalid parameters were provided in the G-code configuration.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
