//! Error handling for pathpost
//!
//! [`GenerationError`] reports why strict validation rejected a toolpath
//! descriptor. Note that the default permissive generation path never produces a
//! [`GenerationError`]; it exists for the opt-in strict mode only.

use thiserror::Error;

/// Generation error type
///
/// Represents a toolpath descriptor that the strict validator refuses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Head type is not one of printing, laser or cnc
    #[error("Unsupported head type: {head_type}")]
    UnsupportedHeadType {
        /// The rejected head type name.
        head_type: String,
    },

    /// Path item key is not a single ASCII letter
    #[error("Invalid key '{key}' in path item {index}")]
    InvalidKey {
        /// Index of the path item within the descriptor data.
        index: usize,
        /// The offending key.
        key: String,
    },

    /// Coordinate word carries something other than a number
    #[error("Coordinate {axis} in path item {index} is not numeric: {value}")]
    NonNumericCoordinate {
        /// Index of the path item within the descriptor data.
        index: usize,
        /// The coordinate letter.
        axis: char,
        /// The value as it would have been emitted.
        value: String,
    },

    /// Coordinate word is NaN or infinite
    #[error("Coordinate {axis} in path item {index} is not finite")]
    NonFiniteCoordinate {
        /// Index of the path item within the descriptor data.
        index: usize,
        /// The coordinate letter.
        axis: char,
    },

    /// Explicit config reference names a parameter the config lacks
    #[error("Unresolved config reference '{name}' for {key} in path item {index}")]
    UnresolvedReference {
        /// Index of the path item within the descriptor data.
        index: usize,
        /// The word letter carrying the reference.
        key: char,
        /// The referenced parameter name.
        name: String,
    },

    /// Plain text value coincides with a config parameter name
    #[error("Ambiguous value '{value}' for {key} in path item {index}: matches a config parameter name")]
    AmbiguousValue {
        /// Index of the path item within the descriptor data.
        index: usize,
        /// The word letter carrying the value.
        key: char,
        /// The text value.
        value: String,
    },
}

/// Result type alias for strict generation
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;
