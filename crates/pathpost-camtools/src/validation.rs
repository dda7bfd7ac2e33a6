//! Strict validation of toolpath descriptors.
//!
//! The generator accepts anything by default. This pass backs the opt-in
//! strict mode: it reports the first word that the permissive path would have
//! dropped, stringified or guessed at.

use crate::tokens::COMMENT_KEYS;
use pathpost_core::{
    Axis, GcodeConfig, GenerationError, GenerationResult, ParamValue, PathItem,
    ToolpathDescriptor,
};

fn is_word_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

fn check_coordinate(
    index: usize,
    axis: Axis,
    value: &ParamValue,
    config: &GcodeConfig,
) -> GenerationResult<()> {
    let number = match value {
        ParamValue::Number(n) => *n,
        ParamValue::Text(text) => {
            text.trim()
                .parse::<f64>()
                .map_err(|_| GenerationError::NonNumericCoordinate {
                    index,
                    axis: axis.letter(),
                    value: text.clone(),
                })?
        }
        ParamValue::ConfigRef(name) => {
            let resolved =
                config
                    .get(name)
                    .ok_or_else(|| GenerationError::UnresolvedReference {
                        index,
                        key: axis.letter(),
                        name: name.clone(),
                    })?;
            resolved
                .as_f64()
                .ok_or_else(|| GenerationError::NonNumericCoordinate {
                    index,
                    axis: axis.letter(),
                    value: resolved.to_string(),
                })?
        }
    };
    if number.is_finite() {
        Ok(())
    } else {
        Err(GenerationError::NonFiniteCoordinate {
            index,
            axis: axis.letter(),
        })
    }
}

fn check_item(index: usize, item: &PathItem, config: &GcodeConfig) -> GenerationResult<()> {
    for (key, value) in item.iter() {
        if !is_word_key(key) {
            return Err(GenerationError::InvalidKey {
                index,
                key: key.to_string(),
            });
        }
        if COMMENT_KEYS.contains(&key) {
            continue;
        }
        if let Some(axis) = Axis::from_key(key) {
            check_coordinate(index, axis, value, config)?;
            continue;
        }
        // is_word_key guarantees exactly one char
        let letter = key.chars().next().unwrap_or_default();
        match value {
            ParamValue::ConfigRef(name) if !config.contains(name) => {
                return Err(GenerationError::UnresolvedReference {
                    index,
                    key: letter,
                    name: name.clone(),
                });
            }
            ParamValue::Text(text) if config.contains(text) => {
                return Err(GenerationError::AmbiguousValue {
                    index,
                    key: letter,
                    value: text.clone(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Validate a descriptor against its config.
///
/// Rejects unsupported head types, keys that are not a single ASCII letter,
/// coordinates that are not finite numbers, explicit references the config
/// cannot satisfy, and plain text values that collide with a config
/// parameter name (strict mode expects an explicit reference there).
pub fn validate(toolpath: &ToolpathDescriptor, config: &GcodeConfig) -> GenerationResult<()> {
    if !toolpath.head_type.is_supported() {
        return Err(GenerationError::UnsupportedHeadType {
            head_type: toolpath.head_type.to_string(),
        });
    }
    toolpath
        .data
        .iter()
        .enumerate()
        .try_for_each(|(index, item)| check_item(index, item, config))
}
