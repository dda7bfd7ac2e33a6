//! Resolved G-code configuration
//!
//! [`GcodeConfig`] is the flat parameter map resolved from a model's settings.
//! Path items may name any of its keys instead of carrying a literal value,
//! and the multi-pass and fixed-power post-processors read their switches
//! from it. Absent entries read as disabled or zero.

use crate::format::format_number;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Well-known parameter names
pub mod keys {
    pub const JOG_SPEED: &str = "jogSpeed";
    pub const WORK_SPEED: &str = "workSpeed";
    pub const PLUNGE_SPEED: &str = "plungeSpeed";
    pub const DWELL_TIME: &str = "dwellTime";
    pub const MULTI_PASS_ENABLED: &str = "multiPassEnabled";
    pub const MULTI_PASSES: &str = "multiPasses";
    pub const MULTI_PASS_DEPTH: &str = "multiPassDepth";
    pub const FIXED_POWER_ENABLED: &str = "fixedPowerEnabled";
    pub const FIXED_POWER: &str = "fixedPower";
    pub const PATH_TYPE: &str = "pathType";
    pub const INITIAL_HEIGHT_OFFSET: &str = "initialHeightOffset";
}

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Explicit null; reads as absent
    Null,
}

impl ConfigValue {
    /// Numeric view; booleans read as 1/0 and numeric text is parsed
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            ConfigValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            ConfigValue::Text(text) => text.trim().parse().ok(),
            ConfigValue::Null => None,
        }
    }

    /// Truthiness: nonzero numbers, `true` and non-empty text
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Bool(b) => *b,
            ConfigValue::Number(n) => *n != 0.0 && !n.is_nan(),
            ConfigValue::Text(text) => !text.is_empty(),
            ConfigValue::Null => false,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Number(n) => f.write_str(&format_number(*n)),
            ConfigValue::Text(text) => f.write_str(text),
            ConfigValue::Null => f.write_str("null"),
        }
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Number(value as f64)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

/// Flat mapping from parameter name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GcodeConfig {
    params: BTreeMap<String, ConfigValue>,
}

impl GcodeConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`GcodeConfig::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a parameter
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        self.params.insert(name.into(), value.into());
    }

    /// Look up a parameter; explicit nulls read as absent
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.params
            .get(name)
            .filter(|value| !matches!(value, ConfigValue::Null))
    }

    /// Whether `name` is a parameter this config defines
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Numeric parameter, if present and numeric
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ConfigValue::as_f64)
    }

    /// Boolean switch; absent reads as off
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(ConfigValue::is_truthy)
    }

    /// Iterate parameter names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn multi_pass_enabled(&self) -> bool {
        self.flag(keys::MULTI_PASS_ENABLED)
    }

    /// Pass count, truncated toward zero; absent reads as 0
    pub fn multi_passes(&self) -> i64 {
        self.number(keys::MULTI_PASSES)
            .filter(|n| n.is_finite())
            .map(|n| n.trunc() as i64)
            .unwrap_or(0)
    }

    pub fn multi_pass_depth(&self) -> f64 {
        self.number(keys::MULTI_PASS_DEPTH).unwrap_or(0.0)
    }

    pub fn fixed_power_enabled(&self) -> bool {
        self.flag(keys::FIXED_POWER_ENABLED)
    }

    /// Fixed laser power in percent
    pub fn fixed_power(&self) -> f64 {
        self.number(keys::FIXED_POWER).unwrap_or(0.0)
    }

    pub fn path_type(&self) -> Option<&str> {
        match self.get(keys::PATH_TYPE) {
            Some(ConfigValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn initial_height_offset(&self) -> f64 {
        self.number(keys::INITIAL_HEIGHT_OFFSET).unwrap_or(0.0)
    }
}
