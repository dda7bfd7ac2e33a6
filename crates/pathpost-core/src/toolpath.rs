//! Toolpath descriptors
//!
//! A [`ToolpathDescriptor`] is the hand-off from the toolpath builder: the
//! machine head type, an ordered list of [`PathItem`]s and optional origin
//! offsets. Each path item maps single-letter G-code words to values and keeps
//! them in insertion order, because that order is the order of the words on
//! the emitted line.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Machine head category
///
/// Unknown names are kept in [`HeadType::Unsupported`] so a descriptor still
/// deserializes and the generator can decline it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HeadType {
    /// 3D printing head
    Printing,
    /// Laser module
    Laser,
    /// CNC spindle
    Cnc,
    /// Anything else
    Unsupported(String),
}

impl HeadType {
    /// Whether the generator knows how to emit G-code for this head
    pub fn is_supported(&self) -> bool {
        !matches!(self, HeadType::Unsupported(_))
    }

    /// The wire name of this head type
    pub fn as_str(&self) -> &str {
        match self {
            HeadType::Printing => "printing",
            HeadType::Laser => "laser",
            HeadType::Cnc => "cnc",
            HeadType::Unsupported(name) => name,
        }
    }
}

impl From<String> for HeadType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "printing" => HeadType::Printing,
            "laser" => HeadType::Laser,
            "cnc" => HeadType::Cnc,
            _ => HeadType::Unsupported(name),
        }
    }
}

impl From<&str> for HeadType {
    fn from(name: &str) -> Self {
        HeadType::from(name.to_string())
    }
}

impl From<HeadType> for String {
    fn from(head: HeadType) -> Self {
        match head {
            HeadType::Unsupported(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for HeadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinate axes that receive offsets and fixed-precision formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    B,
}

impl Axis {
    /// Map a word key to an axis
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "X" => Some(Axis::X),
            "Y" => Some(Axis::Y),
            "Z" => Some(Axis::Z),
            "B" => Some(Axis::B),
            _ => None,
        }
    }

    /// The word letter for this axis
    pub fn letter(&self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::B => 'B',
        }
    }
}

/// Value carried by a path item word
///
/// `Text` is what plain JSON strings become; whether it names a config
/// parameter is decided against the config at generation time.
/// `ConfigRef` is an explicit reference, written as `{"ref": "workSpeed"}` on
/// the wire or built with [`ParamValue::config_ref`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireValue", into = "WireValue")]
pub enum ParamValue {
    Number(f64),
    Text(String),
    ConfigRef(String),
}

impl ParamValue {
    /// Explicit reference to a config parameter
    pub fn config_ref(name: impl Into<String>) -> Self {
        ParamValue::ConfigRef(name.into())
    }

    /// Numeric view of the value, parsing text when it holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(text) => text.trim().parse().ok(),
            ParamValue::ConfigRef(_) => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Ref {
        #[serde(rename = "ref")]
        name: String,
    },
}

impl From<WireValue> for ParamValue {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Number(n) => ParamValue::Number(n),
            WireValue::Bool(b) => ParamValue::Text(b.to_string()),
            WireValue::Text(text) => ParamValue::Text(text),
            WireValue::Ref { name } => ParamValue::ConfigRef(name),
        }
    }
}

impl From<ParamValue> for WireValue {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Number(n) => WireValue::Number(n),
            ParamValue::Text(text) => WireValue::Text(text),
            ParamValue::ConfigRef(name) => WireValue::Ref { name },
        }
    }
}

/// One drawing command: ordered word letters and their values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    entries: Vec<(String, ParamValue)>,
}

impl PathItem {
    /// Create an empty path item
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`PathItem::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a word. Re-inserting an existing key replaces the value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a word by key
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Iterate words in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PathItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct PathItemVisitor;

impl<'de> Visitor<'de> for PathItemVisitor {
    type Value = PathItem;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of G-code words to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PathItem, A::Error> {
        let mut item = PathItem::new();
        while let Some((key, value)) = access.next_entry::<String, ParamValue>()? {
            if item.get(&key).is_some() {
                tracing::debug!(key = %key, "duplicate word in path item, keeping last value");
            }
            item.insert(key, value);
        }
        Ok(item)
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PathItemVisitor)
    }
}

/// Toolpath hand-off from the toolpath builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolpathDescriptor {
    /// Machine head; selects the emission dialect
    pub head_type: HeadType,
    /// Path items in machining order
    #[serde(default)]
    pub data: Vec<PathItem>,
    /// Added to every X word
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,
    /// Added to every Y word
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,
    /// Added to every B word
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_b: Option<f64>,
}

impl ToolpathDescriptor {
    /// Create an empty descriptor for the given head
    pub fn new(head_type: impl Into<HeadType>) -> Self {
        Self {
            head_type: head_type.into(),
            data: Vec::new(),
            position_x: None,
            position_y: None,
            rotation_b: None,
        }
    }

    /// Set the X/Y origin offset
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position_x = Some(x);
        self.position_y = Some(y);
        self
    }

    /// Set the rotary B offset
    pub fn with_rotation_b(mut self, b: f64) -> Self {
        self.rotation_b = Some(b);
        self
    }

    /// Append a path item
    pub fn push(&mut self, item: PathItem) {
        self.data.push(item);
    }

    /// Builder form of [`ToolpathDescriptor::push`]
    pub fn with_item(mut self, item: PathItem) -> Self {
        self.data.push(item);
        self
    }

    /// Offset to add for an axis, if any.
    ///
    /// Zero and NaN offsets count as absent; Z never has one.
    pub fn offset(&self, axis: Axis) -> Option<f64> {
        let raw = match axis {
            Axis::X => self.position_x,
            Axis::Y => self.position_y,
            Axis::B => self.rotation_b,
            Axis::Z => None,
        };
        raw.filter(|v| *v != 0.0 && !v.is_nan())
    }
}
