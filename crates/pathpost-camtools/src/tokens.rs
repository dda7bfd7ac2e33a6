//! Path item classification
//!
//! Each word of a [`PathItem`] is classified once into a [`Token`]: a trailing
//! comment, an offset-adjusted coordinate, a literal word or a word whose value
//! comes from the configuration. The dialects only ever see tokens, so the
//! precedence between comment, coordinate and literal handling lives here.

use pathpost_core::{
    format_number, Axis, ConfigValue, GcodeConfig, ParamValue, PathItem, ToolpathDescriptor,
};

/// Keys whose value is appended to the line as-is
pub const COMMENT_KEYS: [&str; 2] = ["C", "N"];

/// One classified word of a path item
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// Trailing comment text (`C`) or raw line text (`N`)
    Comment(String),
    /// Coordinate with the descriptor offset already applied
    Coordinate(Axis, f64),
    /// Word emitted with its own value
    Raw { key: &'a str, value: &'a ParamValue },
    /// Word whose value is looked up in the config
    Symbolic {
        key: &'a str,
        name: &'a str,
        value: &'a ConfigValue,
    },
}

impl Token<'_> {
    /// Word letter, or `None` for comments
    pub fn key(&self) -> Option<&str> {
        match self {
            Token::Comment(_) => None,
            Token::Coordinate(axis, _) => Some(match axis {
                Axis::X => "X",
                Axis::Y => "Y",
                Axis::Z => "Z",
                Axis::B => "B",
            }),
            Token::Raw { key, .. } | Token::Symbolic { key, .. } => Some(key),
        }
    }

    /// Numeric value of the word, if it has one
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Token::Comment(_) => None,
            Token::Coordinate(_, v) => Some(*v),
            Token::Raw { value, .. } => value.as_f64(),
            Token::Symbolic { value, .. } => value.as_f64(),
        }
    }

    /// Value text for non-coordinate words, unformatted
    pub fn value_text(&self) -> String {
        match self {
            Token::Comment(text) => text.clone(),
            Token::Coordinate(_, v) => format_number(*v),
            Token::Raw { value, .. } => param_text(value),
            Token::Symbolic { value, .. } => value.to_string(),
        }
    }
}

/// Text form of a literal value
pub fn param_text(value: &ParamValue) -> String {
    match value {
        ParamValue::Number(n) => format_number(*n),
        ParamValue::Text(text) => text.clone(),
        ParamValue::ConfigRef(name) => name.clone(),
    }
}

fn resolve<'a>(
    value: &'a ParamValue,
    config: &'a GcodeConfig,
) -> Option<(&'a str, &'a ConfigValue)> {
    match value {
        ParamValue::Text(name) | ParamValue::ConfigRef(name) => {
            config.get(name).map(|resolved| (name.as_str(), resolved))
        }
        ParamValue::Number(_) => None,
    }
}

fn classify_coordinate<'a>(
    axis: Axis,
    key: &'a str,
    value: &'a ParamValue,
    toolpath: &ToolpathDescriptor,
    config: &'a GcodeConfig,
) -> Token<'a> {
    let base = match value {
        ParamValue::ConfigRef(_) => resolve(value, config).and_then(|(_, v)| v.as_f64()),
        _ => value.as_f64(),
    };
    match base {
        Some(v) => {
            let v = toolpath.offset(axis).map_or(v, |offset| v + offset);
            Token::Coordinate(axis, v)
        }
        None => {
            if let ParamValue::ConfigRef(name) = value {
                tracing::warn!(key, name = %name, "coordinate reference does not resolve to a number");
            }
            Token::Raw { key, value }
        }
    }
}

/// Classify every word of `item` in order.
///
/// Comments are returned as tokens too; callers pull them out. Plain text
/// values of non-coordinate words become [`Token::Symbolic`] when they name a
/// config parameter. Explicit references that do not resolve stay
/// [`Token::Raw`] and render as the reference name.
pub fn classify<'a>(
    item: &'a PathItem,
    toolpath: &ToolpathDescriptor,
    config: &'a GcodeConfig,
) -> Vec<Token<'a>> {
    item.iter()
        .map(|(key, value)| {
            if COMMENT_KEYS.contains(&key) {
                return Token::Comment(param_text(value));
            }
            if let Some(axis) = Axis::from_key(key) {
                return classify_coordinate(axis, key, value, toolpath, config);
            }
            match resolve(value, config) {
                Some((name, resolved)) => Token::Symbolic {
                    key,
                    name,
                    value: resolved,
                },
                None => {
                    if let ParamValue::ConfigRef(name) = value {
                        tracing::warn!(key, name = %name, "unresolved config reference, emitting name");
                    }
                    Token::Raw { key, value }
                }
            }
        })
        .collect()
}
