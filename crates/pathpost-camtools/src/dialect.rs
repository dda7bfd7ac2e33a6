//! G-code emission dialects
//!
//! A dialect turns one classified path item into one line of G-code text.
//! CNC and the modern laser dialect share their word rules; the legacy Grbl
//! laser dialect filters and rewrites words for older laser firmware.

use crate::generator::LaserFirmware;
use crate::tokens::{classify, Token};
use pathpost_core::{
    format_fixed, Axis, GcodeConfig, HeadType, PathItem, ToolpathDescriptor, LEGACY_PRECISION,
    MODERN_PRECISION,
};

/// Laser power scale used by the legacy firmware for `S` words
const LEGACY_POWER_SCALE: f64 = 1000.0;
/// Input domain of `S` words in the legacy dialect
const LEGACY_POWER_INPUT_MAX: f64 = 255.0;

/// Emission dialect selected from the head type and machine profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// CNC spindle; also used for printing heads
    Cnc,
    /// Current laser firmware
    Laser,
    /// Older Grbl-based laser firmware
    LegacyGrblLaser,
}

impl Dialect {
    /// Pick the dialect for a head. Returns `None` for unsupported heads.
    pub fn select(head_type: &HeadType, firmware: LaserFirmware) -> Option<Self> {
        match head_type {
            HeadType::Cnc | HeadType::Printing => Some(Dialect::Cnc),
            HeadType::Laser => Some(match firmware {
                LaserFirmware::Modern => Dialect::Laser,
                LaserFirmware::LegacyGrbl => Dialect::LegacyGrblLaser,
            }),
            HeadType::Unsupported(_) => None,
        }
    }

    /// Decimal places used for coordinate words
    pub fn coordinate_precision(&self) -> usize {
        match self {
            Dialect::Cnc | Dialect::Laser => MODERN_PRECISION,
            Dialect::LegacyGrblLaser => LEGACY_PRECISION,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Cnc => "cnc",
            Dialect::Laser => "laser",
            Dialect::LegacyGrblLaser => "laser-legacy-grbl",
        }
    }

    /// Emit the line for one path item.
    ///
    /// Words are joined with a single space and the comment, if any, is
    /// appended directly with no separator.
    pub fn emit_line(
        &self,
        item: &PathItem,
        toolpath: &ToolpathDescriptor,
        config: &GcodeConfig,
    ) -> String {
        let tokens = classify(item, toolpath, config);
        let precision = self.coordinate_precision();
        let (words, comment) = match self {
            Dialect::Cnc | Dialect::Laser => modern_words(&tokens, precision),
            Dialect::LegacyGrblLaser => legacy_words(&tokens, precision),
        };
        let mut line = words.join(" ");
        if let Some(comment) = comment {
            line.push_str(&comment);
        }
        line
    }
}

fn coordinate_word(axis: Axis, value: f64, precision: usize) -> String {
    format!("{}{}", axis.letter(), format_fixed(value, precision))
}

fn modern_words(tokens: &[Token<'_>], precision: usize) -> (Vec<String>, Option<String>) {
    let mut words = Vec::with_capacity(tokens.len());
    let mut comment = None;
    for token in tokens {
        match token {
            Token::Comment(text) => comment = Some(text.clone()),
            Token::Coordinate(axis, value) => {
                words.push(coordinate_word(*axis, *value, precision))
            }
            Token::Raw { key, .. } | Token::Symbolic { key, .. } => {
                words.push(format!("{}{}", key, token.value_text()))
            }
        }
    }
    (words, comment)
}

/// Word filter of the legacy Grbl laser firmware.
///
/// Parameter words are only written once a `G` or `M` word has opened the
/// line. `M3` becomes `M4`, fan words `M106`/`M107` are dropped but still open
/// the line, and `S` is rescaled from 0-255 to 0-1000. Other letters are
/// skipped.
fn legacy_words(tokens: &[Token<'_>], precision: usize) -> (Vec<String>, Option<String>) {
    let mut words = Vec::with_capacity(tokens.len());
    let mut comment = None;
    let mut has_command = false;
    for token in tokens {
        match token {
            Token::Comment(text) => comment = Some(text.clone()),
            Token::Coordinate(axis, value) => {
                if has_command {
                    words.push(coordinate_word(*axis, *value, precision));
                }
            }
            Token::Raw { key, .. } | Token::Symbolic { key, .. } => match *key {
                "G" => {
                    has_command = true;
                    words.push(format!("G{}", token.value_text()));
                }
                "M" => {
                    has_command = true;
                    match token.numeric() {
                        Some(code) if code == 106.0 || code == 107.0 => {}
                        Some(code) if code == 3.0 => words.push("M4".to_string()),
                        _ => words.push(format!("M{}", token.value_text())),
                    }
                }
                "S" if has_command => {
                    if let Some(power) = token.numeric() {
                        let scaled = power / LEGACY_POWER_INPUT_MAX * LEGACY_POWER_SCALE;
                        words.push(format!("S{}", format_fixed(scaled, MODERN_PRECISION)));
                    }
                }
                "F" | "P" if has_command => {
                    words.push(format!("{}{}", key, token.value_text()));
                }
                _ => {}
            },
        }
    }
    (words, comment)
}
