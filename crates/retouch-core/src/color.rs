//! Stroke colors parsed from CSS-style hex strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string does not start with `#`
    #[error("Color must start with '#': {0}")]
    MissingHash(String),

    /// Neither `#rgb` nor `#rrggbb`
    #[error("Color must have 3 or 6 hex digits: {0}")]
    InvalidLength(String),

    /// A character outside `0-9a-fA-F`
    #[error("Invalid hex digit in color: {0}")]
    InvalidDigit(String),
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// RGBA bytes with the given alpha.
    #[inline]
    pub fn to_rgba(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }

        let channel = |hex: &str| {
            u8::from_str_radix(hex, 16).map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };

        match digits.len() {
            6 => Ok(Color::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            // #abc is shorthand for #aabbcc
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Color::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(ColorParseError::InvalidLength(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        let color: Color = "#ff8000".parse().unwrap();
        assert_eq!(color, Color::rgb(255, 128, 0));
    }

    #[test]
    fn test_parse_short_form() {
        let color: Color = "#0fa".parse().unwrap();
        assert_eq!(color, Color::rgb(0, 255, 170));
    }

    #[test]
    fn test_parse_uppercase() {
        let color: Color = "#ABCDEF".parse().unwrap();
        assert_eq!(color, Color::rgb(0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "ff0000".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#ff00".parse::<Color>(),
            Err(ColorParseError::InvalidLength(_))
        ));
        assert!(matches!(
            "#gg0000".parse::<Color>(),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_display_round_trips_default() {
        assert_eq!(Color::BLACK.to_string(), "#000000");
        assert_eq!(Color::rgb(18, 52, 86).to_string(), "#123456");
    }
}
