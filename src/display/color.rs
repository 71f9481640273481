//! RGBA color values
//!
//! Colors can be parsed from hex strings (`#RRGGBB`, `#RRGGBBAA`, with or
//! without the leading `#`) or from component lists (`r,g,b` / `r,g,b,a`).

use super::error::{DisplayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A color with 8-bit red, green, blue and alpha channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Parse a hex color string
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');

        if digits.len() != 6 && digits.len() != 8 {
            return Err(DisplayError::InvalidAttribute(format!(
                "Invalid hex color '{}': expected 6 or 8 hex digits",
                hex
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| {
                    DisplayError::InvalidAttribute(format!("Invalid hex color '{}'", hex))
                })
        };

        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        let a = if digits.len() == 8 { channel(6..8)? } else { 255 };

        Ok(Color { r, g, b, a })
    }

    /// Parse either a hex string or a comma separated component list
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if !value.contains(',') {
            return Self::from_hex(value);
        }

        let parts: Vec<&str> = value.split(',').map(|p| p.trim()).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(DisplayError::InvalidAttribute(format!(
                "Invalid color '{}': expected r,g,b or r,g,b,a",
                value
            )));
        }

        let mut channels = [255u8; 4];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part.parse::<u8>().map_err(|_| {
                DisplayError::InvalidAttribute(format!(
                    "Invalid color component '{}' in '{}': expected an integer from 0 to 255",
                    part, value
                ))
            })?;
        }

        Ok(Color::rgba(channels[0], channels[1], channels[2], channels[3]))
    }

    /// Linear blend between two colors at t ∈ [0, 1]
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        // 6-digit hex
        assert_eq!(Color::from_hex("#FF0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hex("#1F78B4").unwrap(), Color::rgb(31, 120, 180));

        // Without #
        assert_eq!(Color::from_hex("00FF00").unwrap(), Color::rgb(0, 255, 0));

        // 8-digit hex keeps alpha
        assert_eq!(
            Color::from_hex("#44015480").unwrap(),
            Color::rgba(68, 1, 84, 128)
        );

        // Invalid
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("GGGGGG").is_err());
    }

    #[test]
    fn test_parse_components() {
        assert_eq!(Color::parse("255, 165, 0").unwrap(), Color::ORANGE);
        assert_eq!(
            Color::parse("10,20,30,40").unwrap(),
            Color::rgba(10, 20, 30, 40)
        );
        assert!(matches!(
            Color::parse("256,0,0"),
            Err(DisplayError::InvalidAttribute(_))
        ));
        assert!(Color::parse("1,2").is_err());
        assert!(Color::parse("-1,0,0").is_err());
    }

    #[test]
    fn test_lerp_and_hex() {
        let mid = Color::BLACK.lerp(&Color::WHITE, 0.5);
        assert_eq!(mid, Color::rgb(128, 128, 128));
        assert_eq!(Color::ORANGE.to_hex(), "#FFA500");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_hex(), "#00000000");
    }

    #[test]
    fn test_alpha_defaults_when_deserializing() {
        let color: Color = serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3}"#).unwrap();
        assert_eq!(color, Color::rgb(1, 2, 3));
    }
}
