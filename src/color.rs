//! The `Color` value type.
//!
//! An immutable 8-bit RGB triple, interconvertible with an uppercase
//! `#RRGGBB` hex string. All derived arithmetic (lighten, darken, scale)
//! rounds to the nearest integer and clamps channels to [0, 255], so no
//! derivation can produce an out-of-range value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// An opaque RGB color with 8-bit channels.
///
/// No alpha is carried: transparency is filtered out during extraction and
/// style tokens are always fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Pure white, used as the constant `white` entry of every shade set.
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Creates a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string.
    ///
    /// Accepts exactly six hex digits with an optional leading `#`, in
    /// either case. Anything else is rejected with
    /// [`ThemeError::InvalidHex`].
    pub fn from_hex(s: &str) -> Result<Self, ThemeError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        // Length is in bytes, so non-ASCII input must be rejected before
        // slicing digit pairs out of the string.
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ThemeError::InvalidHex {
                input: s.to_string(),
                reason: "expected exactly 6 hex digits",
            });
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ThemeError::InvalidHex {
                input: s.to_string(),
                reason: "expected hex digits 0-9/A-F",
            })
        };
        Ok(Self::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }

    /// Formats the color as an uppercase `#RRGGBB` string.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Returns true if every channel is above 240.
    ///
    /// Such colors are too close to white to anchor a tonal ramp; the shade
    /// generator substitutes a neutral gray for them.
    pub fn is_near_white(self) -> bool {
        self.r > 240 && self.g > 240 && self.b > 240
    }

    /// Moves each channel toward 255 by the given factor:
    /// `c + (255 - c) * f`.
    pub fn lighten(self, factor: f32) -> Self {
        self.map(|c| c + (255.0 - c) * factor)
    }

    /// Moves each channel toward 0 by the given factor: `c * (1 - f)`.
    pub fn darken(self, factor: f32) -> Self {
        self.map(|c| c * (1.0 - factor))
    }

    /// Scales each channel by the given factor: `c * f`.
    pub fn scale(self, factor: f32) -> Self {
        self.map(|c| c * factor)
    }

    /// Applies a per-channel transform, rounding and clamping to [0, 255].
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        let channel = |c: u8| f(c as f32).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = ThemeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s)
    }
}
