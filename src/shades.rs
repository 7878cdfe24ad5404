//! Tonal ramp derivation.
//!
//! Given one base color, [`derive_shades`] produces the fixed six-entry
//! ramp (background tint, light tint, darker, base, dark text, white) that
//! the rest of the UI builds its surfaces from. This is a pure function:
//! identical input always yields identical output.

use crate::color::Color;

/// Substitute base for near-white inputs.
///
/// A wallpaper whose dominant color is near-white would otherwise produce
/// an entirely white, invisible ramp.
pub const NEAR_WHITE_SUBSTITUTE: Color = Color::new(0x69, 0x69, 0x69);

/// A fixed six-entry tonal ramp derived from one base color.
///
/// Always fully populated; `white` is always `#FFFFFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadeSet {
    /// Strong background tint: `lighten(base, 0.7)`.
    pub background: Color,
    /// Near-white accent tint: `lighten(base, 0.9)`.
    pub light_tint: Color,
    /// Slightly darkened accent: `darken(base, 0.3)`.
    pub darker: Color,
    /// The base color itself (after the near-white override, if any).
    pub base: Color,
    /// Text-on-light shade: `darken(base, 0.8)`.
    pub dark_text: Color,
    /// Constant pure white.
    pub white: Color,
}

/// Derives the fixed tonal ramp from a base color.
///
/// A near-white base (every channel above 240) is replaced with
/// [`NEAR_WHITE_SUBSTITUTE`] before any derivation.
pub fn derive_shades(base: Color) -> ShadeSet {
    let base = if base.is_near_white() {
        NEAR_WHITE_SUBSTITUTE
    } else {
        base
    };

    ShadeSet {
        background: base.lighten(0.7),
        light_tint: base.lighten(0.9),
        darker: base.darken(0.3),
        base,
        dark_text: base.darken(0.8),
        white: Color::WHITE,
    }
}
