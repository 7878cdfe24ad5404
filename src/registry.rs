//! The shared style-token registry.
//!
//! This is the one piece of shared mutable state in the crate: a named
//! table of the currently active theme colors, read by the rendering layer
//! and overwritten wholesale by each successful apply. It is an explicit,
//! injectable handle rather than a hidden singleton, so tests construct a
//! fresh one and production wiring binds exactly one instance for the
//! process lifetime.
//!
//! Concurrent extractions are sequenced with a generation token: each
//! update request gets a monotonically increasing [`Generation`], and an
//! apply whose generation is stale (a newer request or a reset happened in
//! the meantime) is discarded instead of clobbering the newer theme.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::color::Color;
use crate::extract::select::DominantPalette;
use crate::shades::{ShadeSet, derive_shades};

/// A named style token, the stable contract read by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    Primary,
    Secondary,
    Accent,
    BgGradientStart,
    BgGradientEnd,
    BgColor,
    AccentLightTint,
    DarkerColor,
    DarkColor,
    TextColorDark,
    WhitishColor,
}

impl StyleToken {
    /// Every token, in the order they appear in snapshots.
    pub const ALL: [StyleToken; 11] = [
        StyleToken::Primary,
        StyleToken::Secondary,
        StyleToken::Accent,
        StyleToken::BgGradientStart,
        StyleToken::BgGradientEnd,
        StyleToken::BgColor,
        StyleToken::AccentLightTint,
        StyleToken::DarkerColor,
        StyleToken::DarkColor,
        StyleToken::TextColorDark,
        StyleToken::WhitishColor,
    ];

    /// The token's stable name.
    pub fn name(self) -> &'static str {
        match self {
            StyleToken::Primary => "primary",
            StyleToken::Secondary => "secondary",
            StyleToken::Accent => "accent",
            StyleToken::BgGradientStart => "bg-gradient-start",
            StyleToken::BgGradientEnd => "bg-gradient-end",
            StyleToken::BgColor => "bg-color",
            StyleToken::AccentLightTint => "accent-light-tint",
            StyleToken::DarkerColor => "darker-color",
            StyleToken::DarkColor => "dark-color",
            StyleToken::TextColorDark => "text-color-dark",
            StyleToken::WhitishColor => "whitish-color",
        }
    }
}

/// The full eleven-token table value written by one apply.
///
/// Always constructed whole, so readers never observe a partial theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub bg_gradient_start: Color,
    pub bg_gradient_end: Color,
    pub shades: ShadeSet,
}

impl ThemeTokens {
    /// Builds the table from an extracted palette, deriving the tonal ramp
    /// from the primary color.
    pub fn from_palette(palette: &DominantPalette) -> Self {
        Self {
            primary: palette.primary,
            secondary: palette.secondary,
            accent: palette.accent,
            bg_gradient_start: palette.bg_gradient_start,
            bg_gradient_end: palette.bg_gradient_end,
            shades: derive_shades(palette.primary),
        }
    }

    /// Builds the table from a single user-picked color.
    ///
    /// The palette entries are synthesized from the ramp (primary is the
    /// ramp base, secondary its darker shade, accent its light tint) so the
    /// table is still written whole.
    pub fn from_base_color(base: Color) -> Self {
        let shades = derive_shades(base);
        let (bg_gradient_start, bg_gradient_end) =
            crate::extract::select::compose_gradient(shades.base, shades.darker);
        Self {
            primary: shades.base,
            secondary: shades.darker,
            accent: shades.light_tint,
            bg_gradient_start,
            bg_gradient_end,
            shades,
        }
    }

    /// Looks up one token's color.
    pub fn get(&self, token: StyleToken) -> Color {
        match token {
            StyleToken::Primary => self.primary,
            StyleToken::Secondary => self.secondary,
            StyleToken::Accent => self.accent,
            StyleToken::BgGradientStart => self.bg_gradient_start,
            StyleToken::BgGradientEnd => self.bg_gradient_end,
            StyleToken::BgColor => self.shades.background,
            StyleToken::AccentLightTint => self.shades.light_tint,
            StyleToken::DarkerColor => self.shades.darker,
            StyleToken::DarkColor => self.shades.base,
            StyleToken::TextColorDark => self.shades.dark_text,
            StyleToken::WhitishColor => self.shades.white,
        }
    }
}

impl Default for ThemeTokens {
    /// The built-in default table, derived from the aurora palette.
    fn default() -> Self {
        Self::from_palette(&DominantPalette::AURORA)
    }
}

/// Theme lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePhase {
    /// The built-in default table is active and nothing has been applied.
    Default,
    /// An extraction is in flight.
    Extracting,
    /// An extracted or user-picked theme is active.
    Applied,
}

/// An update sequence token handed out by [`StyleRegistry::begin_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

struct RegistryInner {
    tokens: ThemeTokens,
    latest: u64,
    phase: ThemePhase,
    /// Phase to restore when an in-flight extraction fails.
    resting_phase: ThemePhase,
}

/// The process-wide style-token table.
///
/// Cheap to clone; all clones share the same table. Constructed with the
/// built-in default palette, overwritten wholesale by each apply, never
/// torn down.
#[derive(Clone)]
pub struct StyleRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleRegistry {
    /// Creates a registry holding the built-in default table.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                tokens: ThemeTokens::default(),
                latest: 0,
                phase: ThemePhase::Default,
                resting_phase: ThemePhase::Default,
            })),
        }
    }

    /// Starts a new update, superseding any update still in flight.
    ///
    /// The returned generation must be passed to [`apply`](Self::apply)
    /// (or [`abandon`](Self::abandon) on failure).
    pub fn begin_update(&self) -> Generation {
        let mut inner = self.write();
        inner.latest += 1;
        if inner.phase != ThemePhase::Extracting {
            inner.resting_phase = inner.phase;
        }
        inner.phase = ThemePhase::Extracting;
        Generation(inner.latest)
    }

    /// Applies a full token table under a single write.
    ///
    /// Returns false, leaving the table untouched, if the generation is
    /// stale (a newer update began or a reset happened since). Applying the
    /// same table twice is idempotent apart from the generation bookkeeping.
    pub fn apply(&self, generation: Generation, tokens: &ThemeTokens) -> bool {
        let mut inner = self.write();
        if generation.0 != inner.latest {
            return false;
        }
        inner.tokens = *tokens;
        inner.phase = ThemePhase::Applied;
        inner.resting_phase = ThemePhase::Applied;
        true
    }

    /// Marks an in-flight update as failed.
    ///
    /// Restores the pre-extraction phase if no newer update superseded it;
    /// the table itself is never touched.
    pub fn abandon(&self, generation: Generation) {
        let mut inner = self.write();
        if generation.0 == inner.latest {
            inner.phase = inner.resting_phase;
        }
    }

    /// Resets to the built-in default table.
    ///
    /// Also invalidates any extraction still in flight, so a slow result
    /// cannot overwrite an explicit reset.
    pub fn reset_default(&self) {
        let mut inner = self.write();
        inner.latest += 1;
        inner.tokens = ThemeTokens::default();
        inner.phase = ThemePhase::Default;
        inner.resting_phase = ThemePhase::Default;
    }

    /// Reads one token's current color.
    pub fn get(&self, token: StyleToken) -> Color {
        self.read().tokens.get(token)
    }

    /// Returns the current token table value.
    pub fn tokens(&self) -> ThemeTokens {
        self.read().tokens
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> ThemePhase {
        self.read().phase
    }

    /// Returns the flat name-to-color mapping read by the rendering layer.
    pub fn snapshot(&self) -> BTreeMap<&'static str, Color> {
        let tokens = self.tokens();
        StyleToken::ALL
            .iter()
            .map(|&token| (token.name(), tokens.get(token)))
            .collect()
    }

    /// Serializes the snapshot as a flat JSON object of hex strings.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
