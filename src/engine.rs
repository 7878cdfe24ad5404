//! Theme engine orchestration.
//!
//! [`ThemeEngine`] ties the extraction pipeline to the shared
//! [`StyleRegistry`]: wallpaper changes run the full sample, quantize,
//! select path, user-picked swatches bypass extraction and go straight to
//! the shade generator, and every apply goes through the registry's
//! generation guard so a slow extraction can never clobber a newer theme.

use log::{debug, warn};

use crate::color::Color;
use crate::error::ThemeError;
use crate::extract::sampler::{ImageByteLoader, ImageSource, sample};
use crate::extract::select::DominantPalette;
use crate::extract::{extract_palette, filter_and_quantize, select_dominant};
use crate::registry::{StyleRegistry, ThemeTokens};

/// Drives theme updates against a shared registry.
///
/// One engine is wired per process, holding the registry handle and the
/// host's byte loader for remote wallpaper URLs.
pub struct ThemeEngine<L: ImageByteLoader> {
    registry: StyleRegistry,
    loader: L,
}

impl<L: ImageByteLoader> ThemeEngine<L> {
    /// Creates an engine writing to the given registry.
    pub fn new(registry: StyleRegistry, loader: L) -> Self {
        Self { registry, loader }
    }

    /// Returns the registry this engine writes to.
    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Extracts a palette from a wallpaper and applies it.
    ///
    /// Returns `Ok(true)` when the theme was applied, `Ok(false)` when the
    /// extraction finished but was superseded by a newer update and its
    /// result was discarded. On error the registry is left untouched (the
    /// previously active theme stays in effect) and the failure is logged;
    /// there is no retry.
    pub fn apply_wallpaper(&self, source: &ImageSource) -> Result<bool, ThemeError> {
        let generation = self.registry.begin_update();

        let palette = match self.extract(source) {
            Ok(palette) => palette,
            Err(err) => {
                self.registry.abandon(generation);
                warn!("wallpaper extraction failed, keeping active theme: {err}");
                return Err(err);
            }
        };

        let applied = self
            .registry
            .apply(generation, &ThemeTokens::from_palette(&palette));
        if applied {
            debug!("applied wallpaper palette, primary {}", palette.primary);
        } else {
            debug!("discarded stale wallpaper palette, primary {}", palette.primary);
        }
        Ok(applied)
    }

    /// Runs the extraction pipeline without touching the registry.
    ///
    /// Useful for previewing a wallpaper's palette before committing to it.
    pub fn extract(&self, source: &ImageSource) -> Result<DominantPalette, ThemeError> {
        let buffer = sample(source, &self.loader)?;
        let weights = filter_and_quantize(&buffer);
        let palette = select_dominant(&weights);
        debug!(
            "extracted palette from {} surviving clusters, primary {}",
            weights.len(),
            palette.primary
        );
        Ok(palette)
    }

    /// Applies a theme built from a user-picked hex color, bypassing
    /// extraction entirely.
    ///
    /// Malformed hex input is rejected with [`ThemeError::InvalidHex`] and
    /// leaves the registry untouched.
    pub fn apply_custom_color(&self, hex: &str) -> Result<bool, ThemeError> {
        let base = Color::from_hex(hex)?;
        let generation = self.registry.begin_update();
        Ok(self
            .registry
            .apply(generation, &ThemeTokens::from_base_color(base)))
    }

    /// Restores the built-in default theme.
    pub fn reset_default(&self) {
        self.registry.reset_default();
    }
}

/// Convenience wrapper over [`extract_palette`] for hosts that already hold
/// decoded bytes.
pub fn palette_from_bytes(bytes: &[u8]) -> Result<DominantPalette, ThemeError> {
    let buffer = crate::extract::sample_bytes(bytes)?;
    Ok(extract_palette(&buffer))
}
