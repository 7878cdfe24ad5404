//! Dominant color selection and palette composition.
//!
//! Ranks the quantizer's cluster weights, picks the top three colors, and
//! derives the two background gradient stops. Images without enough
//! distinct color data fall back to the built-in aurora palette rather
//! than synthesizing colors from noise.

use std::collections::HashMap;

use crate::color::Color;
use crate::extract::quantize::ClusterKey;

/// How many ranked clusters the selector keeps around.
///
/// Three become the palette; the rest are available to swatch pickers via
/// [`top_clusters`].
const MAX_RANKED: usize = 10;

/// The minimum number of distinct surviving buckets needed to build a
/// palette from the image itself.
const MIN_CLUSTERS: usize = 3;

/// The five-color palette driving the theme.
///
/// Always fully populated: either the top three extracted colors plus two
/// composed gradient stops, or the whole [aurora fallback](Self::AURORA).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DominantPalette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub bg_gradient_start: Color,
    pub bg_gradient_end: Color,
}

impl DominantPalette {
    /// The built-in "aurora" palette, used whenever an image yields fewer
    /// than three distinct color clusters.
    pub const AURORA: DominantPalette = DominantPalette {
        primary: Color::new(0xA7, 0x8B, 0xFA),
        secondary: Color::new(0x81, 0x8C, 0xF8),
        accent: Color::new(0xC0, 0x84, 0xFC),
        bg_gradient_start: Color::new(0x1E, 0x1B, 0x4B),
        bg_gradient_end: Color::new(0x31, 0x2E, 0x81),
    };
}

/// Returns up to the top ten clusters, heaviest first.
///
/// Equal weights tie-break on the lower [`ClusterKey`], so identical input
/// always ranks identically regardless of hash-map iteration order.
pub fn top_clusters(weights: &HashMap<ClusterKey, f32>) -> Vec<(ClusterKey, f32)> {
    let mut ranked: Vec<(ClusterKey, f32)> = weights.iter().map(|(&k, &w)| (k, w)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(MAX_RANKED);
    ranked
}

/// Selects the dominant palette from accumulated cluster weights.
///
/// The three heaviest clusters become primary, secondary, and accent, and
/// the gradient stops are composed from the first two. Fewer than three
/// surviving clusters (near-monochrome or fully filtered images) yields
/// [`DominantPalette::AURORA`] whole, never a partial result.
pub fn select_dominant(weights: &HashMap<ClusterKey, f32>) -> DominantPalette {
    if weights.len() < MIN_CLUSTERS {
        return DominantPalette::AURORA;
    }

    let ranked = top_clusters(weights);
    let primary = ranked[0].0.color();
    let secondary = ranked[1].0.color();
    let accent = ranked[2].0.color();
    let (bg_gradient_start, bg_gradient_end) = compose_gradient(primary, secondary);

    DominantPalette {
        primary,
        secondary,
        accent,
        bg_gradient_start,
        bg_gradient_end,
    }
}

/// Composes the background gradient stops from the two leading colors.
///
/// Scaled low enough that gradient backgrounds stay legible behind light
/// text: start is primary x 0.3, end is secondary x 0.4.
pub fn compose_gradient(primary: Color, secondary: Color) -> (Color, Color) {
    (primary.scale(0.3), secondary.scale(0.4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights_of(entries: &[((u8, u8, u8), f32)]) -> HashMap<ClusterKey, f32> {
        entries
            .iter()
            .map(|&((r, g, b), w)| (ClusterKey::from_pixel(r, g, b), w))
            .collect()
    }

    #[test]
    fn fewer_than_three_clusters_falls_back_to_aurora() {
        assert_eq!(select_dominant(&HashMap::new()), DominantPalette::AURORA);

        let one = weights_of(&[((250, 0, 0), 12.0)]);
        assert_eq!(select_dominant(&one), DominantPalette::AURORA);

        let two = weights_of(&[((250, 0, 0), 12.0), ((0, 250, 0), 8.0)]);
        assert_eq!(select_dominant(&two), DominantPalette::AURORA);
    }

    #[test]
    fn aurora_fallback_values() {
        let fallback = DominantPalette::AURORA;
        assert_eq!(fallback.primary.to_hex(), "#A78BFA");
        assert_eq!(fallback.secondary.to_hex(), "#818CF8");
        assert_eq!(fallback.accent.to_hex(), "#C084FC");
        assert_eq!(fallback.bg_gradient_start.to_hex(), "#1E1B4B");
        assert_eq!(fallback.bg_gradient_end.to_hex(), "#312E81");
    }

    #[test]
    fn heaviest_clusters_win_in_order() {
        let weights = weights_of(&[
            ((250, 0, 0), 5.0),
            ((0, 250, 0), 9.0),
            ((60, 60, 250), 7.0),
            ((200, 200, 0), 1.0),
        ]);

        let palette = select_dominant(&weights);
        assert_eq!(palette.primary, Color::new(0, 250, 0));
        assert_eq!(palette.secondary, Color::new(60, 60, 250));
        assert_eq!(palette.accent, Color::new(250, 0, 0));
    }

    #[test]
    fn equal_weights_tie_break_on_the_lower_key() {
        let weights = weights_of(&[
            ((250, 0, 0), 4.0),
            ((0, 250, 0), 4.0),
            ((60, 60, 250), 4.0),
        ]);

        let palette = select_dominant(&weights);
        assert_eq!(palette.primary, Color::new(0, 250, 0));
        assert_eq!(palette.secondary, Color::new(60, 60, 250));
        assert_eq!(palette.accent, Color::new(250, 0, 0));
    }

    #[test]
    fn ranked_list_is_capped_at_ten() {
        let entries: Vec<((u8, u8, u8), f32)> = (0u8..12)
            .map(|i| ((i * 20, 250, 0), 1.0 + i as f32))
            .collect();
        let ranked = top_clusters(&weights_of(&entries));

        assert_eq!(ranked.len(), 10);
        // Heaviest first
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn gradient_stops_are_scaled_copies() {
        let (start, end) = compose_gradient(Color::new(255, 100, 0), Color::new(0, 200, 50));
        // 255 * 0.3 = 76.5 -> 77; 100 * 0.3 = 30
        assert_eq!(start, Color::new(77, 30, 0));
        // 200 * 0.4 = 80; 50 * 0.4 = 20
        assert_eq!(end, Color::new(0, 80, 20));
    }

    #[test]
    fn selected_palette_composes_its_own_gradient() {
        let weights = weights_of(&[
            ((250, 0, 0), 9.0),
            ((0, 250, 0), 5.0),
            ((60, 60, 250), 3.0),
        ]);

        let palette = select_dominant(&weights);
        assert_eq!(palette.bg_gradient_start, palette.primary.scale(0.3));
        assert_eq!(palette.bg_gradient_end, palette.secondary.scale(0.4));
    }
}
