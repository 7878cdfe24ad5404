//! Pixel filtering and color quantization.
//!
//! One linear pass over the sampled buffer: unusable pixels (transparent,
//! too dark, too bright, near-gray) are discarded, the rest are bucketed
//! into coarse color clusters weighted by saturation. More saturated pixels
//! count more, which is an implicit vibrancy preference without a separate
//! scoring pass.

use std::collections::HashMap;

use palette::{Hsv, IntoColor, Srgb};

use crate::color::Color;
use crate::extract::sampler::PixelBuffer;

/// Pixels with alpha below this are treated as not part of visible content.
const MIN_ALPHA: u8 = 128;

/// Luma bounds; extremes rarely produce usable UI accent colors.
const MIN_LUMA: f32 = 30.0;
const MAX_LUMA: f32 = 240.0;

/// Near-gray pixels below this saturation would otherwise let skies and
/// walls drown out accent hues.
const MIN_SATURATION: f32 = 0.2;

/// A quantization bucket key: each channel rounded down to the nearest
/// multiple of 10.
///
/// A key is always itself a valid (if coarse) displayable color. The `Ord`
/// impl (by `r`, then `g`, then `b`) is the deterministic tie-break used
/// when two buckets accumulate equal weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterKey {
    r: u8,
    g: u8,
    b: u8,
}

impl ClusterKey {
    /// Quantizes a pixel into its bucket key.
    pub fn from_pixel(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: (r / 10) * 10,
            g: (g / 10) * 10,
            b: (b / 10) * 10,
        }
    }

    /// Converts the bucket key back to a displayable color.
    pub fn color(self) -> Color {
        Color::new(self.r, self.g, self.b)
    }
}

/// Weighted brightness estimate (Rec. 601 luma).
fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Saturation as `(max - min) / max`, 0 for black and grays.
fn saturation(r: u8, g: u8, b: u8) -> f32 {
    let srgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let hsv: Hsv = srgb.into_color();
    hsv.saturation
}

/// Filters the buffer and accumulates saturation-weighted cluster votes.
///
/// Skips pixels that are mostly transparent, outside the luma band
/// [30, 240], or below 0.2 saturation. Surviving pixels vote their
/// saturation into their [`ClusterKey`] bucket. Insertion order is
/// irrelevant; only the final weights matter.
pub fn filter_and_quantize(buffer: &PixelBuffer) -> HashMap<ClusterKey, f32> {
    let mut weights = HashMap::new();

    for pixel in buffer.pixels() {
        let [r, g, b, a] = pixel.0;
        if a < MIN_ALPHA {
            continue;
        }

        let y = luma(r, g, b);
        if y < MIN_LUMA || y > MAX_LUMA {
            continue;
        }

        let s = saturation(r, g, b);
        if s < MIN_SATURATION {
            continue;
        }

        *weights.entry(ClusterKey::from_pixel(r, g, b)).or_insert(0.0) += s;
    }

    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid_buffer(rgba: [u8; 4]) -> PixelBuffer {
        PixelBuffer::from_image(RgbaImage::from_pixel(8, 8, Rgba(rgba)))
    }

    #[test]
    fn bucket_keys_are_multiples_of_ten() {
        let key = ClusterKey::from_pixel(255, 19, 101);
        assert_eq!(key.color(), Color::new(250, 10, 100));
    }

    #[test]
    fn solid_red_yields_one_full_weight_cluster() {
        let weights = filter_and_quantize(&solid_buffer([255, 0, 0, 255]));
        assert_eq!(weights.len(), 1);

        let (key, weight) = weights.iter().next().unwrap();
        assert_eq!(key.color(), Color::new(250, 0, 0));
        // 64 pixels, each fully saturated
        assert!((weight - 64.0).abs() < 1e-3);
    }

    #[test]
    fn transparent_pixels_are_skipped() {
        let weights = filter_and_quantize(&solid_buffer([255, 0, 0, 0]));
        assert!(weights.is_empty());

        // Alpha 127 is still below the visibility threshold
        let weights = filter_and_quantize(&solid_buffer([255, 0, 0, 127]));
        assert!(weights.is_empty());
    }

    #[test]
    fn gray_pixels_fail_the_saturation_filter() {
        let weights = filter_and_quantize(&solid_buffer([128, 128, 128, 255]));
        assert!(weights.is_empty());
    }

    #[test]
    fn dark_pixels_fail_the_luma_floor() {
        // Pure blue: luma = 0.114 * 255 = 29.07, just under the floor of 30
        let weights = filter_and_quantize(&solid_buffer([0, 0, 255, 255]));
        assert!(weights.is_empty());

        let weights = filter_and_quantize(&solid_buffer([16, 16, 64, 255]));
        assert!(weights.is_empty());
    }

    #[test]
    fn bright_pixels_fail_the_luma_ceiling() {
        // #FFFF80: luma = 240.5, just over the ceiling; saturation ~0.5
        let weights = filter_and_quantize(&solid_buffer([255, 255, 128, 255]));
        assert!(weights.is_empty());
    }

    #[test]
    fn saturation_matches_the_max_min_ratio() {
        // (200 - 50) / 200 = 0.75
        assert!((saturation(200, 50, 125) - 0.75).abs() < 1e-4);
        assert_eq!(saturation(0, 0, 0), 0.0);
        assert_eq!(saturation(77, 77, 77), 0.0);
    }

    #[test]
    fn near_shades_merge_into_one_bucket() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([201, 60, 60, 255]));
        image.put_pixel(1, 0, Rgba([209, 64, 69, 255]));

        let weights = filter_and_quantize(&PixelBuffer::from_image(image));
        assert_eq!(weights.len(), 1);
        assert!(weights.contains_key(&ClusterKey::from_pixel(200, 60, 60)));
    }
}
