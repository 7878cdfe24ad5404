//! Wallpaper palette extraction pipeline.
//!
//! Three stages, each pure over its input: the sampler decodes and
//! downscales the image, the quantizer filters pixels and accumulates
//! saturation-weighted cluster votes, and the selector ranks clusters into
//! a [`DominantPalette`]. Every extraction owns its own buffer; nothing
//! here touches shared state.

pub mod quantize;
pub mod sampler;
pub mod select;

pub use quantize::{ClusterKey, filter_and_quantize};
pub use sampler::{ImageByteLoader, ImageSource, NoRemoteLoader, PixelBuffer, sample, sample_bytes};
pub use select::{DominantPalette, compose_gradient, select_dominant, top_clusters};

/// Runs the quantize and select stages over an already-sampled buffer.
///
/// Deterministic: identical buffers always yield identical palettes.
pub fn extract_palette(buffer: &PixelBuffer) -> DominantPalette {
    let weights = filter_and_quantize(buffer);
    select_dominant(&weights)
}
