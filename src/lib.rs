//! nimbus-theming: Adaptive wallpaper color theming for the Nimbus start page
//!
//! This crate derives a small, coherent color palette and a full tonal ramp
//! from an arbitrary wallpaper image, then publishes the result as named
//! style tokens the rendering layer reads.
//!
//! The extraction pipeline is deterministic and bounded: decode and
//! downsample, filter out unusable pixels, bucket the rest into coarse
//! saturation-weighted clusters, and rank the clusters into a palette.
//! Images without enough color data fall back to the built-in aurora
//! palette instead of guessing.
//!
//! # Example
//!
//! ```
//! use nimbus_theming::{NoRemoteLoader, StyleRegistry, StyleToken, ThemeEngine};
//!
//! // One registry per process; clones share the same table.
//! let registry = StyleRegistry::new();
//! let engine = ThemeEngine::new(registry.clone(), NoRemoteLoader);
//!
//! // A user-picked swatch bypasses extraction entirely.
//! engine.apply_custom_color("#6D28D9").unwrap();
//! assert_eq!(registry.get(StyleToken::DarkColor).to_hex(), "#6D28D9");
//! ```
//!
//! # Remote wallpapers
//!
//! Fetching bytes is the host's business. Wire a loader (any matching
//! closure works) and hand the engine an [`ImageSource`]:
//!
//! ```no_run
//! use nimbus_theming::{ImageSource, StyleRegistry, ThemeEngine, ThemeError};
//!
//! let registry = StyleRegistry::new();
//! let engine = ThemeEngine::new(registry, |url: &str| -> Result<Vec<u8>, ThemeError> {
//!     std::fs::read(url).map_err(|e| ThemeError::SourceUnavailable {
//!         url: url.to_string(),
//!         reason: e.to_string(),
//!     })
//! });
//!
//! let wallpaper = ImageSource::Url("wallpapers/dunes.png".to_string());
//! let _ = engine.apply_wallpaper(&wallpaper);
//! ```

mod color;
mod engine;
mod error;
mod extract;
mod registry;
mod shades;

pub use color::Color;
pub use engine::{ThemeEngine, palette_from_bytes};
pub use error::ThemeError;
pub use extract::{
    ClusterKey, DominantPalette, ImageByteLoader, ImageSource, NoRemoteLoader, PixelBuffer,
    compose_gradient, extract_palette, filter_and_quantize, sample, sample_bytes, select_dominant,
    top_clusters,
};
pub use registry::{Generation, StyleRegistry, StyleToken, ThemePhase, ThemeTokens};
pub use shades::{NEAR_WHITE_SUBSTITUTE, ShadeSet, derive_shades};
