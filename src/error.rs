//! Error taxonomy for the theming engine.

use thiserror::Error;

/// Errors produced by the theming engine.
///
/// A failed extraction is surfaced to the caller and never retried; the
/// [`StyleRegistry`](crate::StyleRegistry) is left untouched when any of
/// these occur. Insufficient color data in an image is *not* an error:
/// the selector falls back to the built-in aurora palette instead.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The image bytes could not be decoded.
    #[error("failed to decode wallpaper image: {0}")]
    ImageLoad(#[from] image::ImageError),

    /// The embedded data blob was not valid base64.
    #[error("invalid base64 in image data blob: {0}")]
    DataBlob(#[from] base64::DecodeError),

    /// The byte loader could not produce bytes for a remote URL.
    #[error("could not load image bytes from {url}: {reason}")]
    SourceUnavailable { url: String, reason: String },

    /// A manually supplied hex color string was malformed.
    ///
    /// Malformed input is rejected outright rather than silently coerced
    /// to black.
    #[error("invalid hex color {input:?}: {reason}")]
    InvalidHex {
        input: String,
        reason: &'static str,
    },
}
