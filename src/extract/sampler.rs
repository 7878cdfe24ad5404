//! Pixel sampling: image sources, byte loading, decode, and downsampling.
//!
//! The sampler turns an [`ImageSource`] into a [`PixelBuffer`], a small
//! RGBA buffer the quantizer can sweep in one linear pass. Network fetching
//! is not this crate's business: remote URLs are resolved through the
//! injected [`ImageByteLoader`] seam, while embedded data blobs are decoded
//! in place.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::ThemeError;

/// Downscale factor applied per dimension before quantization.
///
/// Bounds the quantizer's work regardless of the input resolution; a
/// 4000x3000 wallpaper is swept as 400x300 samples.
const DOWNSCALE: f32 = 0.1;

/// A wallpaper image reference, as supplied by the settings layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A remote URL, resolved through the host's [`ImageByteLoader`].
    Url(String),
    /// An embedded base64 blob, with or without a `data:...;base64,` prefix.
    DataBlob(String),
}

/// Seam for resolving remote image URLs to raw bytes.
///
/// The host application decides how bytes are fetched (HTTP client, asset
/// cache, test fixture). Closures of the matching shape implement this
/// trait directly.
pub trait ImageByteLoader {
    fn load(&self, url: &str) -> Result<Vec<u8>, ThemeError>;
}

impl<F> ImageByteLoader for F
where
    F: Fn(&str) -> Result<Vec<u8>, ThemeError>,
{
    fn load(&self, url: &str) -> Result<Vec<u8>, ThemeError> {
        self(url)
    }
}

/// A loader for hosts that only ever supply embedded data blobs.
///
/// Any URL source fails with [`ThemeError::SourceUnavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRemoteLoader;

impl ImageByteLoader for NoRemoteLoader {
    fn load(&self, url: &str) -> Result<Vec<u8>, ThemeError> {
        Err(ThemeError::SourceUnavailable {
            url: url.to_string(),
            reason: "remote sources are not configured".to_string(),
        })
    }
}

/// A downsampled RGBA buffer produced once per extraction.
///
/// Owned exclusively by the extraction that created it and never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: RgbaImage,
}

impl PixelBuffer {
    /// Wraps an already-sampled RGBA image.
    ///
    /// Used by the sampler and by tests that build synthetic buffers.
    pub fn from_image(data: RgbaImage) -> Self {
        Self { data }
    }

    /// Returns the buffer dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.data.dimensions()
    }

    /// Iterates over the RGBA samples.
    pub fn pixels(&self) -> impl Iterator<Item = &image::Rgba<u8>> {
        self.data.pixels()
    }
}

/// Resolves an image source to bytes and samples it.
///
/// See [`sample_bytes`] for the decode and downsampling behavior.
pub fn sample<L: ImageByteLoader>(
    source: &ImageSource,
    loader: &L,
) -> Result<PixelBuffer, ThemeError> {
    let bytes = match source {
        ImageSource::Url(url) => loader.load(url)?,
        ImageSource::DataBlob(blob) => decode_data_blob(blob)?,
    };
    sample_bytes(&bytes)
}

/// Decodes image bytes and resamples them at a fixed 0.1x per dimension,
/// with a floor of 1x1.
///
/// Fails with [`ThemeError::ImageLoad`] if the bytes are not a decodable
/// image; the caller must leave the active theme untouched in that case.
pub fn sample_bytes(bytes: &[u8]) -> Result<PixelBuffer, ThemeError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    let target_w = ((width as f32) * DOWNSCALE).floor().max(1.0) as u32;
    let target_h = ((height as f32) * DOWNSCALE).floor().max(1.0) as u32;
    let sampled = imageops::resize(&rgba, target_w, target_h, FilterType::Triangle);

    Ok(PixelBuffer::from_image(sampled))
}

/// Decodes an embedded data blob into raw bytes.
///
/// Accepts both bare base64 and full `data:<mime>;base64,<payload>` URLs.
fn decode_data_blob(blob: &str) -> Result<Vec<u8>, ThemeError> {
    let payload = match blob.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => blob,
    };
    Ok(STANDARD.decode(payload.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use std::io::Cursor;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn sampling_downscales_by_a_tenth() {
        let image = RgbaImage::from_pixel(100, 50, image::Rgba([200, 40, 40, 255]));
        let buffer = sample_bytes(&png_bytes(&image)).unwrap();
        assert_eq!(buffer.dimensions(), (10, 5));
    }

    #[test]
    fn tiny_images_floor_at_one_by_one() {
        let image = RgbaImage::from_pixel(5, 7, image::Rgba([10, 200, 10, 255]));
        let buffer = sample_bytes(&png_bytes(&image)).unwrap();
        assert_eq!(buffer.dimensions(), (1, 1));
    }

    #[test]
    fn malformed_bytes_are_an_image_load_error() {
        let result = sample_bytes(b"definitely not an image");
        assert!(matches!(result, Err(ThemeError::ImageLoad(_))));
    }

    #[test]
    fn data_blob_sources_decode_with_and_without_prefix() {
        let image = RgbaImage::from_pixel(20, 20, image::Rgba([0, 0, 200, 255]));
        let encoded = STANDARD.encode(png_bytes(&image));

        let bare = ImageSource::DataBlob(encoded.clone());
        let prefixed = ImageSource::DataBlob(format!("data:image/png;base64,{encoded}"));

        let from_bare = sample(&bare, &NoRemoteLoader).unwrap();
        let from_prefixed = sample(&prefixed, &NoRemoteLoader).unwrap();
        assert_eq!(from_bare, from_prefixed);
        assert_eq!(from_bare.dimensions(), (2, 2));
    }

    #[test]
    fn invalid_base64_is_a_data_blob_error() {
        let source = ImageSource::DataBlob("!!not base64!!".to_string());
        let result = sample(&source, &NoRemoteLoader);
        assert!(matches!(result, Err(ThemeError::DataBlob(_))));
    }

    #[test]
    fn url_sources_go_through_the_loader() {
        let image = RgbaImage::from_pixel(30, 30, image::Rgba([255, 0, 0, 255]));
        let bytes = png_bytes(&image);
        let loader = |url: &str| -> Result<Vec<u8>, ThemeError> {
            assert_eq!(url, "https://example.com/wallpaper.png");
            Ok(bytes.clone())
        };

        let source = ImageSource::Url("https://example.com/wallpaper.png".to_string());
        let buffer = sample(&source, &loader).unwrap();
        assert_eq!(buffer.dimensions(), (3, 3));
    }

    #[test]
    fn url_sources_fail_without_a_remote_loader() {
        let source = ImageSource::Url("https://example.com/x.png".to_string());
        let result = sample(&source, &NoRemoteLoader);
        assert!(matches!(result, Err(ThemeError::SourceUnavailable { .. })));
    }
}
