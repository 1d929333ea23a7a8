use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use super::ImageError;

/// Longest edge after normalization
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;

/// JPEG quality (1-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 70;

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Result of a normalization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub width: u32,
    pub height: u32,
    /// Encoded JPEG bytes
    pub jpeg: Vec<u8>,
}

impl NormalizedImage {
    /// `data:` URL suitable for `Product::image_url`
    pub fn to_data_url(&self) -> String {
        format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(&self.jpeg))
    }
}

/// Downscale + JPEG re-encode
#[derive(Debug, Clone, Copy)]
pub struct ImageNormalizer {
    max_dimension: u32,
    quality: u8,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIMENSION, DEFAULT_JPEG_QUALITY)
    }
}

impl ImageNormalizer {
    pub fn new(max_dimension: u32, quality: u8) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            quality: quality.clamp(1, 100),
        }
    }

    /// Target size keeping aspect ratio; never upscales.
    pub fn target_size(&self, width: u32, height: u32) -> (u32, u32) {
        let longest = width.max(height);
        if longest <= self.max_dimension {
            return (width, height);
        }
        let scale = self.max_dimension as f64 / longest as f64;
        let scaled = |v: u32| ((v as f64 * scale).round() as u32).max(1);
        (scaled(width), scaled(height))
    }

    /// Decode, downscale and re-encode synchronously.
    pub fn normalize(&self, data: &[u8]) -> Result<NormalizedImage, ImageError> {
        if data.is_empty() {
            return Err(ImageError::Empty);
        }

        let img = image::load_from_memory(data).map_err(ImageError::Decode)?;
        let (width, height) = self.target_size(img.width(), img.height());

        let img = if (width, height) != (img.width(), img.height()) {
            img.resize_exact(width, height, FilterType::Triangle)
        } else {
            img
        };

        let jpeg = self.encode_jpeg(&img)?;

        tracing::debug!(
            width,
            height,
            input_bytes = data.len(),
            output_bytes = jpeg.len(),
            "Image normalized"
        );

        Ok(NormalizedImage {
            width,
            height,
            jpeg,
        })
    }

    /// Same as [`normalize`](Self::normalize), on the blocking pool.
    pub async fn normalize_async(&self, data: Vec<u8>) -> Result<NormalizedImage, ImageError> {
        let normalizer = *self;
        tokio::task::spawn_blocking(move || normalizer.normalize(&data)).await?
    }

    fn encode_jpeg(&self, img: &DynamicImage) -> Result<Vec<u8>, ImageError> {
        // JPEG has no alpha channel
        let rgb = img.to_rgb8();
        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), self.quality);
        rgb.write_with_encoder(encoder).map_err(ImageError::Encode)?;
        Ok(buffer)
    }
}
