//! Image normalization
//!
//! Uploaded images are downscaled and re-encoded as JPEG before being stored
//! inline in a product, which keeps every persisted snapshot small.

mod normalizer;

use thiserror::Error;

pub use normalizer::{ImageNormalizer, NormalizedImage};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to compress image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Empty image data")]
    Empty,

    #[error("Image worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
