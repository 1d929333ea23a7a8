//! Input validation errors
//!
//! Raised before a submission reaches the store; the store never sees
//! malformed input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Title must be at most {max} characters (got {len})")]
    TitleTooLong { len: usize, max: usize },

    #[error("Price must be between 0.01 and 999,999.99 (got {0})")]
    PriceOutOfRange(f64),

    #[error("Image must be less than {}MB (got {size} bytes)", .max / 1024 / 1024)]
    ImageTooLarge { size: usize, max: usize },

    #[error("File must be an image (got {0})")]
    NotAnImage(String),
}
