use thiserror::Error;

use crate::generator::GeneratorError;
use crate::media::ImageError;

/// 错误类别，供调用方分支判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    GenerationFailed,
    EncodingFailed,
    StorageUnavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::GenerationFailed => "generation_failed",
            ErrorKind::EncodingFailed => "encoding_failed",
            ErrorKind::StorageUnavailable => "storage_unavailable",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Store 对外错误
///
/// `Display` 即展示给用户的文案；底层原因通过 `source()` 保留。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to generate AI description. Please try again.")]
    GenerationFailed {
        #[source]
        source: Option<GeneratorError>,
    },

    #[error("Failed to process product image. Please try another file.")]
    EncodingFailed {
        #[source]
        source: Option<ImageError>,
    },

    #[error("Failed to save product listing. Please try again.")]
    StorageUnavailable {
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::GenerationFailed { .. } => ErrorKind::GenerationFailed,
            StoreError::EncodingFailed { .. } => ErrorKind::EncodingFailed,
            StoreError::StorageUnavailable { .. } => ErrorKind::StorageUnavailable,
        }
    }
}

impl From<GeneratorError> for StoreError {
    fn from(err: GeneratorError) -> Self {
        StoreError::GenerationFailed { source: Some(err) }
    }
}

impl From<ImageError> for StoreError {
    fn from(err: ImageError) -> Self {
        StoreError::EncodingFailed { source: Some(err) }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::StorageUnavailable { source: Some(err) }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
