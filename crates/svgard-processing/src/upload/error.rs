//! Errors raised by upload handlers.

use svgard_core::AppError;
use svgard_storage::StorageError;

use crate::svg::InvalidDocument;

/// Why an upload was not ingested.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// No handler claims the extension. Not a failure: the upload was declined.
    #[error("Unsupported file type: {extension}")]
    UnsupportedType { extension: String },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error(transparent)]
    InvalidContent(#[from] InvalidDocument),

    #[error("Failed to build image record: {0}")]
    RecordConstructionFailed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl UploadError {
    pub fn unsupported(extension: impl Into<String>) -> Self {
        Self::UnsupportedType {
            extension: extension.into(),
        }
    }

    /// The handler did not claim the upload; another handler may.
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }
}

/// Why a stored document could not be served.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("No stored document for {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedType { extension } => AppError::UnsupportedMediaType(extension),
            e @ UploadError::FileTooLarge { .. } => AppError::PayloadTooLarge(e.to_string()),
            UploadError::InvalidContent(doc) => AppError::InvalidContent(doc.reason),
            UploadError::RecordConstructionFailed(msg) => AppError::Internal(msg),
            UploadError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}

impl From<ServeError> for AppError {
    fn from(err: ServeError) -> Self {
        match err {
            ServeError::NotFound(hash) => AppError::NotFound(hash),
            ServeError::Storage(e) => AppError::Storage(e.to_string()),
            ServeError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
