//! svgard Core Library
//!
//! This crate provides the domain models, error types, configuration and constants
//! shared by the storage, processing and CLI crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod hash;
pub mod models;
pub mod parse;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use hash::content_hash;
pub use models::{RecordError, StoredImageRecord, TagSet, ThumbnailAsset, UploadedAsset};
pub use storage_types::StorageBackend;
