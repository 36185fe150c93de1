//! svgard Storage Library
//!
//! Content-addressed blob storage for sanitized documents. It includes the
//! [`BlobStore`] trait and implementations for the local filesystem and memory.
//!
//! # Storage key format
//!
//! Keys are derived from the content hash: `{bucket}/{hash[0..2]}/{hash}`, e.g.
//! `images/ab/abcdef...`. Keys must not contain `..` or a leading `/`. Key
//! generation is centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-memory")]
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{blob_key, image_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
pub use svgard_core::StorageBackend;
pub use traits::{BlobStore, StorageError, StorageResult};
