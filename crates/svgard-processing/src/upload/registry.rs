//! Ordered dispatch of uploads to handlers.

use std::sync::Arc;

use svgard_core::{StoredImageRecord, ThumbnailAsset, UploadedAsset};

use super::error::UploadError;
use super::guard::UploadGuard;
use super::traits::UploadHandler;

/// Explicit, ordered list of upload handlers.
///
/// The first handler that accepts an extension owns uploads with it. Uploads
/// no handler accepts are declined untouched; the rest must pass the
/// [`UploadGuard`] before their handler runs.
pub struct HandlerRegistry {
    guard: UploadGuard,
    handlers: Vec<Arc<dyn UploadHandler>>,
}

impl HandlerRegistry {
    pub fn new(guard: UploadGuard) -> Self {
        Self {
            guard,
            handlers: Vec::new(),
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn UploadHandler>) -> Self {
        self.register(handler);
        self
    }

    pub fn register(&mut self, handler: Arc<dyn UploadHandler>) {
        tracing::debug!(handler = handler.name(), "Registered upload handler");
        self.handlers.push(handler);
    }

    pub fn guard(&self) -> &UploadGuard {
        &self.guard
    }

    /// First handler accepting `extension`.
    pub fn handler_for(&self, extension: &str) -> Option<&Arc<dyn UploadHandler>> {
        self.handlers.iter().find(|h| h.accepts(extension))
    }

    pub async fn ingest(&self, asset: UploadedAsset) -> Result<StoredImageRecord, UploadError> {
        let Some(handler) = self.handler_for(&asset.extension) else {
            tracing::debug!(extension = %asset.extension, "No handler for upload");
            return Err(UploadError::unsupported(asset.extension));
        };
        self.guard.check(&asset)?;
        handler.ingest(asset).await
    }

    /// Thumbnail from the first handler that provides one.
    pub fn thumbnail(&self, hash: &str, extension: &str) -> Option<ThumbnailAsset> {
        self.handlers
            .iter()
            .find_map(|h| h.thumbnail(hash, extension))
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new(UploadGuard::default())
    }
}
