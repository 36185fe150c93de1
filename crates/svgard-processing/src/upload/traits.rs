//! Traits for the upload pipeline.

use async_trait::async_trait;
use svgard_core::{StoredImageRecord, ThumbnailAsset, UploadedAsset};

use super::error::{ServeError, UploadError};
use super::types::ServedDocument;

/// A handler for one family of uploads.
///
/// Handlers are asked in registration order; the first one whose
/// [`accepts`](UploadHandler::accepts) returns true owns the upload.
#[async_trait]
pub trait UploadHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this handler owns uploads with `extension` (lower-case, no dot).
    fn accepts(&self, extension: &str) -> bool;

    /// Validate, sanitize and persist an upload, returning the published record.
    async fn ingest(&self, asset: UploadedAsset) -> Result<StoredImageRecord, UploadError>;

    /// Load a stored document and make it safe to send.
    async fn serve(&self, hash: &str) -> Result<ServedDocument, ServeError>;

    /// Thumbnail to show for an image, if this handler provides one.
    fn thumbnail(&self, hash: &str, extension: &str) -> Option<ThumbnailAsset>;
}
