//! SVG upload handler: validate → sanitize → re-validate → store → publish.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use svgard_core::constants::{FALLBACK_SVG_THUMBNAIL, SVG_EXTENSIONS};
use svgard_core::{StoredImageRecord, ThumbnailAsset, UploadedAsset};
use svgard_storage::{image_key, BlobStore, StorageError};

use super::error::{ServeError, UploadError};
use super::traits::UploadHandler;
use super::types::ServedDocument;
use crate::catalog::ImageCatalog;
use crate::svg::{sanitize, validate, SanitizedDocument, SvgMetadata};

/// Handler for `.svg` uploads.
///
/// Nothing reaches storage or a response without passing through the
/// sanitizer first; stored documents are sanitized again on every read.
pub struct SvgHandler {
    storage: Arc<dyn BlobStore>,
    catalog: Option<Arc<dyn ImageCatalog>>,
}

impl SvgHandler {
    pub fn new(storage: Arc<dyn BlobStore>) -> Self {
        Self {
            storage,
            catalog: None,
        }
    }

    /// Publish every ingested record to `catalog`.
    pub fn with_catalog(mut self, catalog: Arc<dyn ImageCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }
}

/// Validate the upload, sanitize it, and read the dimensions of what will
/// actually be stored.
fn prepare(raw: &[u8]) -> Result<(SanitizedDocument, SvgMetadata), UploadError> {
    validate(raw)?;
    let document = sanitize(raw);
    let metadata = validate(document.as_bytes()).map_err(|e| {
        UploadError::RecordConstructionFailed(format!(
            "sanitized document is not valid: {}",
            e.reason
        ))
    })?;
    Ok((document, metadata))
}

#[async_trait]
impl UploadHandler for SvgHandler {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn accepts(&self, extension: &str) -> bool {
        SVG_EXTENSIONS
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    async fn ingest(&self, asset: UploadedAsset) -> Result<StoredImageRecord, UploadError> {
        let start = Instant::now();

        if !self.accepts(&asset.extension) {
            tracing::debug!(
                handler = self.name(),
                extension = %asset.extension,
                "Upload declined"
            );
            return Err(UploadError::unsupported(asset.extension));
        }

        // Parsing is CPU-bound; run off the async pool to avoid blocking other tasks.
        let (asset, prepared) = tokio::task::spawn_blocking(move || {
            let prepared = prepare(&asset.data);
            (asset, prepared)
        })
        .await
        .map_err(|e| UploadError::RecordConstructionFailed(format!("worker failed: {}", e)))?;

        let (document, metadata) = match prepared {
            Ok(prepared) => prepared,
            Err(UploadError::InvalidContent(e)) => {
                tracing::debug!(
                    hash = %asset.hash,
                    reason = %e.reason,
                    position = ?e.position,
                    "Rejected malformed SVG"
                );
                return Err(UploadError::InvalidContent(e));
            }
            Err(e) => {
                tracing::error!(hash = %asset.hash, error = %e, "SVG record construction failed");
                return Err(e);
            }
        };

        let record = StoredImageRecord::from_asset(
            &asset,
            metadata.width,
            metadata.height,
            FALLBACK_SVG_THUMBNAIL,
        )
        .map_err(|e| {
            tracing::error!(hash = %asset.hash, error = %e, "SVG record construction failed");
            UploadError::RecordConstructionFailed(e.to_string())
        })?;

        let key = image_key(&record.hash)?;
        let stored_size = document.len();
        self.storage.put(&key, document.into_bytes().into()).await?;

        if let Some(catalog) = &self.catalog {
            let id = catalog.publish(record.clone()).await;
            tracing::debug!(hash = %record.hash, image_id = %id, "Record published");
        }

        tracing::info!(
            hash = %record.hash,
            key = %key,
            size_bytes = record.filesize,
            stored_bytes = stored_size,
            width = record.width,
            height = record.height,
            duration_ms = start.elapsed().as_millis() as u64,
            "SVG ingested"
        );

        Ok(record)
    }

    async fn serve(&self, hash: &str) -> Result<ServedDocument, ServeError> {
        let key = match image_key(hash) {
            Ok(key) => key,
            Err(StorageError::InvalidKey(_)) => return Err(ServeError::NotFound(hash.to_string())),
            Err(e) => return Err(e.into()),
        };

        let stored = self
            .storage
            .get(&key)
            .await?
            .ok_or_else(|| ServeError::NotFound(hash.to_string()))?;

        let size_bytes = stored.len();
        let body = tokio::task::spawn_blocking(move || sanitize(&stored))
            .await
            .map_err(|e| ServeError::Internal(format!("worker failed: {}", e)))?;

        tracing::debug!(hash = %hash, size_bytes, "Serving sanitized SVG");
        Ok(ServedDocument::svg(body))
    }

    fn thumbnail(&self, _hash: &str, extension: &str) -> Option<ThumbnailAsset> {
        self.accepts(extension).then_some(FALLBACK_SVG_THUMBNAIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgard_core::content_hash;
    use svgard_storage::MemoryStorage;

    fn asset(body: &str, filename: &str) -> UploadedAsset {
        UploadedAsset::new(
            body.as_bytes().to_vec(),
            content_hash(body.as_bytes()),
            filename,
            "image/svg+xml",
        )
    }

    #[test]
    fn accepts_svg_case_insensitively() {
        let handler = SvgHandler::new(Arc::new(MemoryStorage::new()));
        assert!(handler.accepts("svg"));
        assert!(handler.accepts("SVG"));
        assert!(!handler.accepts("png"));
        assert!(!handler.accepts(""));
    }

    #[test]
    fn thumbnail_is_the_fallback_asset() {
        let handler = SvgHandler::new(Arc::new(MemoryStorage::new()));
        assert_eq!(handler.thumbnail("ab", "svg"), Some(FALLBACK_SVG_THUMBNAIL));
        assert_eq!(handler.thumbnail("ab", "jpg"), None);
    }

    #[test]
    fn prepare_reads_dimensions_from_sanitized_output() {
        let (document, metadata) =
            prepare(br#"<svg width="10" height="20"><script>x()</script></svg>"#).unwrap();
        assert_eq!((metadata.width, metadata.height), (10, 20));
        assert_eq!(document.as_bytes(), br#"<svg width="10" height="20"></svg>"#);
    }

    #[test]
    fn prepare_fails_when_sanitizing_removes_the_root() {
        let err = prepare(b"<script>x()</script>").unwrap_err();
        assert!(matches!(err, UploadError::RecordConstructionFailed(_)));
    }

    #[tokio::test]
    async fn ingest_stores_only_sanitized_bytes() {
        let storage = Arc::new(MemoryStorage::new());
        let handler = SvgHandler::new(storage.clone());
        let upload = asset(r#"<svg onload="x()"><rect/></svg>"#, "a.svg");
        let hash = upload.hash.clone();

        handler.ingest(upload).await.unwrap();

        let stored = storage.get(&image_key(&hash).unwrap()).await.unwrap().unwrap();
        assert_eq!(stored, b"<svg><rect/></svg>");
    }

    #[tokio::test]
    async fn serve_unknown_or_bogus_hash_is_not_found() {
        let handler = SvgHandler::new(Arc::new(MemoryStorage::new()));
        let missing = content_hash(b"nothing");
        assert!(matches!(
            handler.serve(&missing).await,
            Err(ServeError::NotFound(_))
        ));
        assert!(matches!(
            handler.serve("../../etc/passwd").await,
            Err(ServeError::NotFound(_))
        ));
    }
}
