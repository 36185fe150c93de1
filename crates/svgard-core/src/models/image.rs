use chrono::{DateTime, Utc};
use serde::Serialize;

use super::asset::{TagSet, UploadedAsset};
use crate::hash::is_valid_hash;

/// Reference to a static thumbnail shipped with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThumbnailAsset {
    pub path: &'static str,
    pub content_type: &'static str,
}

/// Why a record could not be built from an upload.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Missing content hash")]
    MissingHash,

    #[error("Invalid content hash: {0}")]
    InvalidHash(String),

    #[error("Missing filename")]
    MissingFilename,
}

/// Image record published after a successful ingest.
#[derive(Debug, Clone, Serialize)]
pub struct StoredImageRecord {
    pub hash: String,
    pub width: u32,
    pub height: u32,
    /// Size of the upload as received, in bytes.
    pub filesize: u64,
    pub filename: String,
    pub extension: String,
    pub tags: TagSet,
    pub source: Option<String>,
    pub thumbnail: ThumbnailAsset,
    pub ingested_at: DateTime<Utc>,
}

impl StoredImageRecord {
    pub fn from_asset(
        asset: &UploadedAsset,
        width: u32,
        height: u32,
        thumbnail: ThumbnailAsset,
    ) -> Result<Self, RecordError> {
        if asset.hash.is_empty() {
            return Err(RecordError::MissingHash);
        }
        if !is_valid_hash(&asset.hash) {
            return Err(RecordError::InvalidHash(asset.hash.clone()));
        }
        if asset.filename.trim().is_empty() {
            return Err(RecordError::MissingFilename);
        }

        Ok(Self {
            hash: asset.hash.clone(),
            width,
            height,
            filesize: asset.data.len() as u64,
            filename: asset.filename.clone(),
            extension: asset.extension.clone(),
            tags: asset.tags.clone(),
            source: asset.source.clone(),
            thumbnail,
            ingested_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FALLBACK_SVG_THUMBNAIL;
    use crate::hash::content_hash;

    fn asset(hash: &str, filename: &str) -> UploadedAsset {
        UploadedAsset::new(b"<svg/>".to_vec(), hash, filename, "image/svg+xml")
            .with_tags(TagSet::explode("a b"))
    }

    #[test]
    fn builds_record_from_asset() {
        let hash = content_hash(b"<svg/>");
        let record =
            StoredImageRecord::from_asset(&asset(&hash, "x.svg"), 3, 4, FALLBACK_SVG_THUMBNAIL)
                .unwrap();
        assert_eq!(record.hash, hash);
        assert_eq!((record.width, record.height), (3, 4));
        assert_eq!(record.filesize, 6);
        assert_eq!(record.extension, "svg");
        assert_eq!(record.tags.len(), 2);
        assert_eq!(record.thumbnail, FALLBACK_SVG_THUMBNAIL);
    }

    #[test]
    fn rejects_missing_fields() {
        let hash = content_hash(b"<svg/>");
        assert_eq!(
            StoredImageRecord::from_asset(&asset("", "x.svg"), 0, 0, FALLBACK_SVG_THUMBNAIL)
                .unwrap_err(),
            RecordError::MissingHash
        );
        assert_eq!(
            StoredImageRecord::from_asset(&asset(&hash, " "), 0, 0, FALLBACK_SVG_THUMBNAIL)
                .unwrap_err(),
            RecordError::MissingFilename
        );
        assert!(matches!(
            StoredImageRecord::from_asset(&asset("zz", "x.svg"), 0, 0, FALLBACK_SVG_THUMBNAIL),
            Err(RecordError::InvalidHash(_))
        ));
    }
}
