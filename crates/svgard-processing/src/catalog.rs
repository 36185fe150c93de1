//! Image catalog: where published records live and how integer ids map to hashes.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use tokio::sync::RwLock;

use svgard_core::StoredImageRecord;

/// Catalog-assigned image id. Ids start at 1; 0 never names an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host collaborator that owns published image records.
#[async_trait]
pub trait ImageCatalog: Send + Sync {
    /// Publish a record and return its id. Publishing a hash that is already
    /// known replaces the record and keeps the id.
    async fn publish(&self, record: StoredImageRecord) -> ImageId;

    async fn hash_for(&self, id: ImageId) -> Option<String>;

    async fn id_for(&self, hash: &str) -> Option<ImageId>;

    async fn get(&self, id: ImageId) -> Option<StoredImageRecord>;
}

/// In-process catalog.
#[derive(Default)]
pub struct MemoryCatalog {
    records: RwLock<Vec<StoredImageRecord>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn index_of(id: ImageId) -> Option<usize> {
        usize::try_from(id.0).ok()?.checked_sub(1)
    }
}

#[async_trait]
impl ImageCatalog for MemoryCatalog {
    async fn publish(&self, record: StoredImageRecord) -> ImageId {
        let mut records = self.records.write().await;
        if let Some(pos) = records.iter().position(|r| r.hash == record.hash) {
            records[pos] = record;
            return ImageId(pos as u64 + 1);
        }
        records.push(record);
        ImageId(records.len() as u64)
    }

    async fn hash_for(&self, id: ImageId) -> Option<String> {
        self.get(id).await.map(|record| record.hash)
    }

    async fn id_for(&self, hash: &str) -> Option<ImageId> {
        let records = self.records.read().await;
        let pos = records.iter().position(|r| r.hash == hash)?;
        Some(ImageId(pos as u64 + 1))
    }

    async fn get(&self, id: ImageId) -> Option<StoredImageRecord> {
        let index = Self::index_of(id)?;
        self.records.read().await.get(index).cloned()
    }
}
