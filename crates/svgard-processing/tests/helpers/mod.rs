//! Test helpers: wire a handler, registry and catalog over an in-memory store.
//!
//! Run from workspace root: `cargo test -p svgard-processing`.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use svgard_core::{content_hash, UploadedAsset};
use svgard_processing::{
    HandlerRegistry, MemoryCatalog, ServeRoute, SvgHandler, UploadGuard, UploadHandler,
};
use svgard_storage::MemoryStorage;

/// Pipeline under test plus the collaborators it writes to.
pub struct TestPipeline {
    pub storage: Arc<MemoryStorage>,
    pub catalog: Arc<MemoryCatalog>,
    pub handler: Arc<SvgHandler>,
    pub registry: HandlerRegistry,
}

impl TestPipeline {
    pub fn route(&self) -> ServeRoute {
        let handler: Arc<dyn UploadHandler> = self.handler.clone();
        ServeRoute::new(self.catalog.clone(), handler)
    }
}

pub fn setup_pipeline() -> TestPipeline {
    setup_pipeline_with_guard(UploadGuard::default())
}

pub fn setup_pipeline_with_guard(guard: UploadGuard) -> TestPipeline {
    let storage = Arc::new(MemoryStorage::new());
    let catalog = Arc::new(MemoryCatalog::new());
    let handler = Arc::new(SvgHandler::new(storage.clone()).with_catalog(catalog.clone()));
    let registry = HandlerRegistry::new(guard).with_handler(handler.clone());
    TestPipeline {
        storage,
        catalog,
        handler,
        registry,
    }
}

/// Upload named `filename` whose hash is the SHA-256 of `body`.
pub fn asset(body: &[u8], filename: &str) -> UploadedAsset {
    UploadedAsset::new(
        body.to_vec(),
        content_hash(body),
        filename,
        "image/svg+xml",
    )
}
