//! `get_svg/<id>` route over a populated catalog.
//!
//! Run with: `cargo test -p svgard-processing --test route_test`

mod helpers;

use helpers::fixtures::{INLINE_SCRIPT, RECT_100X50};
use helpers::{asset, setup_pipeline};
use svgard_core::constants::SVG_MIME_TYPE;
use svgard_processing::{ImageCatalog, ImageId, RouteOutcome};
use svgard_storage::{image_key, BlobStore};

#[tokio::test]
async fn test_serves_ingested_image_by_id() {
    let pipeline = setup_pipeline();
    pipeline
        .registry
        .ingest(asset(RECT_100X50, "rect.svg"))
        .await
        .unwrap();

    match pipeline.route().resolve("get_svg/1").await.unwrap() {
        RouteOutcome::Served(doc) => {
            assert_eq!(doc.content_type, SVG_MIME_TYPE);
            assert_eq!(doc.body.as_bytes(), RECT_100X50);
        }
        other => panic!("expected Served, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let pipeline = setup_pipeline();
    pipeline
        .registry
        .ingest(asset(RECT_100X50, "rect.svg"))
        .await
        .unwrap();

    let route = pipeline.route();
    assert!(matches!(
        route.resolve("get_svg/999").await.unwrap(),
        RouteOutcome::NotFound
    ));
    assert!(matches!(
        route.resolve("get_svg/not-a-number").await.unwrap(),
        RouteOutcome::NotFound
    ));
}

#[tokio::test]
async fn test_catalogued_image_without_blob_is_not_found() {
    let pipeline = setup_pipeline();
    let upload = asset(INLINE_SCRIPT, "alert.svg");
    let hash = upload.hash.clone();
    pipeline.registry.ingest(upload).await.unwrap();
    pipeline
        .storage
        .delete(&image_key(&hash).unwrap())
        .await
        .unwrap();

    assert_eq!(pipeline.catalog.hash_for(ImageId(1)).await, Some(hash));
    assert!(matches!(
        pipeline.route().resolve("get_svg/1").await.unwrap(),
        RouteOutcome::NotFound
    ));
}

#[tokio::test]
async fn test_other_paths_fall_through_to_no_handler() {
    let pipeline = setup_pipeline();
    match pipeline.route().resolve("post/list").await.unwrap() {
        RouteOutcome::NoHandler { path } => assert_eq!(path, "post/list"),
        other => panic!("expected NoHandler, got {:?}", other),
    }
}
