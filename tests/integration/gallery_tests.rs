//! Gallery listing tests.
//!
//! Tests verify:
//! - Folder markers and non-image keys never appear
//! - Entries keep storage-listing order
//! - Each entry carries a signed original link and a preview path
//! - Missing credentials degrade to entries without original links
//! - Listing failures surface as 500 with a JSON body
//! - CORS preflights honor the configured origins

use std::time::Duration;

use axum::http::StatusCode;

use bucket_gallery::error::StoreError;
use bucket_gallery::{create_router, GalleryService, ImageFilter, RouterConfig};

use super::test_utils::{
    body_bytes, body_json, create_test_jpeg, create_test_png, get, preflight, router_for,
    router_with, MockObjectStore,
};

fn sample_store() -> MockObjectStore {
    MockObjectStore::new()
        .with_object("photo.jpg", create_test_jpeg(1200, 900))
        .with_folder("folder/")
        .with_object("notes.txt", b"not an image".to_vec())
}

// =============================================================================
// JSON Listing
// =============================================================================

#[tokio::test]
async fn test_listing_contains_only_images() {
    let router = router_for(sample_store());

    let response = get(router, "/api/images").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["count"], 1);

    let images = json["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["key"], "photo.jpg");
    assert_eq!(images[0]["optimized_url"], "/image/photo.jpg");

    let original = images[0]["original_url"].as_str().unwrap();
    assert!(original.contains("photo.jpg"));
    assert!(original.contains("X-Amz-Expires=604800"));
}

#[tokio::test]
async fn test_listing_keeps_storage_order() {
    let store = MockObjectStore::new()
        .with_object("zebra.png", create_test_png(4, 4))
        .with_object("README.md", b"# docs".to_vec())
        .with_object("apple.JPG", create_test_jpeg(4, 4))
        .with_folder("albums/")
        .with_object("albums/2024/beach.jpeg", create_test_jpeg(4, 4))
        .with_object("archive.tar.gz", b"gz".to_vec());

    let json = body_json(get(router_for(store), "/api/images").await).await;

    let keys: Vec<&str> = json["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["zebra.png", "apple.JPG", "albums/2024/beach.jpeg"]);
    assert_eq!(json["images"][2]["optimized_url"], "/image/albums/2024/beach.jpeg");
}

#[tokio::test]
async fn test_listing_does_not_fetch_objects() {
    let store = sample_store();
    let counter = store.clone();

    let response = get(router_for(store), "/api/images").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(counter.get_count(), 0);
}

#[tokio::test]
async fn test_empty_bucket() {
    let json = body_json(get(router_for(MockObjectStore::new()), "/api/images").await).await;
    assert_eq!(json["count"], 0);
    assert!(json["images"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_extensions_and_expiry() {
    let store = MockObjectStore::new()
        .with_object("a.png", create_test_png(4, 4))
        .with_object("b.webp", b"webp".to_vec());

    let gallery = GalleryService::new(store)
        .with_filter(ImageFilter::new(["webp"]))
        .with_link_expiry(Duration::from_secs(3600));

    let json = body_json(get(router_with(gallery), "/api/images").await).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["images"][0]["key"], "b.webp");
    assert!(json["images"][0]["original_url"]
        .as_str()
        .unwrap()
        .contains("X-Amz-Expires=3600"));
}

#[tokio::test]
async fn test_listing_without_credentials() {
    let router = router_for(sample_store().without_credentials());

    let response = get(router, "/api/images").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert!(json["images"][0]["original_url"].is_null());
    assert_eq!(json["images"][0]["optimized_url"], "/image/photo.jpg");
}

#[tokio::test]
async fn test_listing_failure_is_server_error() {
    let store = sample_store().failing_list(StoreError::S3("AccessDenied".to_string()));

    let response = get(router_for(store), "/api/images").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "storage_error");
    assert_eq!(json["status"], 500);
    assert!(json["message"].as_str().unwrap().contains("AccessDenied"));
}

// =============================================================================
// HTML Gallery
// =============================================================================

#[tokio::test]
async fn test_gallery_page() {
    let response = get(router_for(sample_store()), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));

    let html = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("test-bucket"));
    assert!(html.contains(r#"src="/image/photo.jpg""#));
    assert!(html.contains("X-Amz-Expires=604800"));
    assert!(!html.contains("notes.txt"));
    assert!(!html.contains("folder/"));
}

#[tokio::test]
async fn test_gallery_page_without_credentials() {
    let response = get(router_for(sample_store().without_credentials()), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
    assert!(html.contains(r#"src="/image/photo.jpg""#));
    assert!(html.contains("Original link unavailable"));
    assert!(!html.contains("X-Amz-Signature"));
}

#[tokio::test]
async fn test_gallery_page_escapes_keys() {
    let store = MockObjectStore::new().with_object("<b>bold</b>.png", create_test_png(4, 4));

    let html = String::from_utf8(body_bytes(get(router_for(store), "/").await).await.to_vec())
        .unwrap();
    assert!(!html.contains("<b>bold</b>"));
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;.png"));
}

#[tokio::test]
async fn test_gallery_page_empty_bucket() {
    let html = String::from_utf8(
        body_bytes(get(router_for(MockObjectStore::new()), "/").await)
            .await
            .to_vec(),
    )
    .unwrap();
    assert!(html.contains("No images found."));
}

#[tokio::test]
async fn test_gallery_page_listing_failure() {
    let store = MockObjectStore::new().failing_list(StoreError::Connection("reset".to_string()));

    let response = get(router_for(store), "/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "connection_error");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = get(router_for(MockObjectStore::new()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// CORS
// =============================================================================

fn router_with_config(config: RouterConfig) -> axum::Router {
    create_router(GalleryService::new(sample_store()), config.with_tracing(false))
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let router = router_with_config(RouterConfig::new("test-bucket"));

    let response = preflight(router, "/api/images", "https://anywhere.example").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_specific_origins() {
    let config = RouterConfig::new("test-bucket")
        .with_cors_origins(vec!["https://gallery.example".to_string()]);

    let response = preflight(
        router_with_config(config.clone()),
        "/api/images",
        "https://gallery.example",
    )
    .await;
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "https://gallery.example"
    );

    let response = preflight(router_with_config(config), "/api/images", "https://evil.example").await;
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn test_cors_empty_origin_list_allows_none() {
    let config = RouterConfig::new("test-bucket").with_cors_origins(vec![]);

    let response = preflight(router_with_config(config), "/api/images", "https://gallery.example").await;
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
