//! Test utilities for integration tests.
//!
//! Provides an in-memory [`ObjectStore`] and helpers for building test
//! images and driving the router.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tower::ServiceExt;

use bucket_gallery::error::StoreError;
use bucket_gallery::store::{ObjectStore, ObjectSummary};
use bucket_gallery::{create_router, GalleryService, RouterConfig};

// =============================================================================
// Mock Object Store
// =============================================================================

/// In-memory object store.
///
/// Keys are listed in insertion order. Folder markers are listed but have
/// no body.
#[derive(Clone, Default)]
pub struct MockObjectStore {
    keys: Vec<String>,
    objects: HashMap<String, Bytes>,
    credentials: bool,
    list_error: Option<StoreError>,
    get_count: Arc<AtomicUsize>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            credentials: true,
            ..Default::default()
        }
    }

    /// Add an object with the given body.
    pub fn with_object(mut self, key: &str, data: impl Into<Bytes>) -> Self {
        self.keys.push(key.to_string());
        self.objects.insert(key.to_string(), data.into());
        self
    }

    /// Add a zero-byte folder marker such as `photos/`.
    pub fn with_folder(mut self, key: &str) -> Self {
        self.keys.push(key.to_string());
        self
    }

    /// Make every signing attempt fail for lack of credentials.
    pub fn without_credentials(mut self) -> Self {
        self.credentials = false;
        self
    }

    /// Make listing fail with the given error.
    pub fn failing_list(mut self, err: StoreError) -> Self {
        self.list_error = Some(err);
        self
    }

    /// Number of `get_object` calls so far.
    pub fn get_count(&self) -> usize {
        self.get_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn list(&self) -> Result<Vec<ObjectSummary>, StoreError> {
        if let Some(err) = &self.list_error {
            return Err(err.clone());
        }

        Ok(self
            .keys
            .iter()
            .map(|key| {
                let size = self.objects.get(key).map_or(0, |b| b.len() as u64);
                ObjectSummary::new(key.clone()).with_size(size)
            })
            .collect())
    }

    async fn get_object(&self, key: &str) -> Result<Bytes, StoreError> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("s3://mock/{}", key)))
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError> {
        if !self.credentials {
            return Err(StoreError::CredentialsUnavailable(
                "no credentials in mock".to_string(),
            ));
        }
        Ok(format!(
            "https://mock.s3.amazonaws.com/{}?X-Amz-Expires={}&X-Amz-Signature=abc",
            key,
            expires_in.as_secs()
        ))
    }
}

// =============================================================================
// Test Images
// =============================================================================

/// Encode a gradient image of the given size in the given format.
pub fn create_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });

    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    create_test_image(width, height, ImageFormat::Jpeg)
}

pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    create_test_image(width, height, ImageFormat::Png)
}

/// Decode a response body and return its format and dimensions.
pub fn decode_body(data: &[u8]) -> (ImageFormat, u32, u32) {
    let format = image::guess_format(data).unwrap();
    let img = image::load_from_memory(data).unwrap();
    (format, img.width(), img.height())
}

// =============================================================================
// Router Helpers
// =============================================================================

/// Build a router over the given store with default gallery settings.
pub fn router_for(store: MockObjectStore) -> Router {
    router_with(GalleryService::new(store))
}

/// Build a router over a configured gallery service.
pub fn router_with(gallery: GalleryService<MockObjectStore>) -> Router {
    create_router(gallery, RouterConfig::new("test-bucket").with_tracing(false))
}

/// Send a CORS preflight for `GET uri` from `origin`.
pub async fn preflight(router: Router, uri: &str, origin: &str) -> Response<Body> {
    let request = Request::builder()
        .method("OPTIONS")
        .uri(uri)
        .header("origin", origin)
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();
    router.oneshot(request).await.unwrap()
}

/// Send a GET request through the router.
pub async fn get(router: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap()
}

/// Collect a response body.
pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
