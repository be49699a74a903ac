//! Gallery service.
//!
//! Orchestrates the two request paths:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        GalleryService                           │
//! │                                                                 │
//! │  list_entries()                 serve_image(key)                │
//! │  1. store.list()                1. store.get_object(key)        │
//! │  2. ImageFilter::accepts        2. spawn_blocking(transcode)    │
//! │  3. store.presign_get()         3. PNG bytes                    │
//! │           │                                │                    │
//! │           ▼                                ▼                    │
//! │    ┌──────────────┐               ┌────────────────┐            │
//! │    │ ObjectStore  │               │ ImageTranscoder│            │
//! │    └──────────────┘               └────────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ImageError, StoreError, TranscodeError};
use crate::store::ObjectStore;
use crate::transcode::{
    ImageTranscoder, TranscodeBounds, TranscodedImage, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH,
};

use super::listing::{GalleryEntry, ImageFilter};

/// Default lifetime of signed links to originals (one week).
pub const DEFAULT_LINK_EXPIRY: Duration = Duration::from_secs(604_800);

/// Lifetime for short-lived signed links (one hour).
pub const DEFAULT_SHORT_LINK_EXPIRY: Duration = Duration::from_secs(3600);

/// Service behind the gallery and image endpoints.
///
/// # Type Parameters
///
/// * `S` - The object store backend (e.g., [`crate::store::S3ObjectStore`])
///
/// # Example
///
/// ```ignore
/// use bucket_gallery::gallery::GalleryService;
///
/// let service = GalleryService::new(store);
/// let entries = service.list_entries().await?;
/// let preview = service.serve_image("photo.jpg").await?;
/// ```
pub struct GalleryService<S: ObjectStore> {
    store: S,
    filter: ImageFilter,
    transcoder: ImageTranscoder,
    link_expiry: Duration,
    bounds: TranscodeBounds,
}

impl<S: ObjectStore> GalleryService<S> {
    /// Create a service with default filter, link expiry and bounds.
    pub fn new(store: S) -> Self {
        Self {
            store,
            filter: ImageFilter::default(),
            transcoder: ImageTranscoder::new(),
            link_expiry: DEFAULT_LINK_EXPIRY,
            bounds: TranscodeBounds::new(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT),
        }
    }

    /// Use a custom image filter.
    pub fn with_filter(mut self, filter: ImageFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the lifetime of signed links to originals.
    pub fn with_link_expiry(mut self, expiry: Duration) -> Self {
        self.link_expiry = expiry;
        self
    }

    /// Set the bounding box for served previews.
    pub fn with_bounds(mut self, bounds: TranscodeBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the image filter.
    pub fn filter(&self) -> &ImageFilter {
        &self.filter
    }

    /// Get the signed link lifetime.
    pub fn link_expiry(&self) -> Duration {
        self.link_expiry
    }

    /// Get the preview bounds.
    pub fn bounds(&self) -> TranscodeBounds {
        self.bounds
    }

    /// List the gallery entries in storage-listing order.
    ///
    /// Missing credentials only blank out `original_url`; any other storage
    /// failure aborts the listing.
    pub async fn list_entries(&self) -> Result<Vec<GalleryEntry>, StoreError> {
        let objects = self.store.list().await?;
        let mut entries = Vec::new();

        for object in objects {
            if !self.filter.accepts(&object.key) {
                debug!(key = %object.key, "Skipping non-image object");
                continue;
            }

            let original_url = match self.store.presign_get(&object.key, self.link_expiry).await
            {
                Ok(url) => Some(url),
                Err(StoreError::CredentialsUnavailable(reason)) => {
                    warn!(key = %object.key, "Cannot sign link, credentials unavailable: {}", reason);
                    None
                }
                Err(e) => return Err(e),
            };

            entries.push(GalleryEntry::new(object.key, original_url));
        }

        Ok(entries)
    }

    /// Fetch `key` and return it shrunk to the configured bounds as PNG.
    pub async fn serve_image(&self, key: &str) -> Result<TranscodedImage, ImageError> {
        let source = self.store.get_object(key).await?;

        let transcoder = self.transcoder.clone();
        let bounds = self.bounds;
        let image = tokio::task::spawn_blocking(move || {
            transcoder.resize_and_encode(&source, bounds)
        })
        .await
        .map_err(|e| TranscodeError::Task(e.to_string()))??;

        debug!(
            key = key,
            width = image.width,
            height = image.height,
            bytes = image.data.len(),
            "Transcoded image"
        );

        Ok(image)
    }
}
