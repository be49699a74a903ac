//! Object storage layer.
//!
//! The gallery talks to storage only through the [`ObjectStore`] trait, so
//! the HTTP layer can be exercised against an in-memory mock while production
//! uses [`S3ObjectStore`].
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            GalleryService               │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           ObjectStore Trait             │
//! │   list / get_object / presign_get       │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            S3ObjectStore                │
//! │     (aws-sdk-s3, one bucket)            │
//! └─────────────────────────────────────────┘
//! ```

mod s3;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreError;

pub use s3::{create_s3_client, load_sdk_config, S3ObjectStore};

/// One entry from a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    /// Object key, unique within the bucket
    pub key: String,

    /// Object size in bytes, when the backend reports it
    pub size: Option<u64>,
}

impl ObjectSummary {
    /// Create a summary for the given key without size information.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: None,
        }
    }

    /// Attach the object size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

/// Read-only access to a single bucket.
///
/// Implementations are shared across request handlers and must be safe for
/// concurrent use.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List the objects in the bucket.
    ///
    /// Only the first page returned by the backend is consulted.
    async fn list(&self) -> Result<Vec<ObjectSummary>, StoreError>;

    /// Fetch the full contents of an object.
    ///
    /// Returns [`StoreError::NotFound`] if the key does not exist.
    async fn get_object(&self, key: &str) -> Result<Bytes, StoreError>;

    /// Produce a time-limited download URL for an object.
    ///
    /// Returns [`StoreError::CredentialsUnavailable`] when no credentials
    /// can be resolved at call time.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError>;
}
