use std::time::Duration;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::config::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::debug;

use super::{ObjectStore, ObjectSummary};
use crate::error::StoreError;

/// S3-backed implementation of [`ObjectStore`].
///
/// Bound to a single bucket. Listing reads only the first page returned by
/// `ListObjectsV2`.
///
/// # Example
///
/// ```ignore
/// use bucket_gallery::store::{create_s3_client, load_sdk_config, S3ObjectStore};
///
/// let sdk_config = load_sdk_config(None, "us-east-1").await;
/// let client = create_s3_client(&sdk_config, false);
/// let store = S3ObjectStore::new(client, "my-bucket", sdk_config.credentials_provider());
///
/// let objects = store.list().await?;
/// ```
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    credentials: Option<SharedCredentialsProvider>,
}

impl S3ObjectStore {
    /// Create a new store for the given bucket.
    ///
    /// # Arguments
    /// * `client` - AWS S3 client to use for requests
    /// * `bucket` - Bucket holding the gallery images
    /// * `credentials` - Provider consulted before signing download links;
    ///   `None` means links can never be signed
    pub fn new(
        client: Client,
        bucket: impl Into<String>,
        credentials: Option<SharedCredentialsProvider>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            credentials,
        }
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_uri(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }

    /// Make sure credentials resolve right now.
    ///
    /// Presigning is purely local, so without this check a missing provider
    /// would surface as an opaque signing failure.
    async fn ensure_credentials(&self) -> Result<(), StoreError> {
        let provider = self.credentials.as_ref().ok_or_else(|| {
            StoreError::CredentialsUnavailable("no credentials provider configured".to_string())
        })?;

        provider
            .provide_credentials()
            .await
            .map(|_| ())
            .map_err(|e| StoreError::CredentialsUnavailable(e.to_string()))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list(&self) -> Result<Vec<ObjectSummary>, StoreError> {
        let result = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| StoreError::S3(e.to_string()))?;

        if result.is_truncated() == Some(true) {
            debug!(bucket = %self.bucket, "Listing truncated, only the first page is used");
        }

        let objects = result
            .contents()
            .iter()
            .filter_map(|obj| {
                let key = obj.key()?;
                let summary = ObjectSummary::new(key);
                Some(match obj.size() {
                    Some(size) if size >= 0 => summary.with_size(size as u64),
                    _ => summary,
                })
            })
            .collect();

        Ok(objects)
    }

    async fn get_object(&self, key: &str) -> Result<Bytes, StoreError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let is_no_such_key = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);

                // Some S3-compatible services answer 404 without a NoSuchKey code
                let status_is_404 = e
                    .raw_response()
                    .map(|r| r.status().as_u16() == 404)
                    .unwrap_or(false);

                if is_no_such_key || status_is_404 {
                    return StoreError::NotFound(self.object_uri(key));
                }

                StoreError::S3(e.to_string())
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .into_bytes();

        Ok(data)
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError> {
        self.ensure_credentials().await?;

        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StoreError::S3(format!("invalid link expiry: {}", e)))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StoreError::S3(e.to_string()))?;

        Ok(request.uri().to_string())
    }
}

/// Load the shared AWS configuration with the given region and optional
/// custom endpoint.
///
/// Credentials are taken from the default provider chain (environment,
/// profile, instance metadata). Missing credentials are not an error here.
pub async fn load_sdk_config(endpoint_url: Option<&str>, region: &str) -> SdkConfig {
    let region = aws_config::Region::new(region.to_string());
    let mut config_loader =
        aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

    if let Some(endpoint) = endpoint_url {
        config_loader = config_loader.endpoint_url(endpoint);
    }

    config_loader.load().await
}

/// Create an S3 client from a loaded SDK configuration.
///
/// S3-compatible services (MinIO and friends) usually need path-style
/// addressing, so pass `force_path_style = true` when a custom endpoint is
/// configured.
pub fn create_s3_client(sdk_config: &SdkConfig, force_path_style: bool) -> Client {
    let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
        .force_path_style(force_path_style)
        .build();

    Client::from_conf(s3_config)
}
