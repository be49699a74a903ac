use thiserror::Error;

/// Errors returned by an object store backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Object not found
    #[error("Object not found: {0}")]
    NotFound(String),

    /// No credentials could be resolved for request signing
    #[error("Credentials unavailable: {0}")]
    CredentialsUnavailable(String),

    /// Error from S3 or S3-compatible storage
    #[error("S3 error: {0}")]
    S3(String),

    /// Network or connection error while streaming a body
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Errors that can occur while transcoding an image.
#[derive(Debug, Clone, Error)]
pub enum TranscodeError {
    /// Source bytes are not a decodable image
    #[error("Decode error: {0}")]
    Decode(String),

    /// Re-encoding the resized image failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// The blocking transcode task panicked or was cancelled
    #[error("Transcode task failed: {0}")]
    Task(String),
}

/// Errors on the image-serving path.
///
/// Every variant is reported to the client the same way; the distinction
/// only matters for logging.
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    /// Fetching the original from the store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Decoding or re-encoding failed
    #[error("Transcode error: {0}")]
    Transcode(#[from] TranscodeError),

    /// The request path did not yield a usable object key
    #[error("Invalid image key: {0}")]
    InvalidKey(String),
}

impl ImageError {
    /// Whether the request named no existing object.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ImageError::Store(StoreError::NotFound(_)) | ImageError::InvalidKey(_)
        )
    }
}
