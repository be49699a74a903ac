//! HTTP request handlers for the gallery.
//!
//! # Endpoints
//!
//! - `GET /` - HTML gallery
//! - `GET /api/images` - Gallery listing as JSON
//! - `GET /image/{key}` - Transcoded preview
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::{ImageError, StoreError};
use crate::gallery::{GalleryEntry, GalleryService};
use crate::store::ObjectStore;

use super::page::generate_gallery_html;

/// Body returned when a preview cannot be produced.
pub const IMAGE_NOT_FOUND_MESSAGE: &str = "Image not found";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the gallery service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: ObjectStore> {
    /// The gallery service for listing and transcoding
    pub gallery: Arc<GalleryService<S>>,

    /// Heading shown on the gallery page
    pub title: String,
}

impl<S: ObjectStore> AppState<S> {
    /// Create a new application state with the given gallery service.
    pub fn new(gallery: GalleryService<S>) -> Self {
        Self {
            gallery: Arc::new(gallery),
            title: "Gallery".to_string(),
        }
    }

    /// Set the heading shown on the gallery page.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl<S: ObjectStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            gallery: Arc::clone(&self.gallery),
            title: self.title.clone(),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned when the listing fails.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "storage_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Response from the JSON listing endpoint.
#[derive(Debug, Serialize)]
pub struct ImagesResponse {
    /// Entries in storage-listing order
    pub images: Vec<GalleryEntry>,

    /// Number of entries
    pub count: usize,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Wrapper for listing errors to implement IntoResponse.
///
/// Every listing failure is a server error; the detail goes into the body.
#[derive(Debug)]
pub struct GalleryError(pub StoreError);

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let error_type = match &self.0 {
            StoreError::NotFound(_) => "not_found",
            StoreError::CredentialsUnavailable(_) => "credentials_unavailable",
            StoreError::S3(_) => "storage_error",
            StoreError::Connection(_) => "connection_error",
        };
        let message = self.0.to_string();

        error!(
            error_type = error_type,
            status = status.as_u16(),
            "Server error: {}",
            message
        );

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

impl From<StoreError> for GalleryError {
    fn from(err: StoreError) -> Self {
        GalleryError(err)
    }
}

/// Wrapper for image-serving errors to implement IntoResponse.
///
/// All failures collapse into a plain-text 404; the cause is only logged.
#[derive(Debug)]
pub struct ImageNotFound(pub ImageError);

impl IntoResponse for ImageNotFound {
    fn into_response(self) -> Response {
        if self.0.is_not_found() {
            debug!(status = 404, "Image not found: {}", self.0);
        } else {
            warn!(status = 404, "Failed to serve image: {}", self.0);
        }

        (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            IMAGE_NOT_FOUND_MESSAGE,
        )
            .into_response()
    }
}

impl From<ImageError> for ImageNotFound {
    fn from(err: ImageError) -> Self {
        ImageNotFound(err)
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle gallery page requests.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// `200 OK` with an HTML page listing every image in the bucket, each with a
/// signed link to the original and a preview served by `/image/{key}`.
///
/// # Errors
///
/// - `500 Internal Server Error`: Listing or signing failed
pub async fn gallery_handler<S: ObjectStore>(
    State(state): State<AppState<S>>,
) -> Result<Html<String>, GalleryError> {
    let entries = state.gallery.list_entries().await?;
    Ok(Html(generate_gallery_html(&state.title, &entries)))
}

/// Handle JSON listing requests.
///
/// # Endpoint
///
/// `GET /api/images`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "images": [
///     {
///       "key": "photo.jpg",
///       "original_url": "https://bucket.s3.amazonaws.com/photo.jpg?X-Amz-...",
///       "optimized_url": "/image/photo.jpg"
///     }
///   ],
///   "count": 1
/// }
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: Listing or signing failed
pub async fn images_handler<S: ObjectStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<ImagesResponse>, GalleryError> {
    let images = state.gallery.list_entries().await?;
    let count = images.len();
    Ok(Json(ImagesResponse { images, count }))
}

/// Handle preview requests.
///
/// # Endpoint
///
/// `GET /image/{key}`
///
/// # Path Parameters
///
/// - `key`: Object key, may contain `/`
///
/// # Response
///
/// - `200 OK`: PNG image shrunk to the configured bounds
/// - `404 Not Found`: `Image not found` for any fetch or decode failure, and
///   for an empty or undecodable key
///
/// # Headers
///
/// - `Content-Type: image/png`
/// - `X-Image-Dimensions: {width}x{height}`
pub async fn image_handler<S: ObjectStore>(
    State(state): State<AppState<S>>,
    key: Result<Path<String>, PathRejection>,
) -> Result<Response, ImageNotFound> {
    let key = match key {
        Ok(Path(key)) if !key.is_empty() => key,
        Ok(_) => return Err(ImageError::InvalidKey("empty key".to_string()).into()),
        Err(rejection) => return Err(ImageError::InvalidKey(rejection.body_text()).into()),
    };

    let image = state.gallery.serve_image(&key).await?;

    let dimensions = format!("{}x{}", image.width, image.height);
    let http_response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, image.content_type().to_string()),
            (header::HeaderName::from_static("x-image-dimensions"), dimensions),
        ],
        image.data,
    )
        .into_response();

    Ok(http_response)
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
