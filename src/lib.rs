//! # Bucket Gallery
//!
//! A small web gallery for images stored in an S3 bucket.
//!
//! The gallery page lists every image object in the bucket. Each entry links
//! to the original through a time-limited signed URL and shows a preview that
//! the server produces on demand by shrinking the original to fit a bounding
//! box (800x600 by default) and re-encoding it as PNG.
//!
//! ## Architecture
//!
//! - [`store`] - Object storage trait and its S3 implementation
//! - [`transcode`] - Decode, fit-within resize and PNG encoding
//! - [`gallery`] - Key filtering, entry building and preview serving
//! - [`server`] - Axum routes, handlers and the HTML page
//! - [`refresh`] - Periodic background job
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use bucket_gallery::{
//!     create_router, create_s3_client, load_sdk_config, GalleryService, RouterConfig,
//!     S3ObjectStore,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk_config = load_sdk_config(None, "us-east-1").await;
//!     let client = create_s3_client(&sdk_config, false);
//!     let store = S3ObjectStore::new(
//!         client,
//!         "website-image-serve",
//!         sdk_config.credentials_provider(),
//!     );
//!
//!     let router = create_router(GalleryService::new(store), RouterConfig::default());
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod gallery;
pub mod refresh;
pub mod server;
pub mod store;
pub mod transcode;

// Re-export commonly used types
pub use config::{CheckConfig, Cli, Command, ServeConfig};
pub use error::{ImageError, StoreError, TranscodeError};
pub use gallery::{GalleryEntry, GalleryService, ImageFilter};
pub use refresh::spawn_refresh_job;
pub use server::{create_router, AppState, RouterConfig};
pub use store::{create_s3_client, load_sdk_config, ObjectStore, ObjectSummary, S3ObjectStore};
pub use transcode::{fit_within, ImageTranscoder, TranscodeBounds, TranscodedImage};
