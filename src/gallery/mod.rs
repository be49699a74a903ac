//! Gallery layer.
//!
//! Turns a bucket listing into gallery entries and serves transcoded
//! previews:
//!
//! - [`GalleryService`]: listing and image-serving entry point
//! - [`GalleryEntry`]: key, signed original link and preview path
//! - [`ImageFilter`]: folder and extension filtering of keys

mod listing;
mod service;

pub use listing::{
    transcoded_path, GalleryEntry, ImageFilter, DEFAULT_IMAGE_EXTENSIONS, IMAGE_ROUTE_PREFIX,
};
pub use service::{GalleryService, DEFAULT_LINK_EXPIRY, DEFAULT_SHORT_LINK_EXPIRY};
