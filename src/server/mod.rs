//! HTTP server layer for the gallery.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │              GET /        GET /image/{key}                      │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │    page     │  │        routes           │  │
//! │  │ (requests)  │  │ (HTML view) │  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod page;
pub mod routes;

pub use handlers::{
    gallery_handler, health_handler, image_handler, images_handler, AppState, ErrorResponse,
    GalleryError, HealthResponse, ImageNotFound, ImagesResponse, IMAGE_NOT_FOUND_MESSAGE,
};
pub use page::generate_gallery_html;
pub use routes::{create_router, RouterConfig};
