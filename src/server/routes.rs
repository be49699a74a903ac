//! Router configuration for the gallery.
//!
//! # Route Structure
//!
//! ```text
//! /                 - HTML gallery
//! /api/images       - Gallery listing as JSON
//! /image/{*key}     - Transcoded preview (key may contain '/')
//! /image/           - Always 404, same body as a missing key
//! /health           - Health check
//! ```
//!
//! # Example
//!
//! ```ignore
//! use bucket_gallery::server::routes::{create_router, RouterConfig};
//! use bucket_gallery::gallery::GalleryService;
//!
//! let gallery = GalleryService::new(store);
//! let router = create_router(gallery, RouterConfig::new("my-bucket"));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{routing::get, Router};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{gallery_handler, health_handler, image_handler, images_handler, AppState};
use crate::gallery::GalleryService;
use crate::store::ObjectStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Heading shown on the gallery page
    pub title: String,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new("Gallery")
    }
}

impl RouterConfig {
    /// Create a new router configuration with the given page title.
    ///
    /// By default CORS allows any origin and tracing is enabled.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `gallery` - The gallery service answering all requests
/// * `config` - Router configuration
pub fn create_router<S>(gallery: GalleryService<S>, config: RouterConfig) -> Router
where
    S: ObjectStore + 'static,
{
    let app_state = AppState::new(gallery).with_title(config.title.clone());
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/", get(gallery_handler::<S>))
        .route("/api/images", get(images_handler::<S>))
        .route("/image/", get(image_handler::<S>))
        .route("/image/{*key}", get(image_handler::<S>))
        .route("/health", get(health_handler))
        .with_state(app_state)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
