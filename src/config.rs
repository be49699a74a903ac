//! Configuration management for Bucket Gallery.
//!
//! This module provides a configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `GALLERY_` prefix
//! - Sensible defaults for all settings
//!
//! # Commands
//!
//! - `bucket-gallery` / `bucket-gallery serve` - Run the HTTP server
//! - `bucket-gallery check` - Verify bucket access and list gallery images
//!
//! # Environment Variables
//!
//! - `GALLERY_HOST` - Server bind address (default: 0.0.0.0)
//! - `GALLERY_PORT` - Server port (default: 3000)
//! - `GALLERY_S3_BUCKET` - S3 bucket name (default: website-image-serve)
//! - `GALLERY_S3_ENDPOINT` - Custom S3 endpoint for S3-compatible services
//! - `GALLERY_S3_REGION` - AWS region (default: us-east-1)
//! - `GALLERY_LINK_EXPIRY` - Signed link lifetime in seconds (default: 604800)
//! - `GALLERY_MAX_WIDTH` / `GALLERY_MAX_HEIGHT` - Preview bounds (default: 800x600)
//! - `GALLERY_EXTENSIONS` - Comma-separated image extensions (default: png,jpg,jpeg)
//! - `GALLERY_REFRESH_INTERVAL` - Refresh job period in seconds, 0 disables (default: 604800)
//! - `GALLERY_CORS_ORIGINS` - Comma-separated allowed origins (default: any)
//!
//! AWS credentials are read by the SDK from its usual sources
//! (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, profiles, ...).

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::gallery::{ImageFilter, DEFAULT_IMAGE_EXTENSIONS, DEFAULT_LINK_EXPIRY};
use crate::refresh::DEFAULT_REFRESH_INTERVAL;
use crate::transcode::{TranscodeBounds, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bucket name.
pub const DEFAULT_BUCKET: &str = "website-image-serve";

/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default signed link lifetime in seconds.
pub const DEFAULT_LINK_EXPIRY_SECS: u64 = DEFAULT_LINK_EXPIRY.as_secs();

/// Longest lifetime SigV4 allows for a presigned URL.
pub const MAX_LINK_EXPIRY_SECS: u64 = 604_800;

/// Default refresh job period in seconds.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = DEFAULT_REFRESH_INTERVAL.as_secs();

fn default_extensions() -> Vec<String> {
    DEFAULT_IMAGE_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// Bucket Gallery - a web gallery for images stored in S3.
///
/// Lists image objects in a bucket, hands out signed links to the originals
/// and serves resized PNG previews on demand.
#[derive(Parser, Debug, Clone)]
#[command(name = "bucket-gallery")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Server options used when no subcommand is given.
    #[command(flatten)]
    pub serve: ServeConfig,
}

impl Cli {
    /// Resolve the command to run, defaulting to `serve`.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the gallery HTTP server.
    Serve(ServeConfig),

    /// Check bucket access and optionally list gallery images.
    Check(CheckConfig),
}

/// Options for the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GALLERY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GALLERY_PORT")]
    pub port: u16,

    // =========================================================================
    // S3 Configuration
    // =========================================================================
    /// S3 bucket name containing the images.
    #[arg(long, default_value = DEFAULT_BUCKET, env = "GALLERY_S3_BUCKET")]
    pub s3_bucket: String,

    /// Custom S3 endpoint URL for S3-compatible services (MinIO, etc.).
    ///
    /// If not specified, uses the default AWS S3 endpoint.
    #[arg(long, env = "GALLERY_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region for S3.
    #[arg(long, default_value = DEFAULT_REGION, env = "GALLERY_S3_REGION")]
    pub s3_region: String,

    // =========================================================================
    // Gallery Configuration
    // =========================================================================
    /// Lifetime of signed links to originals, in seconds (max one week).
    #[arg(long, default_value_t = DEFAULT_LINK_EXPIRY_SECS, env = "GALLERY_LINK_EXPIRY")]
    pub link_expiry: u64,

    /// Maximum width of served previews.
    #[arg(long, default_value_t = DEFAULT_MAX_WIDTH, env = "GALLERY_MAX_WIDTH")]
    pub max_width: u32,

    /// Maximum height of served previews.
    #[arg(long, default_value_t = DEFAULT_MAX_HEIGHT, env = "GALLERY_MAX_HEIGHT")]
    pub max_height: u32,

    /// Image extensions shown in the gallery (comma-separated).
    #[arg(
        long,
        env = "GALLERY_EXTENSIONS",
        value_delimiter = ',',
        default_values_t = default_extensions()
    )]
    pub extensions: Vec<String>,

    /// Period of the refresh job in seconds (0 disables it).
    #[arg(long, default_value_t = DEFAULT_REFRESH_INTERVAL_SECS, env = "GALLERY_REFRESH_INTERVAL")]
    pub refresh_interval: u64,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "GALLERY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.s3_bucket.is_empty() {
            return Err(
                "S3 bucket name is required. Set --s3-bucket or GALLERY_S3_BUCKET".to_string(),
            );
        }

        if self.link_expiry == 0 || self.link_expiry > MAX_LINK_EXPIRY_SECS {
            return Err(format!(
                "link_expiry must be between 1 and {} seconds",
                MAX_LINK_EXPIRY_SECS
            ));
        }

        if self.max_width == 0 || self.max_height == 0 {
            return Err("max_width and max_height must be greater than 0".to_string());
        }

        if self.image_filter().extensions().is_empty() {
            return Err("At least one image extension is required".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Signed link lifetime.
    pub fn link_expiry(&self) -> Duration {
        Duration::from_secs(self.link_expiry)
    }

    /// Bounding box for served previews.
    pub fn bounds(&self) -> TranscodeBounds {
        TranscodeBounds::new(self.max_width, self.max_height)
    }

    /// Filter built from the configured extensions.
    pub fn image_filter(&self) -> ImageFilter {
        ImageFilter::new(&self.extensions)
    }

    /// Refresh job period.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval)
    }
}

/// Options for the `check` command.
#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// S3 bucket name containing the images.
    #[arg(long, default_value = DEFAULT_BUCKET, env = "GALLERY_S3_BUCKET")]
    pub s3_bucket: String,

    /// Custom S3 endpoint URL for S3-compatible services.
    #[arg(long, env = "GALLERY_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region for S3.
    #[arg(long, default_value = DEFAULT_REGION, env = "GALLERY_S3_REGION")]
    pub s3_region: String,

    /// Image extensions shown in the gallery (comma-separated).
    #[arg(
        long,
        env = "GALLERY_EXTENSIONS",
        value_delimiter = ',',
        default_values_t = default_extensions()
    )]
    pub extensions: Vec<String>,

    /// List the images the gallery would show.
    #[arg(long, default_value_t = false)]
    pub list_images: bool,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CheckConfig {
    /// Get the bucket name, or an error if it is empty.
    pub fn resolve_bucket(&self) -> Result<String, String> {
        if self.s3_bucket.is_empty() {
            return Err("no bucket configured (set --s3-bucket or GALLERY_S3_BUCKET)".to_string());
        }
        Ok(self.s3_bucket.clone())
    }

    /// Filter built from the configured extensions.
    pub fn image_filter(&self) -> ImageFilter {
        ImageFilter::new(&self.extensions)
    }
}

// =============================================================================
// Tests
// =============================================================================
