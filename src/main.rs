//! Bucket Gallery - a web gallery for images stored in S3.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bucket_gallery::{
    config::{CheckConfig, Cli, Command, ServeConfig},
    create_s3_client, load_sdk_config,
    gallery::{GalleryService, ImageFilter},
    refresh::spawn_refresh_job,
    server::{create_router, RouterConfig},
    store::{ObjectStore, S3ObjectStore},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Check(config) => run_check(config).await,
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Bucket Gallery v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  S3 bucket: {}", config.s3_bucket);
    if let Some(ref endpoint) = config.s3_endpoint {
        info!("  S3 endpoint: {}", endpoint);
    }
    info!("  S3 region: {}", config.s3_region);
    info!("  Link expiry: {}s", config.link_expiry);
    info!("  Preview bounds: {}x{}", config.max_width, config.max_height);
    info!("  Extensions: {}", config.extensions.join(", "));
    if config.refresh_interval == 0 {
        info!("  Refresh job: disabled");
    } else {
        info!("  Refresh job: every {}s", config.refresh_interval);
    }

    let store = build_store(
        config.s3_endpoint.as_deref(),
        &config.s3_region,
        &config.s3_bucket,
    )
    .await;

    // Probe only: a failure here is logged, not fatal
    info!("Connecting to S3...");
    match count_images(&store, &config.image_filter()).await {
        Ok(count) => {
            info!("  Connected successfully");
            info!("  Found {} image(s) in bucket", count);
        }
        Err(e) => {
            warn!("  Could not list bucket '{}': {}", config.s3_bucket, e);
            warn!("  The gallery will report errors until the bucket is reachable");
        }
    }

    let gallery = GalleryService::new(store)
        .with_filter(config.image_filter())
        .with_link_expiry(config.link_expiry())
        .with_bounds(config.bounds());

    let _refresh = spawn_refresh_job(config.refresh_interval());

    let router = create_router(gallery, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Open the gallery in your browser:");
    info!("    open http://{}/", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/api/images", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Load AWS configuration and create the bucket-bound store.
async fn build_store(endpoint: Option<&str>, region: &str, bucket: &str) -> S3ObjectStore {
    let sdk_config = load_sdk_config(endpoint, region).await;
    let client = create_s3_client(&sdk_config, endpoint.is_some());
    S3ObjectStore::new(client, bucket, sdk_config.credentials_provider())
}

/// List the bucket once and count the keys the gallery would show.
async fn count_images(store: &S3ObjectStore, filter: &ImageFilter) -> Result<usize, String> {
    let objects = store.list().await.map_err(|e| e.to_string())?;
    Ok(objects.iter().filter(|o| filter.accepts(&o.key)).count())
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "bucket_gallery=debug,tower_http=debug"
    } else {
        "bucket_gallery=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new(config.s3_bucket.clone());

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}

// =============================================================================
// Check Command
// =============================================================================

async fn run_check(config: CheckConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    println!("Bucket Gallery Configuration Check");
    println!("═══════════════════════════════════");
    println!();

    let bucket = match config.resolve_bucket() {
        Ok(b) => {
            println!("✓ Bucket: {}", b);
            b
        }
        Err(e) => {
            println!("✗ Bucket: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref endpoint) = config.s3_endpoint {
        println!("✓ Endpoint: {}", endpoint);
    }
    println!("✓ Region: {}", config.s3_region);

    let filter = config.image_filter();
    if filter.extensions().is_empty() {
        println!("✗ Extensions: none configured");
        return ExitCode::FAILURE;
    }
    println!("✓ Extensions: {}", filter.extensions().join(", "));
    println!();

    print!("Testing S3 connection... ");

    let store = build_store(config.s3_endpoint.as_deref(), &config.s3_region, &bucket).await;

    let objects = match store.list().await {
        Ok(objects) => {
            println!("✓ success");
            objects
        }
        Err(e) => {
            println!("✗ failed");
            println!();
            println!("Error: {}", e);
            println!();
            println!("Please check:");
            println!("  - Your AWS credentials are configured correctly");
            println!("  - The bucket '{}' exists and is accessible", bucket);
            if config.s3_endpoint.is_some() {
                println!("  - The S3 endpoint is correct and reachable");
            }
            return ExitCode::FAILURE;
        }
    };

    if config.list_images {
        println!();
        println!("Images in bucket:");
        println!("─────────────────");

        let images: Vec<_> = objects
            .iter()
            .filter(|o| filter.accepts(&o.key))
            .collect();

        if images.is_empty() {
            println!("  (no images found)");
        } else {
            for image in &images {
                match image.size {
                    Some(size) => println!("  {} ({:.1} KB)", image.key, size as f64 / 1024.0),
                    None => println!("  {}", image.key),
                }
            }
            println!();
            println!("Total: {} image(s)", images.len());
        }
    }

    println!();
    println!("═══════════════════════════════════");
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}
