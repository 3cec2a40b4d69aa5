//! EXIF Streamer - Extract EXIF metadata from images.
//!
//! This binary runs the HTTP service or extracts metadata from local files.

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use exif_streamer::{
    config::{Cli, Command, EncodeConfig, ExtractConfig, ServeConfig},
    exif::{extract_from_image, render_entries, ExifRegistry},
    server::{create_router, RouterConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Extract(config) => run_extract(config),
        Command::Encode(config) => run_encode(config),
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

    let registry = ExifRegistry::standard();

    info!("EXIF Streamer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Max body: {} bytes", config.max_body_bytes);
    info!("  Request timeout: {}s", config.request_timeout);
    match config.extract.max_values {
        Some(n) => info!("  Rendered values: first {} per tag", n),
        None => info!("  Rendered values: all"),
    }
    if config.extract.skip_unknown_tags {
        info!("  Unknown tags: skipped");
    }
    if registry.tags.is_empty() {
        warn!("  Tag index: empty, every tag is reported by id");
    } else {
        info!("  Tag index: {} standard tags", registry.tags.len());
    }
    if config.cors_origins.is_none() {
        warn!("  CORS: any origin allowed");
    }

    let router_config = build_router_config(&config);
    let router = create_router(registry, router_config);

    let addr = config.bind_address();
    info!("Server listening on: http://{}", addr);
    info!("  curl http://{}/health", addr);
    info!(
        "  curl --data-binary @photo.jpg -H 'Content-Type: image/jpeg' http://{}/exif",
        addr
    );

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

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_streamer=debug,tower_http=debug"
    } else {
        "exif_streamer=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new()
        .with_max_body_bytes(config.max_body_bytes)
        .with_request_timeout(Duration::from_secs(config.request_timeout))
        .with_extract_options(config.extract.options());

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}

// =============================================================================
// Extract Command
// =============================================================================

fn run_extract(config: ExtractConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let registry = ExifRegistry::standard();
    let options = config.extract.options();
    let mut failed = false;

    // A single file prints its result directly; several are keyed by path
    let mut results = serde_json::Map::new();
    for path in &config.files {
        let key = path.display().to_string();

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error: {}: {}", key, e);
                failed = true;
                continue;
            }
        };

        match extract_from_image(&registry, &data, &options) {
            Ok(entries) => {
                results.insert(key, render_entries(&entries, config.format));
            }
            Err(e) => {
                eprintln!("Error: {}: {}", key, e);
                failed = true;
            }
        }
    }

    let output = if config.files.len() == 1 {
        match results.into_iter().next() {
            Some((_, value)) => value,
            None => return ExitCode::FAILURE,
        }
    } else {
        serde_json::Value::Object(results)
    };

    if let Err(e) = print_json(&output, config.pretty) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> std::io::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(std::io::Error::other)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered)
}

// =============================================================================
// Encode Command
// =============================================================================

fn run_encode(config: EncodeConfig) -> ExitCode {
    match std::fs::read(&config.file) {
        Ok(data) => {
            println!("{}", STANDARD.encode(data));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}: {}", config.file.display(), e);
            ExitCode::FAILURE
        }
    }
}
