//! Configuration management for EXIF Streamer.
//!
//! This module provides the command-line interface:
//! - `serve`: run the HTTP extraction service
//! - `extract`: print the metadata of local files as JSON
//! - `encode`: print a file as base64, ready to POST to the service
//!
//! # Environment Variables
//!
//! Server options can also be set via environment variables with the `EXIF_` prefix:
//!
//! - `EXIF_HOST` - Server bind address (default: 0.0.0.0)
//! - `EXIF_PORT` - Server port (default: 8080)
//! - `EXIF_MAX_BODY_BYTES` - Request body limit (default: 10 MiB)
//! - `EXIF_REQUEST_TIMEOUT` - Request timeout in seconds (default: 30)
//! - `EXIF_MAX_VALUES` - Cap on rendered elements per value (default: unlimited)
//! - `EXIF_SKIP_UNKNOWN_TAGS` - Drop tags missing from the tag index
//! - `EXIF_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::exif::{ExtractOptions, OutputFormat, UnknownTagPolicy};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default request body limit (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// CLI
// =============================================================================

/// EXIF Streamer - Extract EXIF metadata from images.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-streamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP extraction service.
    Serve(ServeConfig),

    /// Extract metadata from local image files.
    Extract(ExtractConfig),

    /// Print a file as base64.
    Encode(EncodeConfig),
}

// =============================================================================
// Extraction Options
// =============================================================================

/// Extraction options shared by `serve` and `extract`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractArgs {
    /// Render at most this many elements per value, followed by "...".
    #[arg(long, env = "EXIF_MAX_VALUES")]
    pub max_values: Option<usize>,

    /// Drop tags that are not in the standard tag tables instead of naming
    /// them by their hex id.
    #[arg(long, default_value_t = false, env = "EXIF_SKIP_UNKNOWN_TAGS")]
    pub skip_unknown_tags: bool,
}

impl ExtractArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_values == Some(0) {
            return Err("max_values must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            max_rendered_values: self.max_values,
            unknown_tags: if self.skip_unknown_tags {
                UnknownTagPolicy::Skip
            } else {
                UnknownTagPolicy::Emit
            },
        }
    }
}

// =============================================================================
// Serve
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "EXIF_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "EXIF_PORT")]
    pub port: u16,

    /// Maximum accepted request body in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES, env = "EXIF_MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS, env = "EXIF_REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // =========================================================================
    // Extraction Configuration
    // =========================================================================
    #[command(flatten)]
    pub extract: ExtractArgs,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "EXIF_CORS_ORIGINS", value_delimiter = ',')]
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
        if self.max_body_bytes == 0 {
            return Err("max_body_bytes must be greater than 0".to_string());
        }
        if self.request_timeout == 0 {
            return Err("request_timeout must be greater than 0".to_string());
        }
        self.extract.validate()
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Extract
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct ExtractConfig {
    /// Image files to read.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output shape.
    #[arg(long, value_enum, default_value_t = OutputFormat::Entries)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub extract: ExtractArgs,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl ExtractConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.extract.validate()
    }
}

// =============================================================================
// Encode
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct EncodeConfig {
    /// File to encode.
    pub file: PathBuf,
}

// =============================================================================
// Tests
// =============================================================================
