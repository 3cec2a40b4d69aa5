//! # EXIF Streamer
//!
//! Extracts EXIF metadata from images by decoding the TIFF Image File
//! Directories (IFDs) embedded in them.
//!
//! ## Features
//!
//! - **Container support**: Raw TIFF, JPEG APP1 and any buffer carrying an `Exif\0\0` marker
//! - **Full IFD tree**: Root and thumbnail IFDs, Exif, GPS and Interoperability sub-IFDs
//! - **Fault tolerant**: Undecodable entries are skipped, broken structure is reported
//! - **HTTP service**: Axum server accepting raw or base64-encoded images
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`mod@format`] - TIFF primitives, value resolution and EXIF block location
//! - [`exif`] - IFD tree, tag tables, directory walker and extraction
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_streamer::{extract_from_image, ExifRegistry, ExtractOptions};
//!
//! let image = std::fs::read("photo.jpg").unwrap();
//! let registry = ExifRegistry::standard();
//!
//! for entry in extract_from_image(&registry, &image, &ExtractOptions::default()).unwrap() {
//!     println!("{} = {}", entry.tag_name, entry.value_string);
//! }
//! ```

pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod server;

// Re-export commonly used types
pub use config::{Cli, Command, EncodeConfig, ExtractArgs, ExtractConfig, ServeConfig};
pub use error::{DecodeError, ExtractError, LocateError, ServeError};
pub use exif::{
    extract_from_image, extract_metadata, render_entries, ExifRegistry, ExtractOptions,
    IfdMapping, IfdVisitor, IfdWalker, OutputFormat, ResolvedEntry, TagIndex, UnknownTagPolicy,
    WalkSummary,
};
pub use format::tiff::{
    ByteOrder, FieldType, IfdTagEntry, Primitive, Rational, SRational, TagType, TagTypeRegistry,
    TagValue, TiffHeader, ValueResolver,
};
pub use format::{locate_ifd, ExifBlock};
pub use server::{create_router, AppState, ErrorResponse, HealthResponse, RouterConfig};
