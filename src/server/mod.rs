//! HTTP server layer for EXIF Streamer.
//!
//! This module provides the HTTP API for extracting EXIF metadata.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │                POST /exif?format=entries                        │
//! │                                                                 │
//! │  ┌───────────────────────────┐  ┌────────────────────────────┐  │
//! │  │         handlers          │  │          routes            │  │
//! │  │ (payload, extract, JSON)  │  │ (cors, limits, tracing)    │  │
//! │  └───────────────────────────┘  └────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    decode_payload, exif_handler, health_handler, AppState, ErrorResponse, ExifQueryParams,
    HealthResponse,
};
pub use routes::{create_router, RouterConfig};
