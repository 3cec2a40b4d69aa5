//! HTTP request handlers for the EXIF extraction API.
//!
//! # Endpoints
//!
//! - `POST /exif` - Extract EXIF metadata from an image
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{ExtractError, ServeError};
use crate::exif::{extract_from_image, render_entries, ExifRegistry, ExtractOptions, OutputFormat};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the extraction tables.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState {
    /// Type, IFD and tag tables, built once at startup
    pub registry: Arc<ExifRegistry>,

    /// Options applied to every extraction
    pub options: ExtractOptions,
}

impl AppState {
    /// Create a new application state with default extraction options.
    pub fn new(registry: ExifRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            options: ExtractOptions::default(),
        }
    }

    /// Set the extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            options: self.options,
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for extraction requests.
#[derive(Debug, Default, Deserialize)]
pub struct ExifQueryParams {
    /// Output shape (defaults to `entries`)
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "no_exif", "invalid_payload")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    pub status: u16,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert ServeError to HTTP response.
///
/// Images without EXIF are common and logged at DEBUG level; other client
/// errors at WARN.
impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ServeError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "invalid_payload"),
            ServeError::Extract(ExtractError::NoExif(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "no_exif")
            }
            ServeError::Extract(ExtractError::Decode(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "malformed_exif")
            }
        };
        let message = self.to_string();

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else if error_type == "no_exif" {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "No EXIF: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);

        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Payload Decoding
// =============================================================================

/// Whether the request declares a binary image body.
fn is_binary_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.starts_with("image/") || mime == "application/octet-stream"
}

/// Turn the request body into image bytes.
///
/// Binary content types are taken as-is. Anything else is read as base64
/// text; whitespace (including line wrapping) and a `data:...;base64,` prefix
/// are accepted.
pub fn decode_payload(headers: &HeaderMap, body: &Bytes) -> Result<Bytes, ServeError> {
    if body.is_empty() {
        return Err(ServeError::InvalidPayload("empty request body".to_string()));
    }

    if is_binary_content_type(headers) {
        return Ok(body.clone());
    }

    let text = std::str::from_utf8(body)
        .map_err(|_| {
            ServeError::InvalidPayload(
                "body is not base64 text; send raw images as application/octet-stream".to_string(),
            )
        })?
        .trim();

    if text.starts_with("http://") || text.starts_with("https://") {
        return Err(ServeError::InvalidPayload(
            "image URLs are not supported; send the image bytes".to_string(),
        ));
    }

    let encoded = match text.strip_prefix("data:") {
        Some(data_url) => data_url
            .split_once(";base64,")
            .map_or(data_url, |(_, data)| data),
        None => text,
    };

    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return Err(ServeError::InvalidPayload("empty request body".to_string()));
    }

    STANDARD
        .decode(compact.as_bytes())
        .map(Bytes::from)
        .map_err(|e| ServeError::InvalidPayload(format!("invalid base64: {}", e)))
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle extraction requests.
///
/// # Endpoint
///
/// `POST /exif?format={entries|names|paths|full}`
///
/// # Request
///
/// Raw image bytes with `Content-Type: image/*` or
/// `application/octet-stream`, otherwise the base64-encoded image as text.
///
/// # Response
///
/// `200 OK` with the extracted entries, by default:
/// ```json
/// [
///   { "Make": "Canon" },
///   { "Model": "Canon EOS 5D" }
/// ]
/// ```
///
/// # Errors
///
/// - `400 Bad Request` (`invalid_payload`): empty body or bad base64
/// - `422 Unprocessable Entity` (`no_exif`): the image carries no EXIF block
/// - `422 Unprocessable Entity` (`malformed_exif`): the EXIF structure is broken
pub async fn exif_handler(
    State(state): State<AppState>,
    Query(query): Query<ExifQueryParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ServeError> {
    let image = decode_payload(&headers, &body)?;

    let entries = extract_from_image(&state.registry, &image, &state.options)?;
    debug!(
        size = image.len(),
        entries = entries.len(),
        format = ?query.format,
        "Extracted EXIF"
    );

    Ok(Json(render_entries(&entries, query.format)))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
