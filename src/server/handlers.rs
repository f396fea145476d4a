//! HTTP request handlers for the EXIF Probe API.
//!
//! # Endpoints
//!
//! - `POST /api/exif` - Extract metadata from an uploaded image
//! - `GET /health` - Health check endpoint

use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Local;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::ServerError;
use crate::metadata::ImageMetadata;
use crate::probe::probe_bytes;

/// Multipart field that carries the uploaded file.
pub const IMAGE_FIELD: &str = "image";

/// File name reported when the upload does not carry one.
pub const DEFAULT_FILE_NAME: &str = "upload";

// =============================================================================
// Response Types
// =============================================================================

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "missing_image", "invalid_request")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Successful extraction response.
#[derive(Debug, Clone, Serialize)]
pub struct ExifResponse {
    pub metadata: ImageMetadata,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert ServerError to HTTP response.
///
/// 4xx errors are logged at WARN level, 5xx errors at ERROR level.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ServerError::MissingImage => (StatusCode::BAD_REQUEST, "missing_image"),
            ServerError::InvalidMultipart(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            ServerError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            ServerError::Processing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "processing_error"),
        };
        let message = self.to_string();

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
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

fn multipart_error(err: MultipartError) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::PayloadTooLarge(err.body_text())
    } else {
        ServerError::InvalidMultipart(err.body_text())
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle image uploads.
///
/// # Endpoint
///
/// `POST /api/exif` with `multipart/form-data`; the file goes in the
/// `image` field.
///
/// # Response
///
/// - `200 OK`: `{"metadata": {...}}` with the file attributes and any EXIF fields
/// - `400 Bad Request`: No `image` field, or a malformed multipart body
/// - `413 Payload Too Large`: Upload above the configured limit
/// - `500 Internal Server Error`: Processing failed
///
/// `lastModified` is the time the upload was received, since multipart
/// uploads do not carry the file's own modification time.
pub async fn exif_handler(mut multipart: Multipart) -> Result<Json<ExifResponse>, ServerError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            debug!(field = ?field.name(), "Ignoring multipart field");
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();
        let content_type = field.content_type().map(str::to_string);
        let data: Bytes = field.bytes().await.map_err(multipart_error)?;
        let received = Local::now();

        debug!(file_name = %file_name, size = data.len(), "Received upload");

        let metadata = tokio::task::spawn_blocking(move || {
            probe_bytes(&file_name, &data, content_type.as_deref(), Some(received))
        })
        .await
        .map_err(|err| ServerError::Processing(err.to_string()))?;

        return Ok(Json(ExifResponse { metadata }));
    }

    Err(ServerError::MissingImage)
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
