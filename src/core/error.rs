//! Typed error handling for pago-qr
//!
//! Two kinds of failure reach users: field-level validation failures on the
//! encoder side and record-level decode failures on the viewer side. The
//! remaining categories cover QR rendering and configuration.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: form input rejected before encoding
//! - [`DecodeError`]: a link payload could not be turned back into a record
//! - [`RenderError`]: QR symbol or PNG could not be produced
//! - [`ConfigError`]: configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match decode_payload(Some(q)) {
//!     Ok(record) => println!("{}", record.header),
//!     Err(DecodeError::NoCode) => println!("nothing to show"),
//!     Err(DecodeError::InvalidFormat { .. }) => println!("bad link"),
//! }
//! ```

use super::validation::FieldErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for pago-qr
#[derive(Debug, Error)]
pub enum PagoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl PagoError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PagoError::Validation(e) => e.status_code(),
            PagoError::Decode(_) => StatusCode::BAD_REQUEST,
            PagoError::Render(e) => e.status_code(),
            PagoError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PagoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PagoError::Validation(e) => e.error_code(),
            PagoError::Decode(e) => e.error_code(),
            PagoError::Render(e) => e.error_code(),
            PagoError::Config(_) => "CONFIG_ERROR",
            PagoError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            PagoError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for PagoError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Encoder input rejected
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields broke a rule; messages are grouped per field
    #[error("Validation errors: {}", summarize(.0))]
    FieldErrors(FieldErrors),

    /// The body could not be read as a form at all
    #[error("Invalid body: {message}")]
    InvalidBody { message: String },
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{}: {}", field, m)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ValidationError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_FAILED",
            ValidationError::InvalidBody { .. } => "INVALID_BODY",
        }
    }

    /// Messages for one field, empty when the field passed
    pub fn messages_for(&self, field: &str) -> &[String] {
        match self {
            ValidationError::FieldErrors(errors) => {
                errors.get(field).map(Vec::as_slice).unwrap_or(&[])
            }
            ValidationError::InvalidBody { .. } => &[],
        }
    }
}

// =============================================================================
// Decode Errors
// =============================================================================

/// Viewer-side failure. Only two outcomes are distinguished.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The `q` parameter is missing or empty
    #[error("No se proporcionó ningún código para decodificar")]
    NoCode,

    /// The payload is not base64, not UTF-8, not JSON, or not a record
    #[error("Error al decodificar los datos. El formato no es válido.")]
    InvalidFormat { reason: String },
}

impl DecodeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            DecodeError::NoCode => "NO_CODE",
            DecodeError::InvalidFormat { .. } => "INVALID_FORMAT",
        }
    }

    pub(crate) fn invalid(reason: impl ToString) -> Self {
        DecodeError::InvalidFormat {
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Render Errors
// =============================================================================

/// QR rendering failures
#[derive(Debug, Error)]
pub enum RenderError {
    /// The link does not fit in a QR symbol
    #[error("Link too long for a QR code ({length} bytes): {message}")]
    DataTooLong { length: usize, message: String },

    /// PNG encoding failed
    #[error("PNG encoding failed: {message}")]
    Png { message: String },
}

impl RenderError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RenderError::DataTooLong { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RenderError::Png { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RenderError::DataTooLong { .. } => "QR_DATA_TOO_LONG",
            RenderError::Png { .. } => "PNG_ENCODING_FAILED",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" '{}'", f))
        .unwrap_or_default()
}
