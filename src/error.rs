//! Application error type and its HTTP mapping.
//!
//! Every failure reaching the HTTP boundary is an [`AppError`]. The response
//! body always has the shape:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Link not found", "details": {} } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::errors::{AllocationError, StoreError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad URL, malformed short code or unreadable request body.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// No free short code within the retry budget.
    #[error("failed to allocate a unique short code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    /// Storage fault. `detail` is logged, never sent to the client.
    #[error("storage backend error: {detail}")]
    Backend { detail: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn backend(detail: impl Into<String>) -> Self {
        Self::Backend {
            detail: detail.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AllocationExhausted { .. } | AppError::Backend { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into the client-facing payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::InvalidInput { message, details } => ErrorInfo {
                code: "invalid_input",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Conflict { message, details } => ErrorInfo {
                code: "conflict",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::AllocationExhausted { attempts } => ErrorInfo {
                code: "allocation_exhausted",
                message: "Could not allocate a short code".to_string(),
                details: json!({ "attempts": attempts }),
            },
            AppError::Backend { .. } => ErrorInfo {
                code: "internal_error",
                message: "Internal server error".to_string(),
                details: json!({}),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Backend { detail } => tracing::error!(%detail, "Storage backend failure"),
            AppError::AllocationExhausted { attempts } => {
                tracing::error!(attempts, "Short code allocation exhausted")
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateCode(code) => {
                AppError::conflict("Short code already exists", json!({ "shortCode": code }))
            }
            StoreError::NotFound(code) => {
                AppError::not_found("Link not found", json!({ "shortCode": code }))
            }
            StoreError::Backend(detail) => AppError::Backend { detail },
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::InvalidFormat(code) => AppError::bad_request(
                "Short code must contain only alphanumeric characters (max 20 chars)",
                json!({ "shortCode": code }),
            ),
            AllocationError::AlreadyExists(code) => {
                AppError::conflict("Short code already exists", json!({ "shortCode": code }))
            }
            AllocationError::Exhausted { attempts } => AppError::AllocationExhausted { attempts },
            AllocationError::Store(err) => err.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Validation failed".to_string());

        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));

        AppError::bad_request(message, details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
