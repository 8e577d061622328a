//! Error types for logslice
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error variants for the task lifecycle
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use crate::types::TaskId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for logslice operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for logslice
///
/// Errors raised during a synchronous call (submit, status lookup, fetch)
/// propagate to the caller directly. Errors raised inside a background
/// worker are never surfaced as errors to any caller; they are recorded on
/// the task record as a FAILED terminal state instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller supplied malformed or missing input
    #[error("validation error: {0}")]
    Validation(String),

    /// No task exists with the given id
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    /// The shared source log file does not exist
    #[error("source log file not found: {path}")]
    SourceLogMissing {
        /// The path where the source log was expected
        path: PathBuf,
    },

    /// The task exists but has not reached a terminal state yet
    #[error("task {0} is not ready: extraction still in progress")]
    TaskNotReady(TaskId),

    /// The task ran and failed; the stored message describes why
    #[error("task {id} failed: {message}")]
    TaskFailed {
        /// The failed task id
        id: TaskId,
        /// The failure message recorded on the task
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Internal invariant violation (duplicate id, double transition)
    #[error("internal error: {0}")]
    Internal(String),
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
/// It follows a standard format with machine-readable error codes,
/// human-readable messages, and optional contextual details.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "task_not_found",
///     "message": "task 123 not found",
///     "details": {
///       "task_id": 123
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "task_not_found", "validation_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
///
/// This trait maps domain errors to appropriate HTTP status codes.
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Validation(_) => 400,

            // 404 Not Found
            Error::TaskNotFound(_) => 404,
            Error::SourceLogMissing { .. } => 404,

            // 409 Conflict - the task is not in a fetchable state
            Error::TaskNotReady(_) => 409,
            Error::TaskFailed { .. } => 409,

            // 500 Internal Server Error - Server-side issues
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::TaskNotFound(_) => "task_not_found",
            Error::SourceLogMissing { .. } => "source_log_missing",
            Error::TaskNotReady(_) => "task_not_ready",
            Error::TaskFailed { .. } => "task_failed",
            Error::Io(_) => "io_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Internal(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        // Add contextual details for specific error types
        let details = match &error {
            Error::TaskNotFound(id) => Some(serde_json::json!({
                "task_id": id,
            })),
            Error::TaskNotReady(id) => Some(serde_json::json!({
                "task_id": id,
            })),
            Error::TaskFailed { id, message } => Some(serde_json::json!({
                "task_id": id,
                "task_error": message,
            })),
            Error::SourceLogMissing { path } => Some(serde_json::json!({
                "path": path,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
