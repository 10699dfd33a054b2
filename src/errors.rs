//! Centralized error handling.
//!
//! Provides a unified error type for the entire application, with JSON
//! conversion for the API and an HTML error page for server-rendered routes.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::api::views;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{entity} not found with ID: {id}")]
    NotFoundEntity { entity: &'static str, id: String },

    #[error("{0} already exists")]
    Conflict(String),

    #[error("Operation failed due to related data constraints")]
    Integrity,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Uploads
    #[error("File is empty")]
    EmptyPayload,

    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("The uploaded file exceeds the maximum allowed size")]
    PayloadTooLarge,

    // External service errors
    #[error("Database error")]
    Database(sea_orm::DbErr),

    #[error("Session store error")]
    Cache(#[from] redis::RedisError),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound | AppError::NotFoundEntity { .. } => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Integrity => "DATA_INTEGRITY",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::EmptyPayload => "EMPTY_PAYLOAD",
            AppError::Upload(_) => "UPLOAD_ERROR",
            AppError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Cache(_) => "SESSION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound | AppError::NotFoundEntity { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Integrity => StatusCode::CONFLICT,
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::EmptyPayload
            | AppError::Upload(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short heading shown on the HTML error page
    fn title(&self) -> &'static str {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials => "Authentication Required",
            AppError::Forbidden => "Access Denied",
            AppError::NotFound | AppError::NotFoundEntity { .. } => "Not Found",
            AppError::Conflict(_) => "Conflict",
            AppError::Integrity => "Database Error",
            AppError::Validation(_) | AppError::BadRequest(_) => "Application Error",
            AppError::EmptyPayload | AppError::Upload(_) => "File Upload Error",
            AppError::PayloadTooLarge => "File Too Large",
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                "Unexpected Error"
            }
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Conflict(msg) => format!("{} already exists", msg),

            AppError::Upload(reason) => {
                tracing::warn!("Image upload failed: {}", reason);
                "There was a problem uploading your file. Please try again.".to_string()
            }

            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Cache(e) => {
                tracing::error!("Session store error: {:?}", e);
                "A session error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Render this error as the HTML error page used by server-rendered routes.
    pub fn into_page(self) -> Response {
        let status = self.status();
        let page = views::error_page(status.as_u16(), self.title(), &self.user_message());
        (status, Html(page)).into_response()
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(detail)) => {
                tracing::warn!("Foreign key violation: {}", detail);
                AppError::Integrity
            }
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::warn!("Unique constraint violation: {}", detail);
                AppError::conflict("Record")
            }
            _ => AppError::Database(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Error wrapper for server-rendered routes: renders the HTML error page
/// instead of the JSON body.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.0.into_page()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for page handlers
pub type PageResult<T> = Result<T, PageError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AppError::NotFoundEntity {
            entity,
            id: id.to_string(),
        }
    }
}
