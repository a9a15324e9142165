// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::models::FieldViolation;
use crate::database::repositories::{ConflictField, RepositoryError};

/// HTTP API error with the response envelope used by every failure path:
/// `{"status": "fail" | "unauthenticated" | "unauthorized", "message": ...}`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    Validation(Vec<FieldViolation>),
    Timeout,

    // 401 with status "unauthenticated" (missing/invalid credential)
    Unauthenticated(String),

    // 401 with status "unauthorized" (valid identity, wrong owner).
    // Kept at 401 rather than 403 to match the published API contract.
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (unique constraint)
    Conflict(Option<ConflictField>),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    /// The `status` discriminator of the failure envelope.
    pub fn status_label(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "unauthenticated",
            ApiError::Unauthorized(_) => "unauthorized",
            _ => "fail",
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Validation(violations) => violations
                .iter()
                .map(|v| v.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            ApiError::Timeout => "operation timed out".to_string(),
            ApiError::Unauthenticated(msg) => msg.clone(),
            ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::Conflict(Some(ConflictField::Email)) => {
                "the email you entered has been used".to_string()
            }
            ApiError::Conflict(Some(ConflictField::Username)) => {
                "the username you entered has been used".to_string()
            }
            ApiError::Conflict(None) => "the value you entered has been used".to_string(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "status": self.status_label(),
            "message": self.message(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

// Convert other error types to ApiError
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        tracing::debug!("authentication rejected: {}", err);
        ApiError::unauthenticated("sign in to proceed")
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::not_found("record not found"),
            RepositoryError::Conflict(field) => ApiError::Conflict(field),
            RepositoryError::Timeout => {
                tracing::warn!("repository call exceeded its timeout");
                ApiError::Timeout
            }
            RepositoryError::Database(sqlx_err) => {
                // Surfaced to the client as a plain 400 failure
                tracing::error!("database error: {}", sqlx_err);
                ApiError::bad_request(sqlx_err.to_string())
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
