//! HTTP handlers, one module per resource.
//!
//! Handlers stay thin: deserialize the body, call the matching service,
//! wrap the outcome in the response envelope. Validation and user-facing
//! error messages live in the service layer.

pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

use axum::extract::rejection::JsonRejection;

use crate::error::ApiError;

/// Malformed or missing JSON bodies surface as a 400 with axum's own
/// description of what went wrong.
pub(crate) fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}
