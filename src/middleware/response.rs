use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;

/// Success envelope: `{"status": "success", "data": ...}`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    data: T,
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with the success envelope.
    pub fn success(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
        }
    }

    /// 201 Created with the success envelope.
    pub fn created(data: T) -> Self {
        Self {
            data,
            status: StatusCode::CREATED,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "status": "fail",
                        "message": "failed to serialize response data"
                    })),
                )
                    .into_response();
            }
        };

        (self.status, Json(json!({ "status": "success", "data": data }))).into_response()
    }
}

/// Success envelope for operations that confirm with a message instead of
/// data: `{"status": "success", "message": ...}`.
#[derive(Debug)]
pub struct ApiMessage(String);

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl IntoResponse for ApiMessage {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            Json(json!({ "status": "success", "message": self.0 })),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;
pub type MessageResult = Result<ApiMessage, ApiError>;
