use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};

use super::bad_body;
use crate::auth::Identity;
use crate::database::models::{
    LoggedInUser, LoginInput, RegisterUserInput, RegisteredUser, UpdateUserInput, UpdatedUser,
};
use crate::middleware::response::{ApiMessage, ApiResponse, ApiResult, MessageResult};
use crate::state::AppState;

/// POST /api/v1/user/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterUserInput>, JsonRejection>,
) -> ApiResult<RegisteredUser> {
    let Json(input) = payload.map_err(bad_body)?;

    let registered = state.users.register(input).await?;
    Ok(ApiResponse::created(registered))
}

/// POST /api/v1/user/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> ApiResult<LoggedInUser> {
    let Json(input) = payload.map_err(bad_body)?;

    let logged_in = state.users.login(input).await?;
    Ok(ApiResponse::success(logged_in))
}

/// PUT /api/v1/user - the authenticated identity is the target row.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<UpdateUserInput>, JsonRejection>,
) -> ApiResult<UpdatedUser> {
    let Json(input) = payload.map_err(bad_body)?;

    let updated = state.users.update(&identity.subject_id, input).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/v1/user - removes the caller's account.
pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> MessageResult {
    state.users.delete(&identity.subject_id).await?;
    Ok(ApiMessage::new("your account has been successfully deleted"))
}
