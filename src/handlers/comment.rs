use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};

use super::bad_body;
use crate::auth::Identity;
use crate::database::models::{
    CommentWithRelations, CreateCommentInput, CreatedComment, UpdateCommentInput, UpdatedComment,
};
use crate::middleware::response::{ApiMessage, ApiResponse, ApiResult, MessageResult};
use crate::state::AppState;

/// GET /api/v1/comment - the caller's own comments, hydrated with user and photo.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<CommentWithRelations>> {
    let comments = state.comments.fetch_all_by_user(&identity.subject_id).await?;
    Ok(ApiResponse::success(comments))
}

/// GET /api/v1/comment/:comment_id
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> ApiResult<CommentWithRelations> {
    let comment = state.comments.fetch_by_id(&comment_id).await?;
    Ok(ApiResponse::success(comment))
}

/// GET /api/v1/comment/photo/:photo_id - every comment left on one photo.
pub async fn by_photo(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<String>,
) -> ApiResult<Vec<CommentWithRelations>> {
    let comments = state.comments.fetch_all_by_photo(&photo_id).await?;
    Ok(ApiResponse::success(comments))
}

/// POST /api/v1/comment
pub async fn store(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<CreateCommentInput>, JsonRejection>,
) -> ApiResult<CreatedComment> {
    let Json(input) = payload.map_err(bad_body)?;

    let created = state.comments.save(&identity.subject_id, input).await?;
    Ok(ApiResponse::created(created))
}

/// PUT /api/v1/comment/:comment_id - ownership is enforced by the route gate.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
    payload: Result<Json<UpdateCommentInput>, JsonRejection>,
) -> ApiResult<UpdatedComment> {
    let Json(input) = payload.map_err(bad_body)?;

    let updated = state.comments.update(&comment_id, input).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/v1/comment/:comment_id - ownership is enforced by the route gate.
pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> MessageResult {
    state.comments.delete(&comment_id).await?;
    Ok(ApiMessage::new("your comment has been successfully deleted"))
}
