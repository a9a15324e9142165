use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};

use super::bad_body;
use crate::auth::Identity;
use crate::database::models::{
    CreateSocialMediaInput, CreatedSocialMedia, SocialMediaWithUser, UpdateSocialMediaInput,
    UpdatedSocialMedia,
};
use crate::middleware::response::{ApiMessage, ApiResponse, ApiResult, MessageResult};
use crate::state::AppState;

/// GET /api/v1/socialmedia - the caller's own social media links.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<SocialMediaWithUser>> {
    let links = state
        .social_media
        .fetch_all_by_user(&identity.subject_id)
        .await?;
    Ok(ApiResponse::success(links))
}

/// GET /api/v1/socialmedia/:social_media_id
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(social_media_id): Path<String>,
) -> ApiResult<SocialMediaWithUser> {
    let link = state.social_media.fetch_by_id(&social_media_id).await?;
    Ok(ApiResponse::success(link))
}

/// POST /api/v1/socialmedia
pub async fn store(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<CreateSocialMediaInput>, JsonRejection>,
) -> ApiResult<CreatedSocialMedia> {
    let Json(input) = payload.map_err(bad_body)?;

    let created = state
        .social_media
        .save(&identity.subject_id, input)
        .await?;
    Ok(ApiResponse::created(created))
}

/// PUT /api/v1/socialmedia/:social_media_id - ownership is enforced by the route gate.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(social_media_id): Path<String>,
    payload: Result<Json<UpdateSocialMediaInput>, JsonRejection>,
) -> ApiResult<UpdatedSocialMedia> {
    let Json(input) = payload.map_err(bad_body)?;

    let updated = state
        .social_media
        .update(&social_media_id, input)
        .await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/v1/socialmedia/:social_media_id - ownership is enforced by the route gate.
pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(social_media_id): Path<String>,
) -> MessageResult {
    state.social_media.delete(&social_media_id).await?;
    Ok(ApiMessage::new(
        "your social media has been successfully deleted",
    ))
}
