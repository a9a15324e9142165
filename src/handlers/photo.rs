use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};

use super::bad_body;
use crate::auth::Identity;
use crate::database::models::{
    CreatePhotoInput, CreatedPhoto, PhotoWithUser, UpdatePhotoInput, UpdatedPhoto,
};
use crate::middleware::response::{ApiMessage, ApiResponse, ApiResult, MessageResult};
use crate::state::AppState;

/// GET /api/v1/photo - every photo on the platform, with uploader details.
pub async fn index(State(state): State<Arc<AppState>>) -> ApiResult<Vec<PhotoWithUser>> {
    let photos = state.photos.fetch_all().await?;
    Ok(ApiResponse::success(photos))
}

/// GET /api/v1/photo/:photo_id
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<String>,
) -> ApiResult<PhotoWithUser> {
    let photo = state.photos.fetch_by_id(&photo_id).await?;
    Ok(ApiResponse::success(photo))
}

/// POST /api/v1/photo
pub async fn store(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<CreatePhotoInput>, JsonRejection>,
) -> ApiResult<CreatedPhoto> {
    let Json(input) = payload.map_err(bad_body)?;

    let created = state.photos.save(&identity.subject_id, input).await?;
    Ok(ApiResponse::created(created))
}

/// PUT /api/v1/photo/:photo_id - ownership is enforced by the route gate.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<String>,
    payload: Result<Json<UpdatePhotoInput>, JsonRejection>,
) -> ApiResult<UpdatedPhoto> {
    let Json(input) = payload.map_err(bad_body)?;

    let updated = state.photos.update(&photo_id, input).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/v1/photo/:photo_id - ownership is enforced by the route gate.
pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<String>,
) -> MessageResult {
    state.photos.delete(&photo_id).await?;
    Ok(ApiMessage::new("your photo has been successfully deleted"))
}
