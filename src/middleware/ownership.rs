//! Per-resource ownership gates.
//!
//! Each gate loads the addressed resource once, rejects with 404 when it is
//! absent and 401 when the caller does not own it, then lets the request
//! continue. The loaded row is discarded on purpose: the handler re-reads
//! what it needs, so the gate stays a pure existence-and-ownership check.

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
    Extension,
};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn photo_ownership_gate(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<String>,
    Extension(identity): Extension<Identity>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let photo = state.photos.fetch_by_id(&photo_id).await?;

    if photo.owner_id != identity.subject_id {
        return Err(ApiError::unauthorized(
            "you don't have permission to view or edit this photo",
        ));
    }

    Ok(next.run(request).await)
}

pub async fn comment_ownership_gate(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
    Extension(identity): Extension<Identity>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let comment = state.comments.fetch_by_id(&comment_id).await?;

    if comment.owner_id != identity.subject_id {
        return Err(ApiError::unauthorized(
            "you don't have permission to view or edit this comment",
        ));
    }

    Ok(next.run(request).await)
}

pub async fn social_media_ownership_gate(
    State(state): State<Arc<AppState>>,
    Path(social_media_id): Path<String>,
    Extension(identity): Extension<Identity>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let social_media = state.social_media.fetch_by_id(&social_media_id).await?;

    if social_media.owner_id != identity.subject_id {
        return Err(ApiError::unauthorized(
            "you don't have permission to view or edit this social media",
        ));
    }

    Ok(next.run(request).await)
}
