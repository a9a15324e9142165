//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::database::repositories::{
    PgCommentRepository, PgPhotoRepository, PgSocialMediaRepository, PgUserRepository,
};
use crate::services::{CommentService, PhotoService, SocialMediaService, UserService};

pub struct AppState {
    pub pool: PgPool,
    pub users: UserService<PgUserRepository>,
    pub photos: PhotoService<PgPhotoRepository>,
    pub comments: CommentService<PgCommentRepository, PgPhotoRepository>,
    pub social_media: SocialMediaService<PgSocialMediaRepository>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self {
            users: UserService::new(PgUserRepository::new(pool.clone())),
            photos: PhotoService::new(PgPhotoRepository::new(pool.clone())),
            comments: CommentService::new(
                PgCommentRepository::new(pool.clone()),
                PgPhotoRepository::new(pool.clone()),
            ),
            social_media: SocialMediaService::new(PgSocialMediaRepository::new(pool.clone())),
            pool,
        })
    }
}
