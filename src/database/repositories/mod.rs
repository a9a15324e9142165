use std::future::Future;

use nid::Nanoid;
use thiserror::Error;

use crate::config::config;

pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

pub use comment::{CommentRepository, NewComment, PgCommentRepository};
pub use photo::{NewPhoto, PgPhotoRepository, PhotoRepository};
pub use social_media::{NewSocialMedia, PgSocialMediaRepository, SocialMediaRepository};
pub use user::{NewUser, PgUserRepository, UserRepository};

/// Which unique constraint a conflicting write violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    Username,
}

/// Errors surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("unique constraint violated")]
    Conflict(Option<ConflictField>),

    #[error("storage call exceeded its time bound")]
    Timeout,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Generate an entity id of the form `<kind>-<16-char nanoid>`.
pub(crate) fn new_id(kind: &str) -> String {
    let suffix: Nanoid<16> = Nanoid::new();
    format!("{kind}-{suffix}")
}

/// Bound a storage operation by the configured per-call timeout.
pub(crate) async fn bounded<T, F>(operation: F) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    match tokio::time::timeout(config().query_timeout(), operation).await {
        Ok(result) => result,
        Err(_) => Err(RepositoryError::Timeout),
    }
}

/// Map a write error, turning unique violations into typed conflicts.
pub(crate) fn classify_write_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("idx_users_email") => Some(ConflictField::Email),
                Some("idx_users_username") => Some(ConflictField::Username),
                _ => None,
            };
            return RepositoryError::Conflict(field);
        }
    }
    RepositoryError::Database(err)
}
