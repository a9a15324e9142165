use async_trait::async_trait;
use sqlx::PgPool;

use super::{bounded, new_id, RepositoryError};
use crate::database::models::{Photo, PhotoWithUser, UpdatePhotoInput};

/// Write shape for a new photo. The repository stamps the id.
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub owner_id: String,
}

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<PhotoWithUser>, RepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<PhotoWithUser, RepositoryError>;
    async fn save(&self, photo: NewPhoto) -> Result<Photo, RepositoryError>;
    async fn update(&self, id: &str, changes: UpdatePhotoInput) -> Result<Photo, RepositoryError>;
    async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError>;
}

#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn find_all(&self) -> Result<Vec<PhotoWithUser>, RepositoryError> {
        bounded(async {
            let photos = sqlx::query_as::<_, PhotoWithUser>(
                r#"
                SELECT p.id, p.title, p.caption, p.photo_url, p.owner_id,
                       p.created_at, p.updated_at,
                       u.email AS user_email, u.username AS user_username
                FROM photos p
                JOIN users u ON u.id = p.owner_id
                ORDER BY p.created_at
                "#,
            )
            .fetch_all(&self.pool)
            .await?;

            Ok(photos)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<PhotoWithUser, RepositoryError> {
        bounded(async {
            sqlx::query_as::<_, PhotoWithUser>(
                r#"
                SELECT p.id, p.title, p.caption, p.photo_url, p.owner_id,
                       p.created_at, p.updated_at,
                       u.email AS user_email, u.username AS user_username
                FROM photos p
                JOIN users u ON u.id = p.owner_id
                WHERE p.id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
        })
        .await
    }

    async fn save(&self, photo: NewPhoto) -> Result<Photo, RepositoryError> {
        bounded(async {
            let id = new_id("photo");

            let photo = sqlx::query_as::<_, Photo>(
                r#"
                INSERT INTO photos (id, title, caption, photo_url, owner_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, title, caption, photo_url, owner_id, created_at, updated_at
                "#,
            )
            .bind(&id)
            .bind(&photo.title)
            .bind(&photo.caption)
            .bind(&photo.photo_url)
            .bind(&photo.owner_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(photo)
        })
        .await
    }

    async fn update(&self, id: &str, changes: UpdatePhotoInput) -> Result<Photo, RepositoryError> {
        bounded(async {
            sqlx::query_as::<_, Photo>(
                r#"
                UPDATE photos
                SET title = COALESCE($2, title),
                    caption = COALESCE($3, caption),
                    photo_url = COALESCE($4, photo_url),
                    updated_at = now()
                WHERE id = $1
                RETURNING id, title, caption, photo_url, owner_id, created_at, updated_at
                "#,
            )
            .bind(id)
            .bind(changes.title)
            .bind(changes.caption)
            .bind(changes.photo_url)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError> {
        bounded(async {
            let deleted = sqlx::query("DELETE FROM photos WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

            if deleted.is_none() {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
        .await
    }
}
