use async_trait::async_trait;
use sqlx::PgPool;

use super::{bounded, new_id, RepositoryError};
use crate::database::models::{SocialMedia, SocialMediaWithUser, UpdateSocialMediaInput};

/// Write shape for a new social-media link. The repository stamps the id.
#[derive(Debug, Clone)]
pub struct NewSocialMedia {
    pub name: String,
    pub social_media_url: String,
    pub owner_id: String,
}

#[async_trait]
pub trait SocialMediaRepository: Send + Sync {
    async fn find_all_by_user(
        &self,
        owner_id: &str,
    ) -> Result<Vec<SocialMediaWithUser>, RepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<SocialMediaWithUser, RepositoryError>;
    async fn save(&self, social_media: NewSocialMedia) -> Result<SocialMedia, RepositoryError>;
    async fn update(
        &self,
        id: &str,
        changes: UpdateSocialMediaInput,
    ) -> Result<SocialMedia, RepositoryError>;
    async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError>;
}

#[derive(Clone)]
pub struct PgSocialMediaRepository {
    pool: PgPool,
}

impl PgSocialMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialMediaRepository for PgSocialMediaRepository {
    async fn find_all_by_user(
        &self,
        owner_id: &str,
    ) -> Result<Vec<SocialMediaWithUser>, RepositoryError> {
        bounded(async {
            let rows = sqlx::query_as::<_, SocialMediaWithUser>(
                r#"
                SELECT s.id, s.name, s.social_media_url, s.owner_id,
                       s.created_at, s.updated_at,
                       u.id AS user_id, u.username AS user_username, u.email AS user_email
                FROM social_media s
                JOIN users u ON u.id = s.owner_id
                WHERE s.owner_id = $1
                ORDER BY s.created_at
                "#,
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

            Ok(rows)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<SocialMediaWithUser, RepositoryError> {
        bounded(async {
            sqlx::query_as::<_, SocialMediaWithUser>(
                r#"
                SELECT s.id, s.name, s.social_media_url, s.owner_id,
                       s.created_at, s.updated_at,
                       u.id AS user_id, u.username AS user_username, u.email AS user_email
                FROM social_media s
                JOIN users u ON u.id = s.owner_id
                WHERE s.id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
        })
        .await
    }

    async fn save(&self, social_media: NewSocialMedia) -> Result<SocialMedia, RepositoryError> {
        bounded(async {
            let id = new_id("socialmedia");

            let row = sqlx::query_as::<_, SocialMedia>(
                r#"
                INSERT INTO social_media (id, name, social_media_url, owner_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, name, social_media_url, owner_id, created_at, updated_at
                "#,
            )
            .bind(&id)
            .bind(&social_media.name)
            .bind(&social_media.social_media_url)
            .bind(&social_media.owner_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(row)
        })
        .await
    }

    async fn update(
        &self,
        id: &str,
        changes: UpdateSocialMediaInput,
    ) -> Result<SocialMedia, RepositoryError> {
        bounded(async {
            sqlx::query_as::<_, SocialMedia>(
                r#"
                UPDATE social_media
                SET name = COALESCE($2, name),
                    social_media_url = COALESCE($3, social_media_url),
                    updated_at = now()
                WHERE id = $1
                RETURNING id, name, social_media_url, owner_id, created_at, updated_at
                "#,
            )
            .bind(id)
            .bind(changes.name)
            .bind(changes.social_media_url)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError> {
        bounded(async {
            let deleted = sqlx::query("DELETE FROM social_media WHERE id = $1 RETURNING id")
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
