use async_trait::async_trait;
use sqlx::PgPool;

use super::{bounded, new_id, RepositoryError};
use crate::database::models::{Comment, CommentWithRelations, UpdateCommentInput};

/// Write shape for a new comment. The repository stamps the id.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub message: String,
    pub photo_id: String,
    pub owner_id: String,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_all_by_user(
        &self,
        owner_id: &str,
    ) -> Result<Vec<CommentWithRelations>, RepositoryError>;
    async fn find_all_by_photo(
        &self,
        photo_id: &str,
    ) -> Result<Vec<CommentWithRelations>, RepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<CommentWithRelations, RepositoryError>;

    /// Inserts the row, then re-reads it with its user and photo joined so
    /// the caller gets the hydrated shape in one repository call.
    async fn save(&self, comment: NewComment) -> Result<CommentWithRelations, RepositoryError>;
    async fn update(
        &self,
        id: &str,
        changes: UpdateCommentInput,
    ) -> Result<Comment, RepositoryError>;
    async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError>;
}

const HYDRATED_SELECT: &str = r#"
SELECT c.id, c.message, c.owner_id, c.photo_id, c.created_at, c.updated_at,
       u.id AS user_id, u.username AS user_username, u.email AS user_email,
       p.title AS photo_title, p.caption AS photo_caption, p.photo_url,
       p.owner_id AS photo_owner_id
FROM comments c
JOIN users u ON u.id = c.owner_id
JOIN photos p ON p.id = c.photo_id
"#;

#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn find_all_by_user(
        &self,
        owner_id: &str,
    ) -> Result<Vec<CommentWithRelations>, RepositoryError> {
        bounded(async {
            let query = format!("{HYDRATED_SELECT} WHERE c.owner_id = $1 ORDER BY c.created_at");
            let comments = sqlx::query_as::<_, CommentWithRelations>(&query)
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;

            Ok(comments)
        })
        .await
    }

    async fn find_all_by_photo(
        &self,
        photo_id: &str,
    ) -> Result<Vec<CommentWithRelations>, RepositoryError> {
        bounded(async {
            let query = format!("{HYDRATED_SELECT} WHERE c.photo_id = $1 ORDER BY c.created_at");
            let comments = sqlx::query_as::<_, CommentWithRelations>(&query)
                .bind(photo_id)
                .fetch_all(&self.pool)
                .await?;

            Ok(comments)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<CommentWithRelations, RepositoryError> {
        bounded(async { self.fetch_hydrated(id).await }).await
    }

    async fn save(&self, comment: NewComment) -> Result<CommentWithRelations, RepositoryError> {
        bounded(async {
            let id = new_id("comment");

            sqlx::query(
                r#"
                INSERT INTO comments (id, message, owner_id, photo_id)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(&id)
            .bind(&comment.message)
            .bind(&comment.owner_id)
            .bind(&comment.photo_id)
            .execute(&self.pool)
            .await?;

            self.fetch_hydrated(&id).await
        })
        .await
    }

    async fn update(
        &self,
        id: &str,
        changes: UpdateCommentInput,
    ) -> Result<Comment, RepositoryError> {
        bounded(async {
            sqlx::query_as::<_, Comment>(
                r#"
                UPDATE comments
                SET message = COALESCE($2, message),
                    updated_at = now()
                WHERE id = $1
                RETURNING id, message, owner_id, photo_id, created_at, updated_at
                "#,
            )
            .bind(id)
            .bind(changes.message)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError> {
        bounded(async {
            let deleted = sqlx::query("DELETE FROM comments WHERE id = $1 RETURNING id")
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

impl PgCommentRepository {
    async fn fetch_hydrated(&self, id: &str) -> Result<CommentWithRelations, RepositoryError> {
        let query = format!("{HYDRATED_SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, CommentWithRelations>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}
