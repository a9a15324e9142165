use async_trait::async_trait;
use sqlx::PgPool;

use super::{bounded, classify_write_error, new_id, RepositoryError};
use crate::database::models::{UpdateUserInput, User};

/// Write shape for user registration. The repository stamps the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn register(&self, user: NewUser) -> Result<User, RepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<User, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    async fn update(&self, id: &str, changes: UpdateUserInput) -> Result<User, RepositoryError>;

    /// Removes the user and their social-media rows as one atomic unit.
    async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn register(&self, user: NewUser) -> Result<User, RepositoryError> {
        bounded(async {
            let id = new_id("user");

            sqlx::query_as::<_, User>(
                r#"
                INSERT INTO users (id, username, email, password_hash, age)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, username, email, password_hash, age, created_at, updated_at
                "#,
            )
            .bind(&id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.age)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_write_error)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<User, RepositoryError> {
        bounded(async {
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, username, email, password_hash, age, created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        bounded(async {
            let user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, username, email, password_hash, age, created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

            Ok(user)
        })
        .await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        bounded(async {
            let user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, username, email, password_hash, age, created_at, updated_at
                FROM users
                WHERE username = $1
                "#,
            )
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

            Ok(user)
        })
        .await
    }

    async fn update(&self, id: &str, changes: UpdateUserInput) -> Result<User, RepositoryError> {
        bounded(async {
            sqlx::query_as::<_, User>(
                r#"
                UPDATE users
                SET username = COALESCE($2, username),
                    email = COALESCE($3, email),
                    age = COALESCE($4, age),
                    updated_at = now()
                WHERE id = $1
                RETURNING id, username, email, password_hash, age, created_at, updated_at
                "#,
            )
            .bind(id)
            .bind(changes.username)
            .bind(changes.email)
            .bind(changes.age)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_write_error)?
            .ok_or(RepositoryError::NotFound)
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError> {
        bounded(async {
            let mut tx = self.pool.begin().await?;

            sqlx::query("DELETE FROM social_media WHERE owner_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            let deleted = sqlx::query("DELETE FROM users WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

            // Dropping the open transaction rolls back the social-media deletes.
            if deleted.is_none() {
                return Err(RepositoryError::NotFound);
            }

            tx.commit().await?;
            Ok(())
        })
        .await
    }
}
