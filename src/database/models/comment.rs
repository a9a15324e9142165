use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use super::user::UserSummary;
use super::FieldViolation;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: String,
    pub message: String,
    pub owner_id: String,
    pub photo_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment row joined with its owning user and the commented photo.
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithRelations {
    pub id: String,
    pub message: String,
    pub owner_id: String,
    pub photo_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserSummary,
    pub photo: PhotoSummary,
}

/// Commented-photo summary embedded in hydrated comment reads.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoSummary {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub owner_id: String,
}

impl FromRow<'_, PgRow> for CommentWithRelations {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        // c.photo_id equals p.id under the join, so one column serves both.
        let photo_id: String = row.try_get("photo_id")?;

        Ok(Self {
            id: row.try_get("id")?,
            message: row.try_get("message")?,
            owner_id: row.try_get("owner_id")?,
            photo_id: photo_id.clone(),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            user: UserSummary {
                id: row.try_get("user_id")?,
                username: row.try_get("user_username")?,
                email: row.try_get("user_email")?,
            },
            photo: PhotoSummary {
                id: photo_id,
                title: row.try_get("photo_title")?,
                caption: row.try_get("photo_caption")?,
                photo_url: row.try_get("photo_url")?,
                owner_id: row.try_get("photo_owner_id")?,
            },
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentInput {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub photo_id: String,
}

impl CreateCommentInput {
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.message.is_empty() {
            violations.push(FieldViolation::new("message", "message is required"));
        }
        if self.photo_id.is_empty() {
            violations.push(FieldViolation::new("photo_id", "photo_id is required"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCommentInput {
    pub message: Option<String>,
}

impl UpdateCommentInput {
    /// Empty strings mean "keep the stored value", the same as absent fields.
    pub fn normalized(mut self) -> Self {
        self.message = self.message.filter(|v| !v.is_empty());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedComment {
    pub id: String,
    pub message: String,
    pub owner_id: String,
    pub photo_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithRelations> for CreatedComment {
    fn from(comment: CommentWithRelations) -> Self {
        Self {
            id: comment.id,
            message: comment.message,
            owner_id: comment.owner_id,
            photo_id: comment.photo_id,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatedComment {
    pub id: String,
    pub message: String,
    pub owner_id: String,
    pub photo_id: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for UpdatedComment {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            message: comment.message,
            owner_id: comment.owner_id,
            photo_id: comment.photo_id,
            updated_at: comment.updated_at,
        }
    }
}
