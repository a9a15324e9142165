use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use super::user::UserSummary;
use super::FieldViolation;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SocialMedia {
    pub id: String,
    pub name: String,
    pub social_media_url: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Social-media row joined with its owning user.
#[derive(Debug, Clone, Serialize)]
pub struct SocialMediaWithUser {
    pub id: String,
    pub name: String,
    pub social_media_url: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserSummary,
}

impl FromRow<'_, PgRow> for SocialMediaWithUser {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            social_media_url: row.try_get("social_media_url")?,
            owner_id: row.try_get("owner_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            user: UserSummary {
                id: row.try_get("user_id")?,
                username: row.try_get("user_username")?,
                email: row.try_get("user_email")?,
            },
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSocialMediaInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub social_media_url: String,
}

impl CreateSocialMediaInput {
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.name.is_empty() {
            violations.push(FieldViolation::new("name", "name is required"));
        }
        if self.social_media_url.is_empty() {
            violations.push(FieldViolation::new(
                "social_media_url",
                "social_media_url is required",
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSocialMediaInput {
    pub name: Option<String>,
    pub social_media_url: Option<String>,
}

impl UpdateSocialMediaInput {
    /// Empty strings mean "keep the stored value", the same as absent fields.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.filter(|v| !v.is_empty());
        self.social_media_url = self.social_media_url.filter(|v| !v.is_empty());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedSocialMedia {
    pub id: String,
    pub name: String,
    pub social_media_url: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<SocialMedia> for CreatedSocialMedia {
    fn from(social_media: SocialMedia) -> Self {
        Self {
            id: social_media.id,
            name: social_media.name,
            social_media_url: social_media.social_media_url,
            owner_id: social_media.owner_id,
            created_at: social_media.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatedSocialMedia {
    pub id: String,
    pub name: String,
    pub social_media_url: String,
    pub owner_id: String,
    pub updated_at: DateTime<Utc>,
}

impl From<SocialMedia> for UpdatedSocialMedia {
    fn from(social_media: SocialMedia) -> Self {
        Self {
            id: social_media.id,
            name: social_media.name,
            social_media_url: social_media.social_media_url,
            owner_id: social_media.owner_id,
            updated_at: social_media.updated_at,
        }
    }
}
