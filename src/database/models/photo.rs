use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use super::FieldViolation;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Photo row joined with its owning user, as returned by list/show reads.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoWithUser {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: PhotoUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhotoUser {
    pub email: String,
    pub username: String,
}

impl FromRow<'_, PgRow> for PhotoWithUser {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            caption: row.try_get("caption")?,
            photo_url: row.try_get("photo_url")?,
            owner_id: row.try_get("owner_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            user: PhotoUser {
                email: row.try_get("user_email")?,
                username: row.try_get("user_username")?,
            },
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhotoInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub photo_url: String,
}

impl CreatePhotoInput {
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.title.is_empty() {
            violations.push(FieldViolation::new("title", "title is required"));
        }
        if self.photo_url.is_empty() {
            violations.push(FieldViolation::new("photo_url", "photo_url is required"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePhotoInput {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub photo_url: Option<String>,
}

impl UpdatePhotoInput {
    /// Empty strings mean "keep the stored value", the same as absent fields.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.filter(|v| !v.is_empty());
        self.caption = self.caption.filter(|v| !v.is_empty());
        self.photo_url = self.photo_url.filter(|v| !v.is_empty());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedPhoto {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Photo> for CreatedPhoto {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            photo_url: photo.photo_url,
            owner_id: photo.owner_id,
            created_at: photo.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatedPhoto {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub photo_url: String,
    pub caption: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Photo> for UpdatedPhoto {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            owner_id: photo.owner_id,
            title: photo.title,
            photo_url: photo.photo_url,
            caption: photo.caption,
            updated_at: photo.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_valid() {
        let input = CreatePhotoInput {
            title: "sunset".to_string(),
            caption: String::new(),
            photo_url: "https://example.com/sunset.jpg".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_input_missing_fields() {
        let input = CreatePhotoInput {
            title: String::new(),
            caption: "still here".to_string(),
            photo_url: String::new(),
        };

        let violations = input.validate().unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "photo_url"]);
    }

    #[test]
    fn test_update_input_normalizes_empty_strings() {
        let input = UpdatePhotoInput {
            title: Some(String::new()),
            caption: None,
            photo_url: Some("https://example.com/new.jpg".to_string()),
        };

        let normalized = input.normalized();
        assert!(normalized.title.is_none());
        assert!(normalized.caption.is_none());
        assert_eq!(
            normalized.photo_url.as_deref(),
            Some("https://example.com/new.jpg")
        );
    }
}
