use crate::database::models::{
    CreateSocialMediaInput, CreatedSocialMedia, SocialMediaWithUser, UpdateSocialMediaInput,
    UpdatedSocialMedia,
};
use crate::database::repositories::{NewSocialMedia, RepositoryError, SocialMediaRepository};
use crate::error::ApiError;

pub struct SocialMediaService<R> {
    repository: R,
}

impl<R> SocialMediaService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: SocialMediaRepository> SocialMediaService<R> {
    pub async fn fetch_all_by_user(
        &self,
        owner_id: &str,
    ) -> Result<Vec<SocialMediaWithUser>, ApiError> {
        Ok(self.repository.find_all_by_user(owner_id).await?)
    }

    pub async fn fetch_by_id(&self, id: &str) -> Result<SocialMediaWithUser, ApiError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| not_found_by_id(err, id))
    }

    /// Stamp the owner from the authenticated identity and insert.
    pub async fn save(
        &self,
        owner_id: &str,
        input: CreateSocialMediaInput,
    ) -> Result<CreatedSocialMedia, ApiError> {
        input.validate().map_err(ApiError::Validation)?;

        let social_media = self
            .repository
            .save(NewSocialMedia {
                name: input.name,
                social_media_url: input.social_media_url,
                owner_id: owner_id.to_string(),
            })
            .await?;

        Ok(CreatedSocialMedia::from(social_media))
    }

    pub async fn update(
        &self,
        id: &str,
        input: UpdateSocialMediaInput,
    ) -> Result<UpdatedSocialMedia, ApiError> {
        let social_media = self
            .repository
            .update(id, input.normalized())
            .await
            .map_err(|err| not_found_by_id(err, id))?;

        Ok(UpdatedSocialMedia::from(social_media))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.repository
            .delete_by_id(id)
            .await
            .map_err(|err| not_found_by_id(err, id))
    }
}

fn not_found_by_id(err: RepositoryError, id: &str) -> ApiError {
    match err {
        RepositoryError::NotFound => {
            ApiError::not_found(format!("social media with id {id} doesn't exist"))
        }
        other => other.into(),
    }
}
