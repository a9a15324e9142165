use crate::database::models::{
    CreatePhotoInput, CreatedPhoto, PhotoWithUser, UpdatePhotoInput, UpdatedPhoto,
};
use crate::database::repositories::{NewPhoto, PhotoRepository, RepositoryError};
use crate::error::ApiError;

pub struct PhotoService<R> {
    repository: R,
}

impl<R> PhotoService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: PhotoRepository> PhotoService<R> {
    pub async fn fetch_all(&self) -> Result<Vec<PhotoWithUser>, ApiError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn fetch_by_id(&self, id: &str) -> Result<PhotoWithUser, ApiError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| not_found_by_id(err, id))
    }

    /// Stamp the owner from the authenticated identity and insert.
    pub async fn save(
        &self,
        owner_id: &str,
        input: CreatePhotoInput,
    ) -> Result<CreatedPhoto, ApiError> {
        input.validate().map_err(ApiError::Validation)?;

        let photo = self
            .repository
            .save(NewPhoto {
                title: input.title,
                caption: input.caption,
                photo_url: input.photo_url,
                owner_id: owner_id.to_string(),
            })
            .await?;

        Ok(CreatedPhoto::from(photo))
    }

    pub async fn update(
        &self,
        id: &str,
        input: UpdatePhotoInput,
    ) -> Result<UpdatedPhoto, ApiError> {
        let photo = self
            .repository
            .update(id, input.normalized())
            .await
            .map_err(|err| not_found_by_id(err, id))?;

        Ok(UpdatedPhoto::from(photo))
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
            ApiError::not_found(format!("photo with id {id} doesn't exist"))
        }
        other => other.into(),
    }
}
