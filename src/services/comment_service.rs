use crate::database::models::{
    CommentWithRelations, CreateCommentInput, CreatedComment, UpdateCommentInput, UpdatedComment,
};
use crate::database::repositories::{
    CommentRepository, NewComment, PhotoRepository, RepositoryError,
};
use crate::error::ApiError;

pub struct CommentService<C, P> {
    comments: C,
    photos: P,
}

impl<C, P> CommentService<C, P> {
    pub fn new(comments: C, photos: P) -> Self {
        Self { comments, photos }
    }
}

impl<C: CommentRepository, P: PhotoRepository> CommentService<C, P> {
    pub async fn fetch_all_by_user(
        &self,
        owner_id: &str,
    ) -> Result<Vec<CommentWithRelations>, ApiError> {
        Ok(self.comments.find_all_by_user(owner_id).await?)
    }

    pub async fn fetch_all_by_photo(
        &self,
        photo_id: &str,
    ) -> Result<Vec<CommentWithRelations>, ApiError> {
        Ok(self.comments.find_all_by_photo(photo_id).await?)
    }

    pub async fn fetch_by_id(&self, id: &str) -> Result<CommentWithRelations, ApiError> {
        self.comments
            .find_by_id(id)
            .await
            .map_err(|err| not_found_by_id(err, id))
    }

    /// Validate, confirm the commented photo exists, then insert.
    pub async fn save(
        &self,
        owner_id: &str,
        input: CreateCommentInput,
    ) -> Result<CreatedComment, ApiError> {
        input.validate().map_err(ApiError::Validation)?;

        self.photos
            .find_by_id(&input.photo_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => ApiError::not_found(format!(
                    "photo with id {} doesn't exist",
                    input.photo_id
                )),
                other => other.into(),
            })?;

        let comment = self
            .comments
            .save(NewComment {
                message: input.message,
                photo_id: input.photo_id,
                owner_id: owner_id.to_string(),
            })
            .await?;

        Ok(CreatedComment::from(comment))
    }

    pub async fn update(
        &self,
        id: &str,
        input: UpdateCommentInput,
    ) -> Result<UpdatedComment, ApiError> {
        let comment = self
            .comments
            .update(id, input.normalized())
            .await
            .map_err(|err| not_found_by_id(err, id))?;

        Ok(UpdatedComment::from(comment))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.comments
            .delete_by_id(id)
            .await
            .map_err(|err| not_found_by_id(err, id))
    }
}

fn not_found_by_id(err: RepositoryError, id: &str) -> ApiError {
    match err {
        RepositoryError::NotFound => {
            ApiError::not_found(format!("comment with id {id} doesn't exist"))
        }
        other => other.into(),
    }
}
