pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

pub use comment::{
    Comment, CommentWithRelations, CreateCommentInput, CreatedComment, PhotoSummary,
    UpdateCommentInput, UpdatedComment,
};
pub use photo::{
    CreatePhotoInput, CreatedPhoto, Photo, PhotoUser, PhotoWithUser, UpdatePhotoInput,
    UpdatedPhoto,
};
pub use social_media::{
    CreateSocialMediaInput, CreatedSocialMedia, SocialMedia, SocialMediaWithUser,
    UpdateSocialMediaInput, UpdatedSocialMedia,
};
pub use user::{
    LoggedInUser, LoginInput, RegisterUserInput, RegisteredUser, UpdateUserInput, UpdatedUser,
    User, UserSummary,
};

use serde::Serialize;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
