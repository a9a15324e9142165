pub mod comment_service;
pub mod photo_service;
pub mod social_media_service;
pub mod user_service;

pub use comment_service::CommentService;
pub use photo_service::PhotoService;
pub use social_media_service::SocialMediaService;
pub use user_service::UserService;
