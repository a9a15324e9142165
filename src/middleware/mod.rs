pub mod auth;
pub mod ownership;
pub mod response;

pub use auth::authentication_gate;
pub use ownership::{comment_ownership_gate, photo_ownership_gate, social_media_ownership_gate};
pub use response::{ApiMessage, ApiResponse, ApiResult, MessageResult};
