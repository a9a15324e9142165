pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

pub use pool::{connect, health_check};
pub use repositories::{ConflictField, RepositoryError};
