/// HTTP request handlers
pub mod auth;
pub mod comments;
pub mod follows;
pub mod groups;
pub mod health;
pub mod posts;

pub use auth::{login, refresh_token, register};
pub use comments::{create_comment, delete_comment, get_comment, list_comments, update_comment};
pub use follows::{create_follow, list_follows};
pub use groups::{create_group, list_groups};
pub use health::{health, readiness};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};
