pub mod jwt_auth;
pub mod permissions;

pub use jwt_auth::{JwtAuthMiddleware, UserId};
