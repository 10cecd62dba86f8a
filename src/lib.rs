//! Blog Service Library
//!
//! A social-blogging HTTP API: users publish posts, group them by
//! categories, comment on posts, and follow other users.
//!
//! # Modules
//!
//! - `handlers`: HTTP request handlers
//! - `models`: Data structures for users, posts, comments, groups, follows
//! - `db`: Database access layer and repositories
//! - `middleware`: Authentication and permission checks
//! - `security`: Password hashing and JWT handling
//! - `error`: Error types and handling
//! - `config`: Configuration management

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;

pub use config::Config;
pub use error::{AppError, Result};
