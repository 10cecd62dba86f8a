/// Test fixtures and utilities for database-backed integration tests
/// Provides pool setup, test data creation, and scoped cleanup
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use blog_service::db::{group_repo, post_repo, user_repo};
use blog_service::models::{Group, Post, User};
use blog_service::security::hash_password;

// ============================================
// Database Setup
// ============================================

/// Connect to the database named by DATABASE_URL and run migrations.
/// Returns None when DATABASE_URL is not set so callers can skip
/// instead of failing on machines without Postgres.
pub async fn create_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

// ============================================
// Test Data Creation
// ============================================

fn unique_suffix() -> String {
    Uuid::new_v4().to_string().chars().take(8).collect()
}

/// Create a test user with a unique username and email
pub async fn create_test_user(pool: &PgPool) -> User {
    let username = format!("user_{}", unique_suffix());
    let email = format!("{}@example.com", username);
    let password_hash = hash_password("test password").expect("Failed to hash password");

    user_repo::create_user(pool, &username, &email, &password_hash)
        .await
        .expect("Failed to create test user")
}

/// Create a test group with a unique slug
pub async fn create_test_group(pool: &PgPool) -> Group {
    let suffix = unique_suffix();

    group_repo::create_group(
        pool,
        &format!("Group {}", suffix),
        &format!("group-{}", suffix),
        None,
    )
    .await
    .expect("Failed to create test group")
}

/// Create a test post, optionally placed in a group
pub async fn create_test_post(
    pool: &PgPool,
    author_id: Uuid,
    group_id: Option<Uuid>,
    text: &str,
) -> Post {
    post_repo::create_post(pool, author_id, group_id, text, None)
        .await
        .expect("Failed to create test post")
}

// ============================================
// Cleanup
// ============================================

/// Delete the users a test created. Their posts, comments, and follow
/// edges cascade at the schema level. Scoped by id so parallel tests
/// never delete each other's rows.
pub async fn cleanup_users(pool: &PgPool, user_ids: &[Uuid]) {
    for user_id in user_ids {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(pool)
            .await
            .ok();
    }
}

/// Delete the groups a test created. Call after `cleanup_users` so no
/// posts still reference them.
pub async fn cleanup_groups(pool: &PgPool, group_ids: &[Uuid]) {
    for group_id in group_ids {
        sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(group_id)
            .execute(pool)
            .await
            .ok();
    }
}
