/// Group repository
use crate::models::Group;
use sqlx::PgPool;
use uuid::Uuid;

/// List all groups, newest first
pub async fn list_groups(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description, created_at
        FROM groups
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Create a new group. A duplicate slug surfaces as a unique violation.
pub async fn create_group(
    pool: &PgPool,
    title: &str,
    slug: &str,
    description: Option<&str>,
) -> Result<Group, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (id, title, slug, description, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        RETURNING id, title, slug, description, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(slug)
    .bind(description)
    .fetch_one(pool)
    .await
}

/// Check whether a group exists
pub async fn group_exists(pool: &PgPool, group_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM groups WHERE id = $1)")
        .bind(group_id)
        .fetch_one(pool)
        .await
}
