/// Post repository
use crate::models::{Post, PostWithAuthor};
use sqlx::PgPool;
use uuid::Uuid;

const POST_WITH_AUTHOR_COLUMNS: &str = r#"
    p.id, u.username AS author_username, p.group_id, p.text, p.image_url,
    p.created_at, p.updated_at
"#;

/// List posts, newest first, optionally filtered by group and a
/// case-insensitive text search.
pub async fn list_posts(
    pool: &PgPool,
    group_id: Option<Uuid>,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {POST_WITH_AUTHOR_COLUMNS}
        FROM posts p
        JOIN users u ON p.author_id = u.id
        WHERE ($1::uuid IS NULL OR p.group_id = $1)
          AND ($2::text IS NULL OR p.text ILIKE '%' || $2 || '%')
        ORDER BY p.created_at DESC
        LIMIT $3 OFFSET $4
        "#
    );

    sqlx::query_as::<_, PostWithAuthor>(&sql)
        .bind(group_id)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

/// Get a post row by ID (no join; used for ownership checks)
pub async fn get_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_url, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Get a post joined with its author's username
pub async fn get_post_with_author(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Option<PostWithAuthor>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {POST_WITH_AUTHOR_COLUMNS}
        FROM posts p
        JOIN users u ON p.author_id = u.id
        WHERE p.id = $1
        "#
    );

    sqlx::query_as::<_, PostWithAuthor>(&sql)
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// Create a new post, stamped with the requesting user as author
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    group_id: Option<Uuid>,
    text: &str,
    image_url: Option<&str>,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, author_id, group_id, text, image_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
        RETURNING id, author_id, group_id, text, image_url, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(author_id)
    .bind(group_id)
    .bind(text)
    .bind(image_url)
    .fetch_one(pool)
    .await
}

/// Update post fields; absent fields keep their current value
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    text: Option<&str>,
    group_id: Option<Uuid>,
    image_url: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET text = COALESCE($1, text),
            group_id = COALESCE($2, group_id),
            image_url = COALESCE($3, image_url),
            updated_at = NOW()
        WHERE id = $4
        "#,
    )
    .bind(text)
    .bind(group_id)
    .bind(image_url)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a post (comments cascade at the schema level)
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Check whether a post exists
pub async fn post_exists(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
        .bind(post_id)
        .fetch_one(pool)
        .await
}
