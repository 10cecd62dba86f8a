/// Comment repository
use crate::models::{Comment, CommentWithAuthor};
use sqlx::PgPool;
use uuid::Uuid;

const COMMENT_WITH_AUTHOR_COLUMNS: &str = r#"
    c.id, c.post_id, u.username AS author_username, c.text,
    c.created_at, c.updated_at
"#;

/// Get all comments for a post, oldest first
pub async fn get_comments_by_post(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {COMMENT_WITH_AUTHOR_COLUMNS}
        FROM comments c
        JOIN users u ON c.author_id = u.id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC
        "#
    );

    sqlx::query_as::<_, CommentWithAuthor>(&sql)
        .bind(post_id)
        .fetch_all(pool)
        .await
}

/// Get a single comment row by ID (no join; used for ownership checks)
pub async fn get_comment(pool: &PgPool, comment_id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, author_id, text, created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

/// Get a comment joined with its author's username
pub async fn get_comment_with_author(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<CommentWithAuthor>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {COMMENT_WITH_AUTHOR_COLUMNS}
        FROM comments c
        JOIN users u ON c.author_id = u.id
        WHERE c.id = $1
        "#
    );

    sqlx::query_as::<_, CommentWithAuthor>(&sql)
        .bind(comment_id)
        .fetch_optional(pool)
        .await
}

/// Create a new comment on a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, post_id, author_id, text, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING id, post_id, author_id, text, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .fetch_one(pool)
    .await
}

/// Update comment text
pub async fn update_comment(
    pool: &PgPool,
    comment_id: Uuid,
    text: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE comments
        SET text = $1, updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(text)
    .bind(comment_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a comment
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(())
}
