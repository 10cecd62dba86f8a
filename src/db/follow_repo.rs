/// Follow repository (directed user -> following edges)
use crate::models::FollowEdge;
use sqlx::PgPool;
use uuid::Uuid;

/// List the edges pointing at `following_id` ("who follows me"),
/// optionally narrowed to one followed user id and a case-insensitive
/// username search over either endpoint.
pub async fn list_followers(
    pool: &PgPool,
    following_id: Uuid,
    following_filter: Option<Uuid>,
    search: Option<&str>,
) -> Result<Vec<FollowEdge>, sqlx::Error> {
    sqlx::query_as::<_, FollowEdge>(
        r#"
        SELECT uf.username AS user_username,
               ug.username AS following_username,
               f.created_at
        FROM follows f
        JOIN users uf ON f.user_id = uf.id
        JOIN users ug ON f.following_id = ug.id
        WHERE f.following_id = $1
          AND ($2::uuid IS NULL OR f.following_id = $2)
          AND ($3::text IS NULL
               OR uf.username ILIKE '%' || $3 || '%'
               OR ug.username ILIKE '%' || $3 || '%')
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(following_id)
    .bind(following_filter)
    .bind(search)
    .fetch_all(pool)
    .await
}

/// Insert a follow edge. Returns the joined edge when a new row was
/// created, or None when the (user, following) pair already exists.
/// The unique constraint makes this race-safe under concurrent requests.
pub async fn create_follow(
    pool: &PgPool,
    user_id: Uuid,
    following_id: Uuid,
) -> Result<Option<FollowEdge>, sqlx::Error> {
    let inserted = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO follows (id, user_id, following_id, created_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (user_id, following_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(following_id)
    .fetch_optional(pool)
    .await?;

    let Some(id) = inserted else {
        return Ok(None);
    };

    sqlx::query_as::<_, FollowEdge>(
        r#"
        SELECT uf.username AS user_username,
               ug.username AS following_username,
               f.created_at
        FROM follows f
        JOIN users uf ON f.user_id = uf.id
        JOIN users ug ON f.following_id = ug.id
        WHERE f.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
