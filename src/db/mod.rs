/// Database access layer. Each repository holds the SQL for one entity;
/// handlers never build queries themselves.
pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod user_repo;

/// True when the error is a Postgres unique constraint violation (23505).
/// Used to translate insert races into client-facing conflict errors.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
