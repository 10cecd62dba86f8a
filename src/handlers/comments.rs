/// Comment handlers. Every operation is scoped to a single parent post
/// resolved from the path; a missing post is a 404 before anything is
/// persisted.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::middleware::permissions::check_comment_ownership;
use crate::middleware::UserId;
use crate::models::Comment;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

async fn resolve_post(pool: &PgPool, post_id: Uuid) -> Result<()> {
    if !post_repo::post_exists(pool, post_id).await? {
        return Err(AppError::NotFound(format!("post {} not found", post_id)));
    }
    Ok(())
}

/// Fetch a comment and require that it belongs to the post in the path.
async fn resolve_comment(pool: &PgPool, post_id: Uuid, comment_id: Uuid) -> Result<Comment> {
    let comment = comment_repo::get_comment(pool, comment_id)
        .await?
        .filter(|c| c.post_id == post_id)
        .ok_or_else(|| AppError::NotFound(format!("comment {} not found", comment_id)))?;

    Ok(comment)
}

/// GET /api/v1/posts/{post_id}/comments
pub async fn list_comments(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    resolve_post(pool.get_ref(), post_id).await?;

    let comments = comment_repo::get_comments_by_post(pool.get_ref(), post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/v1/posts/{post_id}/comments
pub async fn create_comment(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let post_id = path.into_inner();
    resolve_post(pool.get_ref(), post_id).await?;

    let comment = comment_repo::create_comment(pool.get_ref(), post_id, user.0, &req.text).await?;

    tracing::debug!(comment_id = %comment.id, post_id = %post_id, "created comment");

    let response = comment_repo::get_comment_with_author(pool.get_ref(), comment.id)
        .await?
        .ok_or_else(|| AppError::Internal("comment vanished after insert".to_string()))?;

    Ok(HttpResponse::Created().json(response))
}

/// GET /api/v1/posts/{post_id}/comments/{id}
pub async fn get_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    resolve_comment(pool.get_ref(), post_id, comment_id).await?;

    let response = comment_repo::get_comment_with_author(pool.get_ref(), comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("comment {} not found", comment_id)))?;

    Ok(HttpResponse::Ok().json(response))
}

/// PUT/PATCH /api/v1/posts/{post_id}/comments/{id}
pub async fn update_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user: UserId,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let (post_id, comment_id) = path.into_inner();

    let comment = resolve_comment(pool.get_ref(), post_id, comment_id).await?;
    check_comment_ownership(user.0, &comment)?;

    comment_repo::update_comment(pool.get_ref(), comment_id, &req.text).await?;

    let response = comment_repo::get_comment_with_author(pool.get_ref(), comment_id)
        .await?
        .ok_or_else(|| AppError::Internal("comment vanished after update".to_string()))?;

    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/v1/posts/{post_id}/comments/{id}
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user: UserId,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let comment = resolve_comment(pool.get_ref(), post_id, comment_id).await?;
    check_comment_ownership(user.0, &comment)?;

    comment_repo::delete_comment(pool.get_ref(), comment_id).await?;

    tracing::debug!(comment_id = %comment_id, "deleted comment");

    Ok(HttpResponse::NoContent().finish())
}
