use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::{group_repo, post_repo};
use crate::error::{AppError, Result};
use crate::middleware::permissions::check_post_ownership;
use crate::middleware::UserId;

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub group: Option<Uuid>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1))]
    pub text: String,

    pub group: Option<Uuid>,

    #[validate(url)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1))]
    pub text: Option<String>,

    pub group: Option<Uuid>,

    #[validate(url)]
    pub image_url: Option<String>,
}

async fn ensure_group_exists(pool: &PgPool, group_id: Uuid) -> Result<()> {
    if !group_repo::group_exists(pool, group_id).await? {
        return Err(AppError::Validation("group does not exist".to_string()));
    }
    Ok(())
}

/// GET /api/v1/posts
pub async fn list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);

    let posts = post_repo::list_posts(
        pool.get_ref(),
        query.group,
        query.search.as_deref(),
        limit,
        offset,
    )
    .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/v1/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if let Some(group_id) = req.group {
        ensure_group_exists(pool.get_ref(), group_id).await?;
    }

    let post = post_repo::create_post(
        pool.get_ref(),
        user.0,
        req.group,
        &req.text,
        req.image_url.as_deref(),
    )
    .await?;

    tracing::debug!(post_id = %post.id, author_id = %user.0, "created post");

    let response = post_repo::get_post_with_author(pool.get_ref(), post.id)
        .await?
        .ok_or_else(|| AppError::Internal("post vanished after insert".to_string()))?;

    Ok(HttpResponse::Created().json(response))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let post_id = path.into_inner();

    match post_repo::get_post_with_author(pool.get_ref(), post_id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(AppError::NotFound(format!("post {} not found", post_id))),
    }
}

/// PUT/PATCH /api/v1/posts/{id}
pub async fn update_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let post_id = path.into_inner();

    let post = post_repo::get_post(pool.get_ref(), post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))?;

    check_post_ownership(user.0, &post)?;

    if let Some(group_id) = req.group {
        ensure_group_exists(pool.get_ref(), group_id).await?;
    }

    post_repo::update_post(
        pool.get_ref(),
        post_id,
        req.text.as_deref(),
        req.group,
        req.image_url.as_deref(),
    )
    .await?;

    let response = post_repo::get_post_with_author(pool.get_ref(), post_id)
        .await?
        .ok_or_else(|| AppError::Internal("post vanished after update".to_string()))?;

    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();

    let post = post_repo::get_post(pool.get_ref(), post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))?;

    check_post_ownership(user.0, &post)?;

    post_repo::delete_post(pool.get_ref(), post_id).await?;

    tracing::debug!(post_id = %post_id, "deleted post");

    Ok(HttpResponse::NoContent().finish())
}
