/// Follow handlers. The listing is always scoped to the requesting
/// identity: it returns the edges where the requester is the one being
/// followed ("who follows me").
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;

#[derive(Debug, Deserialize)]
pub struct ListFollowsQuery {
    pub following: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFollowRequest {
    pub following: Uuid,
}

/// GET /api/v1/follow
pub async fn list_follows(
    pool: web::Data<PgPool>,
    user: UserId,
    query: web::Query<ListFollowsQuery>,
) -> Result<HttpResponse> {
    let edges = follow_repo::list_followers(
        pool.get_ref(),
        user.0,
        query.following,
        query.search.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(edges))
}

/// POST /api/v1/follow
///
/// Both rejections happen before persistence: a self-follow never reaches
/// the database, and a duplicate edge is absorbed by the unique constraint
/// so no second row can exist even under concurrent requests.
pub async fn create_follow(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreateFollowRequest>,
) -> Result<HttpResponse> {
    if req.following == user.0 {
        return Err(AppError::Validation(
            "cannot follow yourself".to_string(),
        ));
    }

    if !user_repo::user_exists(pool.get_ref(), req.following).await? {
        return Err(AppError::NotFound(format!(
            "user {} not found",
            req.following
        )));
    }

    match follow_repo::create_follow(pool.get_ref(), user.0, req.following).await? {
        Some(edge) => {
            tracing::debug!(user_id = %user.0, following = %req.following, "created follow");
            Ok(HttpResponse::Created().json(edge))
        }
        None => Err(AppError::Validation(
            "you are already following this user".to_string(),
        )),
    }
}
