/// Group handlers. Groups only support list and create; there is no
/// retrieve, update, or delete surface.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::db::{self, group_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 50))]
    pub slug: String,

    pub description: Option<String>,
}

/// GET /api/v1/groups
pub async fn list_groups(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let groups = group_repo::list_groups(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(groups))
}

/// POST /api/v1/groups
pub async fn create_group(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let group = match group_repo::create_group(
        pool.get_ref(),
        &req.title,
        &req.slug,
        req.description.as_deref(),
    )
    .await
    {
        Ok(group) => group,
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::Conflict(format!(
                "group slug '{}' already exists",
                req.slug
            )))
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(group_id = %group.id, created_by = %user.0, "created group");

    Ok(HttpResponse::Created().json(group))
}
