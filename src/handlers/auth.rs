use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::{self, user_repo};
use crate::error::{AppError, Result};
use crate::security::{hash_password, jwt, verify_password};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// POST /api/v1/users
pub async fn register(
    pool: web::Data<PgPool>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let password_hash = hash_password(&req.password)?;

    let user =
        match user_repo::create_user(pool.get_ref(), &req.username, &req.email, &password_hash)
            .await
        {
            Ok(user) => user,
            Err(e) if db::is_unique_violation(&e) => {
                return Err(AppError::Conflict(
                    "username or email already taken".to_string(),
                ))
            }
            Err(e) => return Err(e.into()),
        };

    tracing::info!(user_id = %user.id, "registered new user");

    Ok(HttpResponse::Created().json(UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    }))
}

/// POST /api/v1/token
pub async fn login(pool: web::Data<PgPool>, req: web::Json<LoginRequest>) -> Result<HttpResponse> {
    req.validate()?;

    let user = user_repo::find_by_username(pool.get_ref(), &req.username)
        .await?
        .ok_or_else(|| AppError::Authentication("invalid username or password".to_string()))?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::Authentication(
            "invalid username or password".to_string(),
        ));
    }

    let tokens = jwt::generate_token_pair(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(tokens))
}

/// POST /api/v1/token/refresh
pub async fn refresh_token(req: web::Json<RefreshRequest>) -> Result<HttpResponse> {
    let token_data = jwt::validate_token(&req.refresh_token)
        .map_err(|e| AppError::Authentication(e.to_string()))?;

    if token_data.claims.token_type != "refresh" {
        return Err(AppError::Authentication(
            "refresh token required".to_string(),
        ));
    }

    let user_id = Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::Authentication("invalid user ID in token".to_string()))?;

    let tokens = jwt::generate_token_pair(user_id, &token_data.claims.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(tokens))
}
