/// Health check endpoints
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /health — liveness
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// GET /health/ready — readiness, verifies database connectivity
pub async fn readiness(pool: web::Data<PgPool>) -> impl Responder {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "ready": true })),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "ready": false,
                "error": e.to_string(),
            }))
        }
    }
}
