use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blog_service::security::jwt;
use blog_service::{routes, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to load configuration")?;
    info!(
        "Configuration loaded: env={}, host={}, port={}",
        config.app.env, config.app.host, config.app.port
    );

    // Install JWT signing state before any request can be served
    jwt::initialize(
        &config.jwt.secret,
        config.jwt.access_token_ttl,
        config.jwt.refresh_token_ttl,
    )
    .context("Failed to initialize JWT keys")?;

    // Initialize database pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    // Verify database connection
    sqlx::query("SELECT 1")
        .execute(&pg_pool)
        .await
        .context("Failed to verify database connection")?;
    info!("Database pool created and verified");

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    info!("Listening on http://{}", bind_address);

    let cors_config = config.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in cors_config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(pg_pool.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server error")?;

    info!("blog-service shutting down");
    Ok(())
}
