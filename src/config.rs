use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_env")]
    pub env: String,

    #[serde(default = "default_app_host")]
    pub host: String,

    #[serde(default = "default_app_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,

    #[serde(default = "default_jwt_access_ttl")]
    pub access_token_ttl: i64,

    #[serde(default = "default_jwt_refresh_ttl")]
    pub refresh_token_ttl: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_allowed_origins")]
    pub allowed_origins: String,
}

// Default value functions
fn default_app_env() -> String {
    "development".to_string()
}

fn default_app_host() -> String {
    "0.0.0.0".to_string()
}

fn default_app_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_jwt_access_ttl() -> i64 {
    3600 // 1 hour
}

fn default_jwt_refresh_ttl() -> i64 {
    2592000 // 30 days
}

fn default_cors_allowed_origins() -> String {
    "http://localhost:3000".to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        let app = AppConfig {
            env: app_env.clone(),
            host: env::var("APP_HOST").unwrap_or_else(|_| default_app_host()),
            port: env::var("APP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_app_port),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or_else(default_db_max_connections),
        };

        let jwt = JwtConfig {
            secret: env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?,
            access_token_ttl: env::var("JWT_ACCESS_TOKEN_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_jwt_access_ttl),
            refresh_token_ttl: env::var("JWT_REFRESH_TOKEN_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_jwt_refresh_ttl),
        };

        let cors = {
            let allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
                Ok(value) => value,
                Err(_) if app_env.eq_ignore_ascii_case("production") => {
                    return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                }
                Err(_) => default_cors_allowed_origins(),
            };

            if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
            }

            CorsConfig { allowed_origins }
        };

        Ok(Config {
            app,
            database,
            jwt,
            cors,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_env(), "development");
        assert_eq!(default_app_host(), "0.0.0.0");
        assert_eq!(default_app_port(), 8080);
        assert_eq!(default_db_max_connections(), 10);
        assert_eq!(default_jwt_access_ttl(), 3600);
        assert_eq!(default_jwt_refresh_ttl(), 2592000);
    }
}
