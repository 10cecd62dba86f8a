use anyhow::{anyhow, Result};
/// JWT token generation and validation using HS256
/// The signing secret and token lifetimes come from `JwtConfig` and must be
/// installed with `initialize` during application startup
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    /// Username
    pub username: String,
}

/// Access token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

struct JwtState {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: i64,
    refresh_token_ttl: i64,
}

use std::sync::RwLock;

// Thread-safe mutable storage for JWT state loaded from configuration
lazy_static! {
    static ref JWT_STATE: RwLock<Option<JwtState>> = RwLock::new(None);
}

/// Install the signing secret and token lifetimes (seconds).
/// Must be called during application startup before any JWT operations.
pub fn initialize(secret: &str, access_token_ttl: i64, refresh_token_ttl: i64) -> Result<()> {
    if secret.is_empty() {
        return Err(anyhow!("JWT secret must not be empty"));
    }

    let mut state = JWT_STATE
        .write()
        .map_err(|e| anyhow!("Failed to acquire write lock on JWT state: {}", e))?;
    *state = Some(JwtState {
        encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        access_token_ttl,
        refresh_token_ttl,
    });

    Ok(())
}

fn with_state<T>(f: impl FnOnce(&JwtState) -> Result<T>) -> Result<T> {
    let state = JWT_STATE
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT state: {}", e))?;

    match state.as_ref() {
        Some(s) => f(s),
        None => Err(anyhow!(
            "JWT state not initialized. Call initialize() during startup"
        )),
    }
}

fn generate_token(user_id: Uuid, username: &str, token_type: &str, ttl_secs: i64, key: &EncodingKey) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::seconds(ttl_secs);

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        token_type: token_type.to_string(),
        username: username.to_string(),
    };

    encode(&Header::default(), &claims, key)
        .map_err(|e| anyhow!("Failed to generate {} token: {}", token_type, e))
}

/// Generate a new access token
pub fn generate_access_token(user_id: Uuid, username: &str) -> Result<String> {
    with_state(|s| generate_token(user_id, username, "access", s.access_token_ttl, &s.encoding_key))
}

/// Generate a new refresh token
pub fn generate_refresh_token(user_id: Uuid, username: &str) -> Result<String> {
    with_state(|s| {
        generate_token(
            user_id,
            username,
            "refresh",
            s.refresh_token_ttl,
            &s.encoding_key,
        )
    })
}

/// Generate both access and refresh tokens
pub fn generate_token_pair(user_id: Uuid, username: &str) -> Result<TokenResponse> {
    let access_token = generate_access_token(user_id, username)?;
    let refresh_token = generate_refresh_token(user_id, username)?;
    let expires_in = with_state(|s| Ok(s.access_token_ttl))?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in,
    })
}

/// Validate and decode a token
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    with_state(|s| {
        decode::<Claims>(token, &s.decoding_key, &Validation::default())
            .map_err(|e| anyhow!("Token validation failed: {}", e))
    })
}

/// Extract user ID from a validated token
pub fn get_user_id_from_token(token: &str) -> Result<Uuid> {
    let token_data = validate_token(token)?;
    Uuid::parse_str(&token_data.claims.sub).map_err(|e| anyhow!("Invalid user ID in token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        initialize("test-secret-for-unit-tests", 3600, 2592000).unwrap();
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        init();
        let user_id = Uuid::new_v4();

        let token = generate_access_token(user_id, "alice").unwrap();
        assert_eq!(token.matches('.').count(), 2);

        let token_data = validate_token(&token).unwrap();
        assert_eq!(token_data.claims.sub, user_id.to_string());
        assert_eq!(token_data.claims.username, "alice");
        assert_eq!(token_data.claims.token_type, "access");
    }

    #[test]
    fn test_generate_token_pair() {
        init();
        let tokens = generate_token_pair(Uuid::new_v4(), "bob").unwrap();
        assert!(!tokens.access_token.is_empty());
        assert!(!tokens.refresh_token.is_empty());
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_in, 3600);
    }

    #[test]
    fn test_refresh_token_has_longer_expiry() {
        init();
        let user_id = Uuid::new_v4();
        let access = generate_access_token(user_id, "carol").unwrap();
        let refresh = generate_refresh_token(user_id, "carol").unwrap();

        let access_claims = validate_token(&access).unwrap().claims;
        let refresh_claims = validate_token(&refresh).unwrap().claims;
        assert!(refresh_claims.exp > access_claims.exp);
        assert_eq!(refresh_claims.token_type, "refresh");
    }

    #[test]
    fn test_validate_invalid_token() {
        init();
        assert!(validate_token("not.a.valid.token").is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        init();
        let token = generate_access_token(Uuid::new_v4(), "dave").unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('x');
        assert!(validate_token(&tampered).is_err());
    }

    #[test]
    fn test_get_user_id_from_token() {
        init();
        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, "erin").unwrap();
        assert_eq!(get_user_id_from_token(&token).unwrap(), user_id);
    }
}
