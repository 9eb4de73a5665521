use crate::config::get_config;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

/// Mints an HS256 access token for `username`, expiring after the
/// configured number of minutes.
pub fn create_access_token(username: &str) -> Result<String> {
    let config = get_config();
    let expires_at = Utc::now() + Duration::minutes(config.access_token_expire_minutes);
    let claims = Claims {
        sub: username.to_string(),
        exp: expires_at.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign access token: {}", e)))
}
