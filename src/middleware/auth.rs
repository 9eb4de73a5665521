use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Name of the session cookie the login handler sets and the browser
/// sends back on credentialed requests.
pub const SESSION_COOKIE: &str = "access_token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

fn unauthorized(detail: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": detail}))).into_response()
}

fn session_token_from_cookies(headers: &HeaderMap) -> Option<String> {
    let raw = headers
        .get(axum::http::header::COOKIE)?
        .to_str()
        .ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.trim().trim_matches('"').to_string())
    })
}

/// Session guard for the quiz endpoints: decodes the JWT carried in the
/// `access_token` cookie and stashes the claims in request extensions.
pub async fn require_session_auth(mut req: Request, next: Next) -> Response {
    let Some(raw) = session_token_from_cookies(req.headers()) else {
        tracing::warn!("No access token found in cookie");
        return unauthorized("Invalid token");
    };
    // Legacy clients stored the cookie as "Bearer <jwt>".
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw.as_str());
    if token.is_empty() {
        return unauthorized("Invalid token");
    }

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => {
            req.extensions_mut().insert(data.claims);
            next.run(req).await
        }
        Err(_) => unauthorized("Token has expired or is invalid. Please re-login."),
    }
}
