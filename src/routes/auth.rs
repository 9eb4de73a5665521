use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::config::get_config;
use crate::dto::auth_dto::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use crate::error::Error;
use crate::middleware::auth::SESSION_COOKIE;
use crate::utils::{crypto, jwt};
use crate::AppState;

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let password_hash = crypto::hash_password(&req.password)?;
    let user = state
        .user_service
        .create_user(&req.username, &password_hash)
        .await?;
    tracing::info!(username = %user.username, "Registered new user");
    Ok(Json(MessageResponse {
        message: "User registered successfully!".to_string(),
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn token(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user = state
        .user_service
        .get_by_username(&req.username)
        .await?
        .ok_or_else(|| Error::Unauthorized("Incorrect username or password".to_string()))?;

    if !crypto::verify_password(&req.password, &user.password_hash)? {
        return Err(Error::Unauthorized(
            "Incorrect username or password".to_string(),
        ));
    }

    let access_token = jwt::create_access_token(&user.username)?;
    let cookie = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=None",
        SESSION_COOKIE,
        access_token,
        get_config().session_cookie_max_age
    );
    let body = Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    });
    Ok(([(SET_COOKIE, cookie)], body).into_response())
}

#[axum::debug_handler]
pub async fn logout() -> crate::error::Result<Response> {
    let cookie = format!("{}=; Max-Age=0; Path=/; HttpOnly; SameSite=None", SESSION_COOKIE);
    Ok((
        [(SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Logout Successful".to_string(),
        }),
    )
        .into_response())
}
