use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::get,
    Extension, Json, Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use quizgen::middleware::auth::{require_session_auth, Claims};
use quizgen::utils::jwt::create_access_token;

fn init_test_config() {
    env::set_var("DATABASE_URL", "postgres://postgres@localhost/quizgen_test");
    env::set_var("JWT_SECRET", "test_secret_key");
    let _ = quizgen::config::init_config();
}

fn app() -> Router {
    Router::new()
        .route(
            "/api/whoami",
            get(|Extension(claims): Extension<Claims>| async move {
                Json(json!({"sub": claims.sub}))
            }),
        )
        .layer(axum::middleware::from_fn(require_session_auth))
}

async fn whoami_with_cookie(cookie: Option<String>) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method("GET").uri("/api/whoami");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    let resp = app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn valid_session_cookie_passes() {
    init_test_config();
    let token = create_access_token("alice").expect("token");

    let (status, body) = whoami_with_cookie(Some(format!("access_token={}", token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], "alice");
}

#[tokio::test]
async fn bearer_prefixed_cookie_value_is_accepted() {
    init_test_config();
    let token = create_access_token("bob").expect("token");

    let (status, body) = whoami_with_cookie(Some(format!("access_token=Bearer {}", token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], "bob");
}

#[tokio::test]
async fn missing_cookie_is_unauthorized() {
    init_test_config();

    let (status, body) = whoami_with_cookie(None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid token");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    init_test_config();

    let (status, body) =
        whoami_with_cookie(Some("access_token=not-a-jwt".to_string())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["detail"],
        "Token has expired or is invalid. Please re-login."
    );
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    init_test_config();
    let config = quizgen::config::get_config();
    let claims = Claims {
        sub: "carol".to_string(),
        exp: 1_000_000, // 1970-01-12, long past
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .unwrap();

    let (status, _body) = whoami_with_cookie(Some(format!("access_token={}", token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unrelated_cookies_are_ignored() {
    init_test_config();
    let token = create_access_token("dave").expect("token");

    let cookie = format!("theme=dark; access_token={}; lang=en", token);
    let (status, body) = whoami_with_cookie(Some(cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], "dave");
}
