use crate::dto::auth_dto::{LoginRequest, RegisterRequest, TokenResponse};
use crate::dto::quiz_dto::{GenerateQuizRequest, QuizHistoryEntry};
use crate::middleware::auth::SESSION_COOKIE;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// REST client for the quiz backend. The cookie jar stands in for the
/// browser's credentialed fetches: the session cookie set by `/api/token`
/// is captured there and attached to every later request.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .cookie_provider(jar.clone())
            .build()
            .expect("reqwest client");
        Self {
            http,
            base_url,
            jar,
        }
    }

    fn endpoint(&self, path: &str) -> Url {
        self.base_url.join(path).expect("endpoint path")
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let res = self
            .http
            .post(self.endpoint("/api/register"))
            .json(&RegisterRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status()));
        }
        Ok(())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let res = self
            .http
            .post(self.endpoint("/api/token"))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status()));
        }
        Ok(res.json().await?)
    }

    pub async fn fetch_histories(&self) -> Result<Vec<QuizHistoryEntry>, ApiError> {
        let res = self
            .http
            .get(self.endpoint("/api/histories"))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status()));
        }
        Ok(res.json().await?)
    }

    /// Raw generation call. The controller owns status classification, so
    /// this returns the response as-is.
    pub async fn post_generate(
        &self,
        request: &GenerateQuizRequest,
    ) -> Result<Response, reqwest::Error> {
        self.http
            .post(self.endpoint("/api/generate-quiz"))
            .json(request)
            .send()
            .await
    }

    /// Expires the session cookie. The counterpart of the browser writing
    /// an already-expired `access_token` into `document.cookie`.
    pub fn clear_session(&self) {
        let expired = format!("{}=; Max-Age=0; Path=/", SESSION_COOKIE);
        self.jar.add_cookie_str(&expired, &self.base_url);
    }

    /// Current session cookie value, if one is held.
    pub fn session_cookie(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let raw = header.to_str().ok()?;
        raw.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
    }
}
