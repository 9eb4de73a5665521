use crate::client::api::ApiClient;
use crate::dto::quiz_dto::{GenerateQuizRequest, GenerateQuizResponse};
use crate::models::quiz::QuizQuestion;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The stored session credential is gone or stale. The controller has
    /// already expired the cookie; the caller routes the user back to the
    /// entry screen.
    #[error("session expired")]
    SessionExpired,

    /// The server rejected the request body; carries the parsed `detail`.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Any other non-2xx status.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The timer won the race.
    #[error("request timed out")]
    Timeout,

    /// Transport or parse failure.
    #[error("{0}")]
    Unknown(String),
}

/// Drives one quiz generation request at a time. Holds no quiz state of
/// its own; results go into the caller's [`crate::client::QuizSession`].
pub struct GenerationController {
    api: ApiClient,
    timeout: Duration,
    in_flight: Arc<AtomicBool>,
}

/// Raises the in-flight flag for the duration of one call. Dropping the
/// guard lowers it, so every exit path resets the flag.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn arm(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl GenerationController {
    pub fn new(api: ApiClient) -> Self {
        Self::with_timeout(api, DEFAULT_GENERATION_TIMEOUT)
    }

    pub fn with_timeout(api: ApiClient, timeout: Duration) -> Self {
        Self {
            api,
            timeout,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// True while a generation request is outstanding. The UI disables
    /// the trigger on this; the controller itself does not lock.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Shared handle to the in-flight flag, for observers that outlive a
    /// borrow of the controller.
    pub fn in_flight_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.in_flight)
    }

    /// Issues one generation request, racing it against the timeout.
    /// Whichever settles first decides the outcome; the losing side keeps
    /// running and its result is discarded. No retries: every failure is
    /// terminal for this call.
    pub async fn generate(
        &self,
        request: GenerateQuizRequest,
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        let _guard = InFlightGuard::arm(&self.in_flight);

        let api = self.api.clone();
        let call = tokio::spawn(async move { api.post_generate(&request).await });

        tokio::select! {
            joined = call => match joined {
                Ok(sent) => self.classify(sent).await,
                Err(e) => Err(GenerationError::Unknown(format!("generation task failed: {}", e))),
            },
            _ = tokio::time::sleep(self.timeout) => {
                tracing::error!("The request timed out.");
                Err(GenerationError::Timeout)
            }
        }
    }

    async fn classify(
        &self,
        sent: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        let response = match sent {
            Ok(response) => response,
            Err(e) => return Err(GenerationError::Unknown(e.to_string())),
        };

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                self.api.clear_session();
                Err(GenerationError::SessionExpired)
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let detail = response
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|body| body.get("detail").cloned())
                    .map(|d| match d {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .unwrap_or_else(|| "validation failed".to_string());
                tracing::error!("Error detail: {}", detail);
                Err(GenerationError::ValidationFailed(detail))
            }
            status if !status.is_success() => Err(GenerationError::RequestFailed(
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            )),
            _ => match response.json::<GenerateQuizResponse>().await {
                Ok(body) => Ok(body.quizzes),
                Err(e) => Err(GenerationError::Unknown(e.to_string())),
            },
        }
    }
}
