//! Library client for the quiz API: the request/response lifecycle a
//! browser front end drives, minus the rendering. [`ApiClient`] wraps the
//! REST endpoints with a shared cookie jar, [`GenerationController`] runs
//! one generation request with a timeout race and an observable in-flight
//! flag, and [`QuizSession`] tracks per-question answer state.

pub mod api;
pub mod controller;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use controller::{GenerationController, GenerationError, DEFAULT_GENERATION_TIMEOUT};
pub use session::{AnswerState, QuizSession};
