use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One generated multiple-choice question, as returned by the generator
/// and rendered by the client. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    /// 1-based index into `options`. Always within `1..=options.len()`.
    pub correct_choice: i32,
    pub correct_reason: String,
    pub wrong_reason: String,
}

impl QuizQuestion {
    /// 0-based index of the correct option.
    pub fn correct_index(&self) -> usize {
        (self.correct_choice - 1) as usize
    }
}

/// Persisted quiz row. `options` is stored as a JSON array; `user_answer`
/// stays NULL until an answer is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub question_text: String,
    pub options: serde_json::Value,
    pub correct_choice: i32,
    pub correct_reason: String,
    pub wrong_reason: String,
    pub user_answer: Option<i32>,
    pub created_at: DateTime<Utc>,
}
