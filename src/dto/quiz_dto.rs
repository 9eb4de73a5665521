use crate::models::quiz::QuizQuestion;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(range(min = 1, max = 5, message = "number_of_questions must be between 1 and 5"))]
    pub number_of_questions: u32,
    #[validate(length(min = 1, message = "api_key must not be empty"))]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQuizResponse {
    pub quizzes: Vec<QuizQuestion>,
}

/// One row of `/api/histories`, mirroring the stored quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizHistoryEntry {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_choice: i32,
    pub correct_reason: String,
    pub wrong_reason: String,
    pub user_answer: Option<i32>,
}
