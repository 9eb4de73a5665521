use crate::dto::quiz_dto::QuizHistoryEntry;
use crate::error::Result;
use crate::models::quiz::{QuizQuestion, QuizRecord};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct QuizService {
    pool: PgPool,
}

impl QuizService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stores a freshly generated batch for the user's history. A failed
    /// insert is logged and skipped; history storage must not fail the
    /// generation response the user is waiting on.
    pub async fn save_generated_batch(
        &self,
        user_id: Uuid,
        quizzes: &[QuizQuestion],
    ) -> Result<()> {
        for quiz in quizzes {
            let options = serde_json::to_value(&quiz.options)?;
            let inserted = sqlx::query(
                r#"
                INSERT INTO quizzes (user_id, question_text, options, correct_choice, correct_reason, wrong_reason)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(user_id)
            .bind(&quiz.question_text)
            .bind(&options)
            .bind(quiz.correct_choice)
            .bind(&quiz.correct_reason)
            .bind(&quiz.wrong_reason)
            .execute(&self.pool)
            .await;

            if let Err(e) = inserted {
                tracing::warn!(error = ?e, "Failed to store generated quiz");
            }
        }
        Ok(())
    }

    pub async fn list_histories(&self, user_id: Uuid) -> Result<Vec<QuizHistoryEntry>> {
        let records: Vec<QuizRecord> = sqlx::query_as(
            r#"
            SELECT id, user_id, question_text, options, correct_choice, correct_reason, wrong_reason, user_answer, created_at
            FROM quizzes
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let entries = records
            .into_iter()
            .map(|record| QuizHistoryEntry {
                question_text: record.question_text,
                options: serde_json::from_value(record.options).unwrap_or_default(),
                correct_choice: record.correct_choice,
                correct_reason: record.correct_reason,
                wrong_reason: record.wrong_reason,
                user_answer: record.user_answer,
            })
            .collect();
        Ok(entries)
    }
}
