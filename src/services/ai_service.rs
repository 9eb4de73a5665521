use crate::error::{Error, Result};
use crate::models::quiz::QuizQuestion;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

#[derive(Clone)]
pub struct AiService {
    client: Client,
    model: String,
}

impl AiService {
    pub fn new(client: Client, model: String) -> Self {
        Self { client, model }
    }

    /// Generates `num_questions` multiple-choice questions about
    /// `source_text`. The API key is used for this one call and dropped;
    /// it is never stored or logged.
    pub async fn generate_quizzes(
        &self,
        api_key: &str,
        source_text: &str,
        num_questions: usize,
    ) -> Result<Vec<QuizQuestion>> {
        let system_prompt = r#"You are an exam author for a professional license test.
Based on the source text supplied by the user, write four-option multiple-choice
questions where exactly one option is a correct statement. The output must be a
valid JSON object with a 'quizzes' array.

Rules:
1. Generate exactly the requested number of questions.
2. Options must be rewritten statements derived from the source text, never
   sentences copied verbatim from it.
3. VARY the position of the correct option. Do NOT always use 1.
4. Never write phrases like "as stated in the text" in the reasons.
"#;

        let user_schema = serde_json::json!({
            "source_text": source_text,
            "required_count": num_questions,
            "schema_example": {
                "quizzes": [
                    {
                        "question_text": "Which of the following statements is correct?",
                        "options": ["Statement 1", "Statement 2", "Statement 3", "Statement 4"],
                        "correct_choice": 2, // 1-based - VARY THIS! Don't always use 1
                        "correct_reason": "Why the option at position 2 is correct...",
                        "wrong_reason": "Why the remaining options are wrong..."
                    }
                ]
            }
        });

        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": serde_json::to_string(&user_schema).unwrap()}
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.8
        });

        tracing::info!("Requesting {} questions from OpenAI", num_questions);
        let response_json = self.chat_openai(api_key, payload).await?;
        let quizzes = self.sanitize_quizzes(&response_json, num_questions);
        tracing::info!("Finalized {} questions", quizzes.len());

        if quizzes.is_empty() {
            return Err(Error::Internal(
                "Failed to generate quizzes from OpenAI API".to_string(),
            ));
        }
        Ok(quizzes)
    }

    async fn chat_openai(&self, api_key: &str, payload: JsonValue) -> Result<JsonValue> {
        let res = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(api_key)
            .json(&payload)
            .timeout(Duration::from_secs(120))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("OpenAI API Error {}: {}", status, text).into());
        }

        let body: JsonValue = res.json().await?;

        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .and_then(|s| serde_json::from_str(s).ok())
            .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response format").into())
    }

    /// Coerces the model output into well-formed questions: entries with
    /// fewer than two options are dropped, an out-of-range correct_choice
    /// is clamped, options are reshuffled to remove position bias, and
    /// the batch is truncated to the requested count.
    pub fn sanitize_quizzes(&self, raw: &JsonValue, num_questions: usize) -> Vec<QuizQuestion> {
        let arr_val = if let Some(arr) = raw.get("quizzes").and_then(|a| a.as_array()) {
            arr.clone()
        } else if let Some(arr) = raw.as_array() {
            arr.clone()
        } else {
            vec![]
        };

        let mut rng = rand::thread_rng();
        let mut quizzes = Vec::new();

        for val in arr_val.iter() {
            let Some(mut quiz) = coerce_quiz(val) else {
                continue;
            };
            if quiz.options.len() < 2 {
                continue;
            }
            if quiz.correct_choice < 1 || quiz.correct_choice as usize > quiz.options.len() {
                quiz.correct_choice = 1;
            }

            let correct_option = quiz.options[quiz.correct_index()].clone();
            quiz.options.shuffle(&mut rng);
            quiz.correct_choice = quiz
                .options
                .iter()
                .position(|o| o == &correct_option)
                .unwrap_or(0) as i32
                + 1;

            quizzes.push(quiz);
        }

        if quizzes.len() > num_questions {
            quizzes.truncate(num_questions);
        }

        quizzes
    }
}

fn coerce_quiz(v: &JsonValue) -> Option<QuizQuestion> {
    let question_text = v.get("question_text").and_then(|s| s.as_str())?.to_string();
    let options: Vec<String> = v
        .get("options")
        .and_then(|o| o.as_array())?
        .iter()
        .filter_map(|x| x.as_str().map(|s| s.to_string()))
        .collect();
    let correct_choice = v.get("correct_choice").and_then(|i| i.as_i64()).unwrap_or(1) as i32;
    let correct_reason = v
        .get("correct_reason")
        .and_then(|s| s.as_str())
        .unwrap_or("")
        .to_string();
    let wrong_reason = v
        .get("wrong_reason")
        .and_then(|s| s.as_str())
        .unwrap_or("")
        .to_string();

    Some(QuizQuestion {
        question_text,
        options,
        correct_choice,
        correct_reason,
        wrong_reason,
    })
}
