use crate::config::get_config;
use crate::error::{Error, Result};
use crate::models::law::LawArticle;
use sqlx::PgPool;

#[derive(Clone)]
pub struct SourceService {
    pool: PgPool,
}

impl SourceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Picks two random articles from the corpus and concatenates their
    /// sentences into the generation input. Retries when the draw comes
    /// up empty, up to the configured number of attempts.
    pub async fn sample_source_text(&self) -> Result<String> {
        let config = get_config();
        let mut input_text = String::new();
        let mut attempts = 0;

        while input_text.is_empty() && attempts < config.source_sample_attempts {
            let articles: Vec<LawArticle> = sqlx::query_as(
                r#"
                SELECT id, chapter_title, article_title, sentence_text
                FROM laws
                WHERE article_title IN (
                    SELECT article_title FROM laws
                    GROUP BY article_title
                    ORDER BY random()
                    LIMIT 2
                )
                "#,
            )
            .fetch_all(&self.pool)
            .await?;

            input_text = articles
                .into_iter()
                .map(|article| article.sentence_text)
                .collect::<Vec<_>>()
                .join(" ");
            attempts += 1;
        }

        if input_text.is_empty() {
            return Err(Error::Internal(
                "Failed to retrieve random article text".to_string(),
            ));
        }

        tracing::debug!(chars = input_text.chars().count(), "Sampled source text");
        Ok(truncate_chars(input_text, config.source_text_max_chars))
    }
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }
    text.chars().take(max_chars).collect()
}
