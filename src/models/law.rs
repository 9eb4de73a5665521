use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the source-text corpus the generator samples from.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LawArticle {
    pub id: i64,
    pub chapter_title: Option<String>,
    pub article_title: String,
    pub sentence_text: String,
}
