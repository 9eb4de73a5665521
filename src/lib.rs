pub mod client;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    ai_service::AiService, quiz_service::QuizService, source_service::SourceService,
    user_service::UserService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub ai_service: AiService,
    pub source_service: SourceService,
    pub quiz_service: QuizService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();

        let ai_service = AiService::new(http_client, config.openai_model.clone());
        let source_service = SourceService::new(pool.clone());
        let quiz_service = QuizService::new(pool.clone());
        let user_service = UserService::new(pool.clone());

        Self {
            pool,
            ai_service,
            source_service,
            quiz_service,
            user_service,
        }
    }
}
