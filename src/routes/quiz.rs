use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Extension,
};
use validator::Validate;

use crate::dto::quiz_dto::{GenerateQuizRequest, GenerateQuizResponse};
use crate::error::Error;
use crate::middleware::auth::Claims;
use crate::models::user::User;
use crate::AppState;

async fn current_user(state: &AppState, claims: &Claims) -> crate::error::Result<User> {
    state
        .user_service
        .get_by_username(&claims.sub)
        .await?
        .ok_or_else(|| Error::Unauthorized("Could not validate credentials".to_string()))
}

#[axum::debug_handler]
pub async fn generate_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<GenerateQuizRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    // Same plausibility bar the original backend applies before spending
    // a round trip on the LLM.
    if req.api_key.len() <= 20 {
        return Err(Error::BadRequest("Invalid API Key".to_string()));
    }

    let user = current_user(&state, &claims).await?;
    let source_text = state.source_service.sample_source_text().await?;
    let quizzes = state
        .ai_service
        .generate_quizzes(&req.api_key, &source_text, req.number_of_questions as usize)
        .await?;
    state
        .quiz_service
        .save_generated_batch(user.id, &quizzes)
        .await?;

    Ok(Json(GenerateQuizResponse { quizzes }).into_response())
}

#[axum::debug_handler]
pub async fn histories(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user = current_user(&state, &claims).await?;
    let entries = state.quiz_service.list_histories(user.id).await?;
    Ok(Json(entries).into_response())
}
