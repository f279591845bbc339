//! Quiz endpoint - one random question the player has not seen yet

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use trivia_core::{select_question, Question, QuestionId, QuizCategory};

use crate::http::error::ApiError;
use crate::http::extractors::{FlexibleInt, JsonBody};
use crate::http::server::AppState;

/// Body of POST /api/quizzes
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizRequest {
    pub previous_questions: Vec<QuestionId>,
    pub quiz_category: QuizCategoryBody,
}

/// `{id}`; clients also send the category `type`, which is ignored
#[derive(Debug, Deserialize)]
pub struct QuizCategoryBody {
    pub id: FlexibleInt,
}

/// `question` is omitted once the pool is exhausted
#[derive(Serialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

/// POST /api/quizzes
async fn play_quiz(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let pool = match QuizCategory::from(request.quiz_category.id.0) {
        QuizCategory::Any => state.store.list_questions().await,
        QuizCategory::Only(category) => state.store.questions_in_category(category).await,
    }
    .map_err(ApiError::read)?;

    let question = select_question(pool, &request.previous_questions, &mut rand::thread_rng());
    if question.is_none() {
        tracing::debug!(
            asked = request.previous_questions.len(),
            "quiz pool exhausted"
        );
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

/// Quiz routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/quizzes", post(play_quiz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_accepts_string_category_id() {
        let req: QuizRequest = serde_json::from_value(json!({
            "previous_questions": [13],
            "quiz_category": {"type": "Geography", "id": "3"}
        }))
        .unwrap();
        assert_eq!(req.quiz_category.id, FlexibleInt(3));
        assert_eq!(req.previous_questions, vec![13]);
    }

    #[test]
    fn request_requires_category_id() {
        let result = serde_json::from_value::<QuizRequest>(json!({
            "previous_questions": [13],
            "quiz_category": {"type": "Geography"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn exhausted_response_has_no_question_field() {
        let body = serde_json::to_value(QuizResponse {
            success: true,
            question: None,
        })
        .unwrap();
        assert_eq!(body, json!({"success": true}));
    }
}
