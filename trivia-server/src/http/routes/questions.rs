//! Question endpoints - listing, search, creation, deletion

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trivia_core::{paginate, CategoryMap, NewQuestion, Question, QuestionId, ValidationError};

use crate::http::error::ApiError;
use crate::http::extractors::{FlexibleInt, JsonBody, PageQuery, ValidId};
use crate::http::server::AppState;

/// Body of POST /api/questions.
///
/// `searchTerm` selects the search branch; otherwise the create fields are
/// required.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionsPost {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<Value>,
    pub difficulty: Option<Value>,
}

/// Paginated question listing
#[derive(Serialize)]
pub struct QuestionsPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub categories: CategoryMap,
    pub total_questions: usize,
    pub current_category: Option<i32>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
}

#[derive(Serialize)]
pub struct AddedResponse {
    pub success: bool,
    pub added: QuestionId,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: QuestionId,
}

/// Either outcome of the dual-purpose POST
#[derive(Serialize)]
#[serde(untagged)]
pub enum QuestionsPostResponse {
    Search(SearchResponse),
    Added(AddedResponse),
}

/// GET /api/questions?page=N - ten questions per page plus all categories
async fn list_questions(
    State(state): State<Arc<AppState>>,
    PageQuery(page): PageQuery,
) -> Result<Json<QuestionsPage>, ApiError> {
    let questions = state
        .store
        .list_questions()
        .await
        .map_err(ApiError::read)?;

    let page_items = paginate(page, &questions);
    if page_items.is_empty() {
        return Err(ApiError::NotFound(format!("question page {}", page.get())));
    }

    let categories = state
        .store
        .list_categories()
        .await
        .map_err(ApiError::read)?;

    Ok(Json(QuestionsPage {
        success: true,
        questions: page_items.to_vec(),
        categories: categories.into_iter().collect(),
        total_questions: questions.len(),
        current_category: None,
    }))
}

/// POST /api/questions - search when `searchTerm` is present, create otherwise
async fn post_questions(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<QuestionsPost>,
) -> Result<Json<QuestionsPostResponse>, ApiError> {
    let response = match body.search_term {
        Some(ref term) => QuestionsPostResponse::Search(search(&state, term).await?),
        None => QuestionsPostResponse::Added(create(&state, body).await?),
    };
    Ok(Json(response))
}

async fn search(state: &AppState, term: &str) -> Result<SearchResponse, ApiError> {
    let term = term.trim();
    let questions = state
        .store
        .search_questions(term)
        .await
        .map_err(ApiError::read)?;

    tracing::debug!(term, matches = questions.len(), "question search");
    Ok(SearchResponse {
        success: true,
        questions,
    })
}

async fn create(state: &AppState, body: QuestionsPost) -> Result<AddedResponse, ApiError> {
    let question = body
        .question
        .ok_or(ValidationError::Missing { field: "question" })?;
    let answer = body
        .answer
        .ok_or(ValidationError::Missing { field: "answer" })?;
    let category = body
        .category
        .ok_or(ValidationError::Missing { field: "category" })?;
    let difficulty = body
        .difficulty
        .ok_or(ValidationError::Missing { field: "difficulty" })?;

    // Blank text is a client error; checked before the numeric fields.
    NewQuestion::validate_text(&question, &answer)?;

    let category = FlexibleInt::from_value(&category)
        .ok_or_else(|| ApiError::Unprocessable(format!("malformed category {}", category)))?;
    let difficulty = FlexibleInt::from_value(&difficulty)
        .ok_or_else(|| ApiError::Unprocessable(format!("malformed difficulty {}", difficulty)))?;

    let new_question = NewQuestion::new(&question, &answer, category.0, difficulty.0)?;
    let id = state
        .store
        .insert_question(new_question)
        .await
        .map_err(ApiError::write)?;

    tracing::info!(id, "question added");
    Ok(AddedResponse {
        success: true,
        added: id,
    })
}

/// DELETE /api/questions/{id}
async fn delete_question(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<DeletedResponse>, ApiError> {
    state
        .store
        .get_question(id)
        .await
        .map_err(ApiError::read)?
        .ok_or_else(|| ApiError::NotFound(format!("question {}", id)))?;

    let deleted = state
        .store
        .delete_question(id)
        .await
        .map_err(ApiError::write)?;

    // Lost a race with another delete of the same row.
    if !deleted {
        return Err(ApiError::NotFound(format!("question {}", id)));
    }

    tracing::info!(id, "question deleted");
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
    }))
}

/// Question routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/questions", get(list_questions).post(post_questions))
        .route("/api/questions/{id}", delete(delete_question))
}
