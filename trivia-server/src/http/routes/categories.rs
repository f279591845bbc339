//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use trivia_core::{paginate, Category, CategoryId, CategoryMap, Question};

use crate::http::error::ApiError;
use crate::http::extractors::{PageQuery, ValidId};
use crate::http::server::AppState;

/// Category listing response
#[derive(Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

/// Questions of one category, one page at a time
#[derive(Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: Category,
    pub current_category: CategoryId,
}

/// GET /api/categories - id to type mapping for every category
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state
        .store
        .list_categories()
        .await
        .map_err(ApiError::read)?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories: categories.into_iter().collect(),
    }))
}

/// GET /api/categories/{id}/questions - paginated questions in a category
async fn category_questions(
    State(state): State<Arc<AppState>>,
    ValidId(category_id): ValidId,
    PageQuery(page): PageQuery,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let questions = state
        .store
        .questions_in_category(category_id)
        .await
        .map_err(ApiError::read)?;

    let page_items = paginate(page, &questions);
    if page_items.is_empty() {
        return Err(ApiError::NotFound(format!(
            "page {} of category {}",
            page.get(),
            category_id
        )));
    }

    // Questions may outlive their category row; treat that as absent.
    let category = state
        .store
        .get_category(category_id)
        .await
        .map_err(ApiError::read)?
        .ok_or_else(|| ApiError::NotFound(format!("category {}", category_id)))?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: page_items.to_vec(),
        total_questions: questions.len(),
        categories: category,
        current_category: category_id,
    }))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/{id}/questions", get(category_questions))
}
