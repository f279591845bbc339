//! Store contract consumed by the HTTP handlers

use async_trait::async_trait;
use trivia_core::{Category, CategoryId, NewQuestion, Question, QuestionId};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// The write violated a constraint (unknown category, bad difficulty)
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence boundary for questions and categories.
///
/// Every list is ordered by ascending id; that order is what the pagination
/// helper slices.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>>;

    async fn list_questions(&self) -> StoreResult<Vec<Question>>;

    /// Questions in one category. An unknown category yields an empty list.
    async fn questions_in_category(&self, category: CategoryId) -> StoreResult<Vec<Question>>;

    /// Case-insensitive substring match on question text. `term` is matched
    /// literally.
    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>>;

    async fn get_question(&self, id: QuestionId) -> StoreResult<Option<Question>>;

    /// Insert and return the assigned id. Ids are never reused.
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<QuestionId>;

    /// Returns false if no row had this id.
    async fn delete_question(&self, id: QuestionId) -> StoreResult<bool>;

    /// Load fixed-id rows once per store. Later calls are no-ops, so rows
    /// deleted since the first load stay deleted. Later inserts continue
    /// after both the highest seeded id and every id already handed out.
    async fn seed(&self, categories: &[Category], questions: &[Question]) -> StoreResult<()>;
}
