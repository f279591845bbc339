//! In-memory store for development and tests
//!
//! Mirrors the PostgreSQL constraints: inserts must reference an existing
//! category and carry a positive difficulty, and ids come from a counter that
//! only moves forward.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use trivia_core::{seed, Category, CategoryId, NewQuestion, Question, QuestionId};

use super::store::{StoreError, StoreResult, TriviaStore};

#[derive(Debug)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    questions: BTreeMap<QuestionId, Question>,
    next_question_id: QuestionId,
    /// Set by the first load; later seeds are no-ops
    seeded: bool,
}

/// Store holding everything in process memory
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store, ids start at 1
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                categories: BTreeMap::new(),
                questions: BTreeMap::new(),
                next_question_id: 1,
                seeded: false,
            }),
        }
    }

    /// Store preloaded with the bundled dataset
    pub fn seeded() -> Self {
        let store = Self::new();
        if let Ok(mut tables) = store.tables.write() {
            tables.load(&seed::categories(), &seed::questions());
        }
        store
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl Tables {
    fn load(&mut self, categories: &[Category], questions: &[Question]) {
        for category in categories {
            self.categories
                .entry(category.id)
                .or_insert_with(|| category.clone());
        }
        for question in questions {
            self.questions
                .entry(question.id)
                .or_insert_with(|| question.clone());
            self.next_question_id = self.next_question_id.max(question.id + 1);
        }
        self.seeded = true;
    }

    fn filtered<F>(&self, keep: F) -> Vec<Question>
    where
        F: Fn(&Question) -> bool,
    {
        self.questions.values().filter(|q| keep(q)).cloned().collect()
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.read()?.filtered(|_| true))
    }

    async fn questions_in_category(&self, category: CategoryId) -> StoreResult<Vec<Question>> {
        Ok(self.read()?.filtered(|q| q.category == category))
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let needle = term.to_lowercase();
        Ok(self
            .read()?
            .filtered(|q| q.question.to_lowercase().contains(&needle)))
    }

    async fn get_question(&self, id: QuestionId) -> StoreResult<Option<Question>> {
        Ok(self.read()?.questions.get(&id).cloned())
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<QuestionId> {
        let mut tables = self.write()?;

        if !tables.categories.contains_key(&question.category()) {
            return Err(StoreError::Rejected(format!(
                "category {} does not exist",
                question.category()
            )));
        }
        if question.difficulty() < 1 {
            return Err(StoreError::Rejected(format!(
                "difficulty must be positive, got {}",
                question.difficulty()
            )));
        }

        let id = tables.next_question_id;
        tables.next_question_id += 1;
        tables.questions.insert(id, question.into_question(id));
        Ok(id)
    }

    async fn delete_question(&self, id: QuestionId) -> StoreResult<bool> {
        Ok(self.write()?.questions.remove(&id).is_some())
    }

    async fn seed(&self, categories: &[Category], questions: &[Question]) -> StoreResult<()> {
        let mut tables = self.write()?;
        if tables.seeded {
            tracing::debug!("memory store already seeded, skipping");
            return Ok(());
        }
        tables.load(categories, questions);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_store_lists_in_id_order() {
        let store = MemoryStore::seeded();
        let ids: Vec<_> = store
            .list_questions()
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();

        assert_eq!(ids.len(), 19);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids[0], 2);
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let store = MemoryStore::seeded();
        let found = store.search_questions("peanut").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 12);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::seeded();
        let first = store
            .insert_question(NewQuestion::new("Q1?", "A1", 1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(first, 24);

        assert!(store.delete_question(first).await.unwrap());

        let second = store
            .insert_question(NewQuestion::new("Q2?", "A2", 1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(second, 25);
    }

    #[tokio::test]
    async fn rejects_unknown_category() {
        let store = MemoryStore::seeded();
        let err = store
            .insert_question(NewQuestion::new("Q?", "A", 99, 1).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
    }

    #[tokio::test]
    async fn rejects_non_positive_difficulty() {
        let store = MemoryStore::seeded();
        let err = store
            .insert_question(NewQuestion::new("Q?", "A", 1, 0).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
    }

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let store = MemoryStore::seeded();
        store
            .seed(&seed::categories(), &seed::questions())
            .await
            .unwrap();
        assert_eq!(store.list_questions().await.unwrap().len(), 19);
        assert_eq!(store.list_categories().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn reseeding_keeps_deleted_ids_retired() {
        let store = MemoryStore::seeded();
        let first = store
            .insert_question(NewQuestion::new("Q1?", "A1", 1, 1).unwrap())
            .await
            .unwrap();
        let second = store
            .insert_question(NewQuestion::new("Q2?", "A2", 1, 1).unwrap())
            .await
            .unwrap();
        for id in [first, second, 12] {
            assert!(store.delete_question(id).await.unwrap());
        }

        store
            .seed(&seed::categories(), &seed::questions())
            .await
            .unwrap();

        assert!(store.get_question(12).await.unwrap().is_none());
        let next = store
            .insert_question(NewQuestion::new("Q3?", "A3", 1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(next, 26);
    }

    #[tokio::test]
    async fn unknown_category_filter_is_empty() {
        let store = MemoryStore::seeded();
        assert!(store.questions_in_category(100).await.unwrap().is_empty());
    }
}
