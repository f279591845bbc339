//! PostgreSQL store
//!
//! - reads: one query per call, ordered by id
//! - insert/delete: rely on FK and CHECK constraints, no check-then-insert
//! - seed: once per database (tracked in seed_history), single transaction,
//!   sequences only ever move forward

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use trivia_core::{Category, CategoryId, NewQuestion, Question, QuestionId};

use super::pool::create_pool;
use super::schema::ensure_schema;
use super::store::{StoreError, StoreResult, TriviaStore};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// Key recorded in seed_history for the bundled dataset
const SEED_DATASET: &str = "bundled";

/// Store backed by a sqlx PgPool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the tables exist.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = create_pool(database_url, max_connections).await?;
        ensure_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_questions(
        &self,
        sql: &str,
        bind: Option<QuestionBind<'_>>,
    ) -> StoreResult<Vec<Question>> {
        let query = sqlx::query(sql);
        let query = match bind {
            Some(QuestionBind::Category(id)) => query.bind(id),
            Some(QuestionBind::Pattern(pattern)) => query.bind(pattern),
            None => query,
        };
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(question_from_row).collect())
    }
}

enum QuestionBind<'a> {
    Category(CategoryId),
    Pattern(&'a str),
}

fn question_from_row(row: &PgRow) -> Question {
    Question {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get("category"),
        difficulty: row.get("difficulty"),
    }
}

fn category_from_row(row: &PgRow) -> Category {
    Category {
        id: row.get("id"),
        kind: row.get("type"),
    }
}

/// Constraint violations become `Rejected`, everything else stays a driver error.
fn classify_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
            return StoreError::Rejected(db_err.message().to_owned());
        }
    }
    StoreError::Sqlx(err)
}

/// Escape LIKE metacharacters so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(category_from_row).collect())
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let row = sqlx::query("SELECT id, type FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(category_from_row))
    }

    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id");
        self.fetch_questions(&sql, None).await
    }

    async fn questions_in_category(&self, category: CategoryId) -> StoreResult<Vec<Question>> {
        let sql =
            format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE category = $1 ORDER BY id");
        self.fetch_questions(&sql, Some(QuestionBind::Category(category)))
            .await
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let pattern = like_pattern(term);
        let sql = format!(
            r"SELECT {QUESTION_COLUMNS} FROM questions
              WHERE question ILIKE $1 ESCAPE '\'
              ORDER BY id"
        );
        self.fetch_questions(&sql, Some(QuestionBind::Pattern(&pattern)))
            .await
    }

    async fn get_question(&self, id: QuestionId) -> StoreResult<Option<Question>> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(question_from_row))
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<QuestionId> {
        let row = sqlx::query(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(question.question())
        .bind(question.answer())
        .bind(question.category())
        .bind(question.difficulty())
        .fetch_one(&self.pool)
        .await
        .map_err(classify_write_error)?;

        Ok(row.get("id"))
    }

    async fn delete_question(&self, id: QuestionId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify_write_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn seed(&self, categories: &[Category], questions: &[Question]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let claim = sqlx::query(
            "INSERT INTO seed_history (dataset) VALUES ($1) ON CONFLICT (dataset) DO NOTHING",
        )
        .bind(SEED_DATASET)
        .execute(&mut *tx)
        .await?;

        if claim.rows_affected() == 0 {
            tx.rollback().await?;
            tracing::info!("Trivia tables already seeded, skipping");
            return Ok(());
        }

        for category in categories {
            sqlx::query(
                "INSERT INTO categories (id, type) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
            )
            .bind(category.id)
            .bind(&category.kind)
            .execute(&mut *tx)
            .await?;
        }

        for q in questions {
            sqlx::query(
                r#"
                INSERT INTO questions (id, question, answer, category, difficulty)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(q.id)
            .bind(&q.question)
            .bind(&q.answer)
            .bind(q.category)
            .bind(q.difficulty)
            .execute(&mut *tx)
            .await
            .map_err(classify_write_error)?;
        }

        // Explicit ids bypass the SERIAL sequences.
        for table in ["categories", "questions"] {
            advance_sequence(&mut tx, table).await?;
        }

        tx.commit().await?;
        tracing::info!(
            categories = categories.len(),
            questions = questions.len(),
            "Seeded trivia tables"
        );
        Ok(())
    }
}

/// Move `table`'s id sequence past its highest row. Never moves it back.
async fn advance_sequence(tx: &mut Transaction<'_, Postgres>, table: &str) -> StoreResult<()> {
    let sequence: Option<String> = sqlx::query_scalar("SELECT pg_get_serial_sequence($1, 'id')")
        .bind(table)
        .fetch_one(&mut **tx)
        .await?;
    let Some(sequence) = sequence else {
        return Ok(());
    };

    let max_id: Option<i32> = sqlx::query_scalar(&format!("SELECT MAX(id) FROM {table}"))
        .fetch_one(&mut **tx)
        .await?;
    let (last_value, is_called): (i64, bool) =
        sqlx::query_as(&format!("SELECT last_value, is_called FROM {sequence}"))
            .fetch_one(&mut **tx)
            .await?;

    let handed_out = if is_called { last_value } else { last_value - 1 };
    let floor = next_sequence_floor(handed_out, max_id);
    if floor > handed_out {
        sqlx::query("SELECT setval($1::regclass, $2, true)")
            .bind(&sequence)
            .bind(floor)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Last id the sequence should report as used: at least everything already
/// handed out and every id present in the table.
fn next_sequence_floor(handed_out: i64, max_id: Option<i32>) -> i64 {
    handed_out.max(max_id.map(i64::from).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_floor_never_goes_backwards() {
        // Ids above the seeded range were handed out and then deleted.
        assert_eq!(next_sequence_floor(25, Some(23)), 25);
        assert_eq!(next_sequence_floor(0, Some(23)), 23);
        assert_eq!(next_sequence_floor(0, None), 0);
    }

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("peanut"), "%peanut%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern(r"c:\"), r"%c:\\%");
    }

    // Integration tests - run with DATABASE_URL set
    // cargo test -p trivia-server -- --ignored

    async fn seeded_store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let store = PgStore::connect(&url, 2).await.expect("connect failed");
        store
            .seed(&trivia_core::seed::categories(), &trivia_core::seed::questions())
            .await
            .expect("seed failed");
        store
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_is_case_insensitive() {
        let store = seeded_store().await;
        let found = store.search_questions("PEANUT").await.unwrap();
        assert!(found.iter().any(|q| q.id == 12));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_delete_round_trip() {
        let store = seeded_store().await;
        let new = NewQuestion::new("Temporary?", "Yes", 1, 1).unwrap();
        let id = store.insert_question(new).await.unwrap();
        assert!(id > 23);

        assert!(store.delete_question(id).await.unwrap());
        assert!(!store.delete_question(id).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unknown_category_is_rejected() {
        let store = seeded_store().await;
        let new = NewQuestion::new("Orphan?", "Yes", 9999, 1).unwrap();
        let err = store.insert_question(new).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn reseeding_does_not_reuse_deleted_ids() {
        let store = seeded_store().await;
        let first = store
            .insert_question(NewQuestion::new("Reseed A?", "Yes", 1, 1).unwrap())
            .await
            .unwrap();
        let second = store
            .insert_question(NewQuestion::new("Reseed B?", "Yes", 1, 1).unwrap())
            .await
            .unwrap();

        store.delete_question(first).await.unwrap();
        store.delete_question(second).await.unwrap();
        store.delete_question(23).await.unwrap();

        store
            .seed(&trivia_core::seed::categories(), &trivia_core::seed::questions())
            .await
            .unwrap();

        let next = store
            .insert_question(NewQuestion::new("Reseed C?", "Yes", 1, 1).unwrap())
            .await
            .unwrap();
        assert!(next > second, "id {next} handed out again");
        assert!(store.get_question(23).await.unwrap().is_none());

        store.delete_question(next).await.unwrap();
    }
}
