//! Table setup for the trivia schema

use sqlx::PgPool;

/// Create the categories, questions and seed_history tables if they are missing
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring trivia tables exist...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            type TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id SERIAL PRIMARY KEY,
            question TEXT NOT NULL CHECK (question <> ''),
            answer TEXT NOT NULL CHECK (answer <> ''),
            category INTEGER NOT NULL REFERENCES categories(id),
            difficulty INTEGER NOT NULL CHECK (difficulty > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category)")
        .execute(pool)
        .await?;

    // One row per dataset ever loaded; deleted seed rows must stay deleted.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS seed_history (
            dataset TEXT PRIMARY KEY,
            seeded_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Trivia tables ready");
    Ok(())
}
