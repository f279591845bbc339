//! PostgreSQL pool construction

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Open a pool capped at `max_connections`.
///
/// The limit comes from `[database] max_connections`.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "Opening PostgreSQL pool");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
