//! Database layer - the store contract and its implementations
//!
//! # Design Principles
//!
//! - Handlers only see the [`TriviaStore`] trait and plain records
//! - PostgreSQL through a sqlx connection pool, no long-lived sessions
//! - Rely on DB constraints for writes, surface violations as `Rejected`
//! - Transactions for multi-step operations (seeding)

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod store;

pub use memory::MemoryStore;
pub use pool::create_pool;
pub use postgres::PgStore;
pub use store::{StoreError, StoreResult, TriviaStore};
