//! trivia-server: HTTP backend for the trivia game
//!
//! Serves categories and questions, paginated listings, text search,
//! question creation and deletion, and a quiz endpoint that picks an
//! unseen question at random. Persistence sits behind [`db::TriviaStore`].

pub mod db;
pub mod http;

pub use db::{MemoryStore, PgStore, StoreError, TriviaStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
