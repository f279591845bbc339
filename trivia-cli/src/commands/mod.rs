//! Command implementations for the trivia CLI

pub mod seed;
pub mod serve;

pub use seed::run_seed;
pub use serve::run_serve;

/// Shown when no database URL was given by flag, env, .env or config
pub(crate) const MISSING_DATABASE_URL: &str = "DATABASE_URL not set. \
    Set via --database-url, DATABASE_URL env, .env, or [database] url in config";
