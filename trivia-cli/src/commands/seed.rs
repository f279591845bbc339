//! Seed command: load the bundled dataset into PostgreSQL

use anyhow::{Context, Result};
use clap::Parser;
use trivia_core::{seed, TriviaConfig};
use trivia_server::{PgStore, TriviaStore};

use super::MISSING_DATABASE_URL;

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let config = TriviaConfig::load().context("Failed to load config")?;
    let database_url = args
        .database_url
        .or_else(|| config.database_url())
        .context(MISSING_DATABASE_URL)?;

    let store = PgStore::connect(&database_url, config.database.max_connections)
        .await
        .context("Failed to connect to database")?;

    let categories = seed::categories();
    let questions = seed::questions();
    store
        .seed(&categories, &questions)
        .await
        .context("Failed to seed database")?;

    println!(
        "Seeded {} categories and {} questions",
        categories.len(),
        questions.len()
    );
    Ok(())
}
