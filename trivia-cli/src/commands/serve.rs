//! HTTP server command
//!
//! Runs the trivia API against PostgreSQL, or against an in-memory store
//! for local play and demos.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use trivia_core::{seed, TriviaConfig};
use trivia_server::http::{run_server, ServerConfig};
use trivia_server::{MemoryStore, PgStore, TriviaStore};

use super::MISSING_DATABASE_URL;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: [server] bind from config, else 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Keep data in memory instead of PostgreSQL; lost on exit
    #[arg(long)]
    pub in_memory: bool,

    /// Load the bundled dataset before serving
    #[arg(long)]
    pub seed: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = TriviaConfig::load().context("Failed to load config")?;
    let bind_addr = args.bind.unwrap_or(config.server.bind);

    let store: Arc<dyn TriviaStore> = if args.in_memory {
        tracing::info!(seeded = args.seed, "Using in-memory store");
        if args.seed {
            Arc::new(MemoryStore::seeded())
        } else {
            Arc::new(MemoryStore::new())
        }
    } else {
        let database_url = args
            .database_url
            .or_else(|| config.database_url())
            .context(MISSING_DATABASE_URL)?;

        let store = PgStore::connect(&database_url, config.database.max_connections)
            .await
            .context("Failed to connect to database")?;

        if args.seed {
            store
                .seed(&seed::categories(), &seed::questions())
                .await
                .context("Failed to seed database")?;
        }
        Arc::new(store)
    };

    tracing::info!("Starting trivia server on {}", bind_addr);

    // Blocks until shutdown
    run_server(store, ServerConfig { bind_addr })
        .await
        .context("Server error")?;

    Ok(())
}
