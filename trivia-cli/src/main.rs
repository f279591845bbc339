//! trivia CLI - run and manage the trivia game backend
//!
//! - `serve`: HTTP API over PostgreSQL or an in-memory store
//! - `seed`: load the bundled questions into PostgreSQL
//! - `config`: inspect the resolved configuration

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "trivia",
    author,
    version,
    about = "Trivia game backend: questions, categories, search and quizzes over HTTP"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Load the bundled categories and questions into PostgreSQL
    Seed(commands::seed::SeedArgs),
    /// Inspect configuration (path, show)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be applied before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(err) = init_tracing(&TracingConfig { debug: cli.debug }) {
        eprintln!("warning: logging disabled: {err}");
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
        Commands::Config(args) => config::run_config(args)?,
    }
    Ok(())
}
