//! rfplens CLI
//!
//! Ingest RFP PDFs and ask questions against them from the terminal.

use anyhow::Result;
use clap::Parser;
use rfplens_core::config::Config;
use rfplens_core::db::Database;
use std::sync::{Arc, Mutex};

mod app;
mod commands;

use app::{Cli, Commands};

/// Handles shared by every command
pub struct AppContext {
    pub db: Arc<Mutex<Database>>,
    pub config: Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    let config = Config::load()?;

    // Open database (use RFPLENS_DB env var if set, otherwise use default)
    let db_path = std::env::var("RFPLENS_DB")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| Database::default_path());
    let db = Database::open(&db_path)?;
    db.initialize()?;

    let ctx = AppContext {
        db: Arc::new(Mutex::new(db)),
        config,
    };

    let result = match cli.command {
        Commands::Ingest(args) => commands::ingest::run(args, &ctx).await,
        Commands::Ask(args) => commands::ask::run(args, &ctx).await,
        Commands::Chat(args) => commands::chat::run(args, &ctx).await,
        Commands::Brief(args) => commands::brief::run(args, &ctx).await,
        Commands::Report(args) => commands::report::run(args).await,
        Commands::Status => commands::status::run(&ctx).await,
    };

    if let Err(ref err) = result {
        if let Some(core_err) = err.downcast_ref::<rfplens_core::RfpLensError>() {
            eprintln!("Error: {}", core_err);
            std::process::exit(core_err.exit_code());
        }
    }

    result
}
