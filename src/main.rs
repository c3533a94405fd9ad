//! qpress - one-page quick submission for journal editorial workflows
//!
//! CLI binary driving the quick submission flow against a JSON-backed
//! journal store.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "qpress")]
#[command(about = "One-page quick submission for journal editorial workflows")]
#[command(version)]
struct Cli {
    /// Path to the journal state file
    #[arg(short, long, global = true, default_value = "journal.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the quick submission flow from an article input file
    Submit {
        /// Article input file (JSON form fields)
        article: PathBuf,

        /// Acting editor's user id
        #[arg(long, default_value_t = 1)]
        user: i64,
    },

    /// List the journal's issues grouped future/current/back
    Issues,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit { article, user } => {
            cli::run_submit(&cli.store, &article, user).await?;
        }
        Commands::Issues => {
            cli::run_issues(&cli.store).await?;
        }
    }

    Ok(())
}
