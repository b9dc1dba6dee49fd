// ABOUTME: `quill sessions` subcommands
// ABOUTME: Housekeeping for server-side login sessions

use clap::Subcommand;
use colored::*;
use quill_cli::Config;
use quill_security::SessionStorage;

use super::open_database;

#[derive(Subcommand)]
pub enum SessionsCommands {
    /// Delete sessions that have expired
    Purge,
}

pub async fn handle_sessions_command(
    command: SessionsCommands,
    config: &Config,
) -> anyhow::Result<()> {
    match command {
        SessionsCommands::Purge => purge(config).await,
    }
}

async fn purge(config: &Config) -> anyhow::Result<()> {
    let pool = open_database(config).await?;
    let purged = SessionStorage::new(pool.clone()).purge_expired().await?;

    if purged == 0 {
        println!("{}", "No expired sessions".dimmed());
    } else {
        println!(
            "{} Removed {} expired session(s)",
            "✓".green().bold(),
            purged.to_string().cyan()
        );
    }

    pool.close().await;
    Ok(())
}
