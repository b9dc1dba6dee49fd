use clap::{Parser, Subcommand};
use colored::*;
use std::net::IpAddr;
use std::path::PathBuf;
use std::process;

mod cli;

use cli::sessions::SessionsCommands;
use cli::users::UsersCommands;
use quill_cli::logging::init_logging;
use quill_cli::{run_server, Config};

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Quill - a small blog with posts, comments, and accounts")]
#[command(version)]
struct Cli {
    /// Database file (overrides QUILL_DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Debug logging for Quill and HTTP requests (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind (overrides QUILL_HOST)
        #[arg(long)]
        host: Option<IpAddr>,
        /// Port to listen on (overrides QUILL_PORT)
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        port: Option<u16>,
    },
    /// Create the database if needed and apply pending migrations
    Migrate,
    /// Manage user accounts
    #[command(subcommand)]
    Users(UsersCommands),
    /// Manage login sessions
    #[command(subcommand)]
    Sessions(SessionsCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = handle_command(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            run_server(config).await
        }
        Commands::Migrate => cli::migrate(&config).await,
        Commands::Users(users_cmd) => cli::users::handle_users_command(users_cmd, &config).await,
        Commands::Sessions(sessions_cmd) => {
            cli::sessions::handle_sessions_command(sessions_cmd, &config).await
        }
    }
}
