pub mod sessions;
pub mod users;

use colored::*;
use quill_cli::Config;
use quill_storage::{init_pool, MIGRATOR};
use sqlx::SqlitePool;

/// Open the configured database; opening also applies pending migrations
pub async fn open_database(config: &Config) -> anyhow::Result<SqlitePool> {
    Ok(init_pool(&config.database_path).await?)
}

pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    let pool = open_database(config).await?;

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
        .fetch_one(&pool)
        .await?;

    println!(
        "{} Database ready at {}",
        "✓".green().bold(),
        config.database_path.display().to_string().cyan()
    );
    println!(
        "  {} of {} migrations applied",
        applied,
        MIGRATOR.iter().count()
    );

    pool.close().await;
    Ok(())
}
