// ABOUTME: `quill users` subcommands
// ABOUTME: Lists accounts and grants or revokes admin access from the terminal

use anyhow::{anyhow, bail};
use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use quill_cli::Config;
use quill_core::{format_post_date, truncate};
use quill_security::{User, UserStorage};

use super::open_database;

#[derive(Subcommand)]
pub enum UsersCommands {
    /// List all registered users
    List,
    /// Grant admin access to a user
    Promote {
        /// Email address of the account
        email: String,
    },
    /// Revoke admin access from a user
    Demote {
        /// Email address of the account
        email: String,
    },
}

pub async fn handle_users_command(command: UsersCommands, config: &Config) -> anyhow::Result<()> {
    let pool = open_database(config).await?;
    let storage = UserStorage::new(pool.clone());

    let result = match command {
        UsersCommands::List => list_users(&storage).await,
        UsersCommands::Promote { email } => set_admin(&storage, &email, true).await,
        UsersCommands::Demote { email } => set_admin(&storage, &email, false).await,
    };

    pool.close().await;
    result
}

async fn list_users(storage: &UserStorage) -> anyhow::Result<()> {
    let users = storage.list_users().await?;

    if users.is_empty() {
        println!("{}", "No users found".yellow());
        println!(
            "{}",
            "The first account registered through the API becomes the admin".dimmed()
        );
        return Ok(());
    }

    println!("{}", "Quill Users".blue().bold());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Name", "Email", "Admin", "Joined"]);

    for user in &users {
        table.add_row(vec![
            user.id.to_string(),
            truncate(&user.name, 25),
            truncate(&user.email, 40),
            if user.is_admin { "yes" } else { "" }.to_string(),
            format_post_date(user.created_at),
        ]);
    }

    println!("{}", table);
    println!("Total: {} users", users.len().to_string().cyan());

    Ok(())
}

async fn find_user(storage: &UserStorage, email: &str) -> anyhow::Result<User> {
    storage
        .find_by_email(email)
        .await?
        .ok_or_else(|| anyhow!("No user with email '{}'", email))
}

async fn set_admin(storage: &UserStorage, email: &str, is_admin: bool) -> anyhow::Result<()> {
    let user = find_user(storage, email).await?;

    if user.is_admin == is_admin {
        let state = if is_admin { "already an admin" } else { "not an admin" };
        println!("{} {} is {}", "•".dimmed(), user.email, state);
        return Ok(());
    }

    if !is_admin && storage.count_admins().await? <= 1 {
        bail!("{} is the only admin; promote someone else first", user.email);
    }

    let user = storage.set_admin(user.id, is_admin).await?;
    let verb = if user.is_admin { "promoted to admin" } else { "demoted" };
    println!("{} {} {}", "✓".green().bold(), user.email.cyan(), verb);

    Ok(())
}
