// ABOUTME: Contact message storage using SQLite
// ABOUTME: Records messages from the contact form and lists them for admins

use chrono::Utc;
use quill_core::{normalize_email, validate_contact_message, validate_email, validate_name};
use quill_storage::StorageError;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{ContactInput, ContactMessage};

pub struct ContactStorage {
    pool: SqlitePool,
}

impl ContactStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a message sent by `user_id`
    pub async fn create_message(
        &self,
        user_id: i64,
        input: ContactInput,
    ) -> Result<ContactMessage, StorageError> {
        validate_name(&input.name)?;
        validate_email(&input.email)?;
        validate_contact_message(&input.message)?;

        // Blank phone numbers are treated as absent
        let phone = input
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        let now = Utc::now();

        debug!("Storing contact message from user {}", user_id);

        let result = sqlx::query(
            r#"
            INSERT INTO contact_messages (user_id, name, email, phone, message, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(input.name.trim())
        .bind(normalize_email(&input.email))
        .bind(phone)
        .bind(input.message.trim())
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_message(result.last_insert_rowid()).await
    }

    pub async fn get_message(&self, message_id: i64) -> Result<ContactMessage, StorageError> {
        let row = sqlx::query(
            "SELECT id, user_id, name, email, phone, message, created_at
             FROM contact_messages WHERE id = ?",
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound("Contact message"))?;

        row_to_message(&row)
    }

    /// List messages, newest first. Returns the page and the total count.
    pub async fn list_messages(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<(Vec<ContactMessage>, i64), StorageError> {
        debug!(
            "Fetching contact messages (limit: {:?}, offset: {:?})",
            limit, offset
        );

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(
            "SELECT id, user_id, name, email, phone, message, created_at
             FROM contact_messages
             ORDER BY id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;

        let messages = rows
            .iter()
            .map(row_to_message)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((messages, total))
    }
}

fn row_to_message(row: &sqlx::sqlite::SqliteRow) -> Result<ContactMessage, StorageError> {
    Ok(ContactMessage {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        message: row.try_get("message")?,
        created_at: row.try_get("created_at")?,
    })
}
