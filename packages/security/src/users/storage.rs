// ABOUTME: User storage layer using SQLite
// ABOUTME: Registration, credential checks, account updates, and admin flags

use chrono::Utc;
use quill_core::{
    normalize_email, validate_email, validate_name, validate_password, ValidationError,
};
use quill_storage::{map_unique_violation, StorageError};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::{debug, warn};

use super::types::{AccountUpdateInput, LoginFailure, User, UserCreateInput};
use crate::password::{hash_password, verify_password};

/// Message shown when someone registers with an email that already has an account
pub const DUPLICATE_EMAIL_MESSAGE: &str =
    "You've already signed up with that email, log in instead!";

pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new user.
    ///
    /// The first account ever created becomes the admin; the check and the
    /// insert happen in one statement.
    pub async fn create_user(&self, input: UserCreateInput) -> Result<User, StorageError> {
        validate_email(&input.email)?;
        validate_name(&input.name)?;
        validate_password(&input.password)?;

        let email = normalize_email(&input.email);
        let password_hash =
            hash_password(&input.password).map_err(|e| StorageError::PasswordHash(e.to_string()))?;
        let now = Utc::now();

        debug!("Creating user: {}", email);

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, name, password_hash, is_admin, created_at, updated_at)
            VALUES (?, ?, ?, (SELECT COUNT(*) FROM users) = 0, ?, ?)
            "#,
        )
        .bind(&email)
        .bind(input.name.trim())
        .bind(&password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_EMAIL_MESSAGE))?;

        self.get_user(result.last_insert_rowid()).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User, StorageError> {
        debug!("Fetching user: {}", user_id);

        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound("User"))?;

        row_to_user(&row)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_user).collect()
    }

    /// Check an email/password pair
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, LoginFailure> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(LoginFailure::UnknownEmail)?;

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => Err(LoginFailure::WrongPassword),
            Err(e) => {
                warn!(user_id = user.id, error = %e, "Stored password hash could not be parsed");
                Err(LoginFailure::WrongPassword)
            }
        }
    }

    /// Change a user's display name and/or password
    pub async fn update_account(
        &self,
        user_id: i64,
        input: AccountUpdateInput,
    ) -> Result<User, StorageError> {
        debug!("Updating account for user: {}", user_id);

        if input.name.is_none() && input.password.is_none() {
            return Err(ValidationError::NothingToUpdate.into());
        }

        // Column names are literals; values go through push_bind
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(name) = &input.name {
            validate_name(name)?;
            query_builder.push(", name = ");
            query_builder.push_bind(name.trim().to_string());
        }
        if let Some(password) = &input.password {
            validate_password(password)?;
            let password_hash =
                hash_password(password).map_err(|e| StorageError::PasswordHash(e.to_string()))?;
            query_builder.push(", password_hash = ");
            query_builder.push_bind(password_hash);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(user_id);

        let result = query_builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("User"));
        }

        self.get_user(user_id).await
    }

    pub async fn set_admin(&self, user_id: i64, is_admin: bool) -> Result<User, StorageError> {
        debug!("Setting is_admin={} for user: {}", is_admin, user_id);

        let result = sqlx::query("UPDATE users SET is_admin = ?, updated_at = ? WHERE id = ?")
            .bind(is_admin)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("User"));
        }

        self.get_user(user_id).await
    }

    pub async fn count_admins(&self) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_admin = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, StorageError> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        password_hash: row.try_get("password_hash")?,
        is_admin: row.try_get("is_admin")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
