use quill_core::ValidationError;
use thiserror::Error;

/// Storage errors shared by every Quill storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Duplicate(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
    #[error("Session lifetime is out of range")]
    SessionLifetime,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Turn a UNIQUE constraint failure into `StorageError::Duplicate`, pass anything else through
pub fn map_unique_violation(err: sqlx::Error, message: impl Into<String>) -> StorageError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StorageError::Duplicate(message.into())
        }
        _ => StorageError::Sqlx(err),
    }
}
