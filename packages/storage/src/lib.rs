// ABOUTME: Data layer and persistence for Quill
// ABOUTME: Storage errors, SQLite pool setup, and embedded schema migrations

pub mod db;
pub mod error;

pub use db::{connect_in_memory, init_pool, run_migrations, MIGRATOR};
pub use error::{map_unique_violation, StorageError, StorageResult};
