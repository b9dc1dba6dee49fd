// ABOUTME: Integration tests for pool setup and migrations
// ABOUTME: Verifies file creation, schema presence, and foreign key enforcement

use quill_storage::{connect_in_memory, init_pool, map_unique_violation, StorageError};

async fn table_names(pool: &sqlx::SqlitePool) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT IN ('_sqlx_migrations', 'sqlite_sequence')
         ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_in_memory_pool_has_schema() {
    let pool = connect_in_memory().await.unwrap();
    let tables = table_names(&pool).await;

    for expected in ["comments", "contact_messages", "posts", "sessions", "users"] {
        assert!(
            tables.iter().any(|t| t == expected),
            "missing table {expected}, got {tables:?}"
        );
    }
}

#[tokio::test]
async fn test_init_pool_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("quill.db");

    let pool = init_pool(&path).await.unwrap();
    assert!(path.exists());

    let tables = table_names(&pool).await;
    assert!(tables.iter().any(|t| t == "posts"));
    pool.close().await;
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = connect_in_memory().await.unwrap();
    quill_storage::run_migrations(&pool).await.unwrap();
}

#[tokio::test]
async fn test_foreign_keys_are_enforced() {
    let pool = connect_in_memory().await.unwrap();

    let result = sqlx::query(
        "INSERT INTO comments (text, author_id, post_id, created_at, updated_at)
         VALUES ('orphan', NULL, 999, datetime('now'), datetime('now'))",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_unique_violation_maps_to_duplicate() {
    let pool = connect_in_memory().await.unwrap();

    let insert = "INSERT INTO users (email, name, password_hash, created_at, updated_at)
                  VALUES ('ada@example.com', 'Ada', 'x', datetime('now'), datetime('now'))";
    sqlx::query(insert).execute(&pool).await.unwrap();
    let err = sqlx::query(insert).execute(&pool).await.unwrap_err();

    match map_unique_violation(err, "Email already registered") {
        StorageError::Duplicate(message) => assert_eq!(message, "Email already registered"),
        other => panic!("expected Duplicate, got {other:?}"),
    }
}
