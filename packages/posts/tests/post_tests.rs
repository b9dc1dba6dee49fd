// ABOUTME: Integration tests for post storage
// ABOUTME: Exercises create, list, edit, delete, and title uniqueness against SQLite

use pretty_assertions::assert_eq;
use quill_posts::{PostInput, PostStorage};
use quill_security::{UserCreateInput, UserStorage};
use quill_storage::{connect_in_memory, StorageError};
use sqlx::SqlitePool;

async fn setup() -> (SqlitePool, PostStorage, i64, i64) {
    let pool = connect_in_memory().await.unwrap();
    let users = UserStorage::new(pool.clone());

    let admin = users
        .create_user(UserCreateInput {
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();
    let editor = users
        .create_user(UserCreateInput {
            email: "editor@example.com".to_string(),
            name: "Editor".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();

    (pool.clone(), PostStorage::new(pool), admin.id, editor.id)
}

fn post_input(title: &str) -> PostInput {
    PostInput {
        title: title.to_string(),
        subtitle: "A subtitle".to_string(),
        body: "<p>Hello world</p>".to_string(),
        img_url: "https://images.example.com/cover.jpg".to_string(),
    }
}

#[tokio::test]
async fn test_create_post_stamps_date_and_author() {
    let (_pool, storage, admin_id, _) = setup().await;

    let post = storage
        .create_post(admin_id, post_input("First Post"))
        .await
        .unwrap();

    assert_eq!(post.title, "First Post");
    assert_eq!(post.author_id, Some(admin_id));
    assert_eq!(post.author_name.as_deref(), Some("Admin"));
    assert_eq!(post.body, "<p>Hello world</p>");
    assert_eq!(post.date, quill_core::format_post_date(post.created_at));
}

#[tokio::test]
async fn test_list_posts_newest_first_with_total() {
    let (_pool, storage, admin_id, _) = setup().await;

    for title in ["One", "Two", "Three"] {
        storage.create_post(admin_id, post_input(title)).await.unwrap();
    }

    let (page, total) = storage.list_posts_paginated(Some(2), Some(0)).await.unwrap();
    assert_eq!(total, 3);
    let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Three", "Two"]);

    let (rest, _) = storage.list_posts_paginated(Some(2), Some(2)).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].title, "One");

    let (all, _) = storage.list_posts_paginated(None, None).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_duplicate_title_is_rejected() {
    let (_pool, storage, admin_id, _) = setup().await;
    storage.create_post(admin_id, post_input("Same")).await.unwrap();

    let err = storage
        .create_post(admin_id, post_input("Same"))
        .await
        .unwrap_err();
    match err {
        StorageError::Duplicate(message) => assert!(message.contains("Same")),
        other => panic!("expected Duplicate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_post_is_rejected() {
    let (_pool, storage, admin_id, _) = setup().await;

    let mut input = post_input("Bad image");
    input.img_url = "not a url".to_string();

    let err = storage.create_post(admin_id, input).await.unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[tokio::test]
async fn test_update_post_sets_editor_as_author() {
    let (_pool, storage, admin_id, editor_id) = setup().await;
    let post = storage.create_post(admin_id, post_input("Draft")).await.unwrap();

    let mut input = post_input("Final");
    input.body = "<p>Edited</p>".to_string();
    let updated = storage.update_post(post.id, editor_id, input).await.unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.body, "<p>Edited</p>");
    assert_eq!(updated.author_id, Some(editor_id));
    assert_eq!(updated.author_name.as_deref(), Some("Editor"));
    assert_eq!(updated.date, post.date);
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let (_pool, storage, admin_id, _) = setup().await;

    let err = storage
        .update_post(999, admin_id, post_input("Ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound("Post")));
}

#[tokio::test]
async fn test_delete_post_cascades_comments() {
    let (pool, storage, admin_id, _) = setup().await;
    let post = storage.create_post(admin_id, post_input("Doomed")).await.unwrap();

    sqlx::query(
        "INSERT INTO comments (text, author_id, post_id, created_at, updated_at)
         VALUES ('hi', ?, ?, datetime('now'), datetime('now'))",
    )
    .bind(admin_id)
    .bind(post.id)
    .execute(&pool)
    .await
    .unwrap();

    storage.delete_post(post.id).await.unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert!(matches!(
        storage.get_post(post.id).await,
        Err(StorageError::NotFound("Post"))
    ));
    assert!(matches!(
        storage.delete_post(post.id).await,
        Err(StorageError::NotFound("Post"))
    ));
}

#[tokio::test]
async fn test_author_removal_keeps_post() {
    let (pool, storage, admin_id, editor_id) = setup().await;
    let post = storage.create_post(editor_id, post_input("Orphan")).await.unwrap();
    assert_ne!(admin_id, editor_id);

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(editor_id)
        .execute(&pool)
        .await
        .unwrap();

    let post = storage.get_post(post.id).await.unwrap();
    assert_eq!(post.author_id, None);
    assert_eq!(post.author_name, None);
}
