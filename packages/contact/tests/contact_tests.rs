// ABOUTME: Integration tests for contact message storage
// ABOUTME: Checks validation, phone handling, and newest-first listing

use pretty_assertions::assert_eq;
use quill_contact::{ContactInput, ContactStorage};
use quill_security::{UserCreateInput, UserStorage};
use quill_storage::{connect_in_memory, StorageError};

async fn setup() -> (ContactStorage, i64) {
    let pool = connect_in_memory().await.unwrap();
    let user = UserStorage::new(pool.clone())
        .create_user(UserCreateInput {
            email: "reader@example.com".to_string(),
            name: "Reader".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();

    (ContactStorage::new(pool), user.id)
}

fn input(message: &str, phone: Option<&str>) -> ContactInput {
    ContactInput {
        name: "Reader".to_string(),
        email: "Reader@Example.com".to_string(),
        phone: phone.map(str::to_string),
        message: message.to_string(),
    }
}

#[tokio::test]
async fn test_create_message() {
    let (storage, user_id) = setup().await;

    let stored = storage
        .create_message(user_id, input("Love the blog", Some(" 555-0100 ")))
        .await
        .unwrap();

    assert_eq!(stored.user_id, Some(user_id));
    assert_eq!(stored.email, "reader@example.com");
    assert_eq!(stored.phone.as_deref(), Some("555-0100"));
    assert_eq!(stored.message, "Love the blog");
}

#[tokio::test]
async fn test_blank_phone_is_stored_as_none() {
    let (storage, user_id) = setup().await;

    let stored = storage
        .create_message(user_id, input("Hi", Some("   ")))
        .await
        .unwrap();
    assert_eq!(stored.phone, None);
}

#[tokio::test]
async fn test_invalid_message_is_rejected() {
    let (storage, user_id) = setup().await;

    let err = storage.create_message(user_id, input("", None)).await.unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));

    let mut bad_email = input("Hi", None);
    bad_email.email = "nope".to_string();
    let err = storage.create_message(user_id, bad_email).await.unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[tokio::test]
async fn test_list_messages_newest_first() {
    let (storage, user_id) = setup().await;

    for message in ["one", "two", "three"] {
        storage
            .create_message(user_id, input(message, None))
            .await
            .unwrap();
    }

    let (page, total) = storage.list_messages(Some(2), Some(0)).await.unwrap();
    assert_eq!(total, 3);
    let texts: Vec<_> = page.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(texts, vec!["three", "two"]);
}
