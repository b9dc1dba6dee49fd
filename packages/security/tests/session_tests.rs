// ABOUTME: Integration tests for session storage
// ABOUTME: Covers issuing, resolving, expiry, revocation, and cascade on user removal

use chrono::Duration;
use quill_security::{SessionStorage, UserCreateInput, UserStorage};
use quill_storage::{connect_in_memory, StorageError};
use sqlx::SqlitePool;

async fn setup() -> (SqlitePool, SessionStorage, i64) {
    let pool = connect_in_memory().await.unwrap();
    let users = UserStorage::new(pool.clone());
    let user = users
        .create_user(UserCreateInput {
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();

    (pool.clone(), SessionStorage::new(pool), user.id)
}

#[tokio::test]
async fn test_create_and_resolve_session() {
    let (_pool, sessions, user_id) = setup().await;

    let issued = sessions
        .create_session(user_id, Duration::hours(1))
        .await
        .unwrap();
    let resolved = sessions.resolve(&issued.token).await.unwrap().unwrap();

    assert_eq!(resolved.id, issued.session.id);
    assert_eq!(resolved.user_id, user_id);
    assert!(resolved.last_seen_at >= issued.session.last_seen_at);
}

#[tokio::test]
async fn test_plaintext_token_is_not_stored() {
    let (pool, sessions, user_id) = setup().await;

    let issued = sessions
        .create_session(user_id, Duration::hours(1))
        .await
        .unwrap();

    let stored: String = sqlx::query_scalar("SELECT token_hash FROM sessions WHERE id = ?")
        .bind(&issued.session.id)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_ne!(stored, issued.token);
    assert_eq!(stored, SessionStorage::hash_token(&issued.token));
}

#[tokio::test]
async fn test_unknown_token_resolves_to_none() {
    let (_pool, sessions, _user_id) = setup().await;
    assert!(sessions.resolve("not-a-real-token").await.unwrap().is_none());
}

#[tokio::test]
async fn test_expired_session_resolves_to_none_and_is_purged() {
    let (_pool, sessions, user_id) = setup().await;

    let expired = sessions
        .create_session(user_id, Duration::seconds(-5))
        .await
        .unwrap();
    let live = sessions
        .create_session(user_id, Duration::hours(1))
        .await
        .unwrap();

    assert!(sessions.resolve(&expired.token).await.unwrap().is_none());

    let purged = sessions.purge_expired().await.unwrap();
    assert_eq!(purged, 1);
    assert_eq!(sessions.count_for_user(user_id).await.unwrap(), 1);
    assert!(sessions.resolve(&live.token).await.unwrap().is_some());
}

#[tokio::test]
async fn test_revoke_session() {
    let (_pool, sessions, user_id) = setup().await;

    let issued = sessions
        .create_session(user_id, Duration::hours(1))
        .await
        .unwrap();

    assert!(sessions.revoke(&issued.token).await.unwrap());
    assert!(!sessions.revoke(&issued.token).await.unwrap());
    assert!(sessions.resolve(&issued.token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_revoke_all_for_user_keeps_current_session() {
    let (_pool, sessions, user_id) = setup().await;

    let current = sessions
        .create_session(user_id, Duration::hours(1))
        .await
        .unwrap();
    let other = sessions
        .create_session(user_id, Duration::hours(1))
        .await
        .unwrap();

    let revoked = sessions
        .revoke_all_for_user(user_id, Some(&current.session.id))
        .await
        .unwrap();

    assert_eq!(revoked, 1);
    assert!(sessions.resolve(&current.token).await.unwrap().is_some());
    assert!(sessions.resolve(&other.token).await.unwrap().is_none());

    assert_eq!(sessions.revoke_all_for_user(user_id, None).await.unwrap(), 1);
    assert_eq!(sessions.count_for_user(user_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_sessions_cascade_when_user_is_deleted() {
    let (pool, sessions, user_id) = setup().await;

    let issued = sessions
        .create_session(user_id, Duration::hours(1))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(sessions.resolve(&issued.token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unrepresentable_lifetime_is_an_error() {
    let (_pool, sessions, user_id) = setup().await;

    let result = sessions
        .create_session(user_id, Duration::weeks(1_000_000_000))
        .await;
    assert!(matches!(result, Err(StorageError::SessionLifetime)));
    assert_eq!(sessions.count_for_user(user_id).await.unwrap(), 0);
}
