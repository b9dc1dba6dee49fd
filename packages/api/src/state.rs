// ABOUTME: Shared application state handed to every handler
// ABOUTME: Holds the database pool, the storage layers, and session settings

use std::sync::Arc;

use chrono::Duration;
use quill_comments::CommentStorage;
use quill_contact::ContactStorage;
use quill_posts::PostStorage;
use quill_security::{SessionStorage, UserStorage};
use sqlx::SqlitePool;

/// Default session lifetime: two weeks
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 336;

/// How session cookies are issued
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub ttl: Duration,
    /// Adds the `Secure` attribute; enable when served over HTTPS
    pub cookie_secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            cookie_secure: false,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub users: Arc<UserStorage>,
    pub sessions: Arc<SessionStorage>,
    pub posts: Arc<PostStorage>,
    pub comments: Arc<CommentStorage>,
    pub contact: Arc<ContactStorage>,
    pub session_settings: SessionSettings,
}

impl AppState {
    pub fn new(pool: SqlitePool, session_settings: SessionSettings) -> Self {
        Self {
            users: Arc::new(UserStorage::new(pool.clone())),
            sessions: Arc::new(SessionStorage::new(pool.clone())),
            posts: Arc::new(PostStorage::new(pool.clone())),
            comments: Arc::new(CommentStorage::new(pool.clone())),
            contact: Arc::new(ContactStorage::new(pool.clone())),
            pool,
            session_settings,
        }
    }
}
