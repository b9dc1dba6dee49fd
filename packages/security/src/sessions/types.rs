// ABOUTME: Session type definitions
// ABOUTME: Stored session records and the one-time plaintext token handed to the client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session stored in database (token kept only as a hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Result of opening a session.
/// This is the ONLY time the plaintext token is available.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub session: Session,
}
