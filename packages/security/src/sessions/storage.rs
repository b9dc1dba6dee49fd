// ABOUTME: Storage operations for login sessions
// ABOUTME: Token generation, hashing, resolution, revocation, and expiry cleanup

use base64::Engine;
use chrono::{Duration, Utc};
use quill_storage::StorageError;
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::types::{Session, SessionToken};

pub struct SessionStorage {
    pool: SqlitePool,
}

impl SessionStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Generate a cryptographically secure random token
    /// Returns a URL-safe base64-encoded 32-byte token
    pub fn generate_token() -> String {
        let mut rng = rand::thread_rng();
        let random_bytes: [u8; 32] = rng.gen();
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
    }

    /// Hash a token using SHA-256
    pub fn hash_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    /// Verify a token against a stored hash using constant-time comparison
    pub fn verify_token_hash(token: &str, stored_hash: &str) -> bool {
        use subtle::ConstantTimeEq;

        Self::hash_token(token)
            .as_bytes()
            .ct_eq(stored_hash.as_bytes())
            .into()
    }

    /// Open a session for a user that lives for `ttl`
    pub async fn create_session(
        &self,
        user_id: i64,
        ttl: Duration,
    ) -> Result<SessionToken, StorageError> {
        let id = Uuid::new_v4().to_string();
        let token = Self::generate_token();
        let token_hash = Self::hash_token(&token);
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(StorageError::SessionLifetime)?;

        debug!("Opening session {} for user {}", id, user_id);

        sqlx::query(
            "INSERT INTO sessions (id, token_hash, user_id, created_at, expires_at, last_seen_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&token_hash)
        .bind(user_id)
        .bind(now)
        .bind(expires_at)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(SessionToken {
            token,
            session: Session {
                id,
                user_id,
                created_at: now,
                expires_at,
                last_seen_at: now,
            },
        })
    }

    /// Look up the live session for a token and mark it as seen.
    /// Expired or unknown tokens resolve to `None`.
    pub async fn resolve(&self, token: &str) -> Result<Option<Session>, StorageError> {
        let token_hash = Self::hash_token(token);

        let row = sqlx::query(
            "SELECT id, token_hash, user_id, created_at, expires_at, last_seen_at
             FROM sessions
             WHERE token_hash = ?",
        )
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stored_hash: String = row.try_get("token_hash")?;
        if !Self::verify_token_hash(token, &stored_hash) {
            return Ok(None);
        }

        let mut session = row_to_session(&row)?;
        let now = Utc::now();
        if session.is_expired_at(now) {
            debug!("Session {} has expired", session.id);
            return Ok(None);
        }

        sqlx::query("UPDATE sessions SET last_seen_at = ? WHERE id = ?")
            .bind(now)
            .bind(&session.id)
            .execute(&self.pool)
            .await?;
        session.last_seen_at = now;

        Ok(Some(session))
    }

    /// Revoke the session behind a token. Returns whether a session was removed.
    pub async fn revoke(&self, token: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(Self::hash_token(token))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Revoke every session of a user, optionally sparing one session id
    pub async fn revoke_all_for_user(
        &self,
        user_id: i64,
        keep_session_id: Option<&str>,
    ) -> Result<u64, StorageError> {
        let result = match keep_session_id {
            Some(keep) => {
                sqlx::query("DELETE FROM sessions WHERE user_id = ? AND id != ?")
                    .bind(user_id)
                    .bind(keep)
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM sessions WHERE user_id = ?")
                    .bind(user_id)
                    .execute(&self.pool)
                    .await?
            }
        };

        debug!(
            "Revoked {} session(s) for user {}",
            result.rows_affected(),
            user_id
        );
        Ok(result.rows_affected())
    }

    /// Delete sessions whose expiry has passed
    pub async fn purge_expired(&self) -> Result<u64, StorageError> {
        let result =
            sqlx::query("DELETE FROM sessions WHERE julianday(expires_at) <= julianday(?)")
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_for_user(&self, user_id: i64) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<Session, StorageError> {
    Ok(Session {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
        expires_at: row.try_get("expires_at")?,
        last_seen_at: row.try_get("last_seen_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_produces_unique_values() {
        let token1 = SessionStorage::generate_token();
        let token2 = SessionStorage::generate_token();

        assert_ne!(token1, token2);
        assert_eq!(token1.len(), 43); // Base64 of 32 bytes without padding
    }

    #[test]
    fn test_hash_token_is_deterministic() {
        let hash1 = SessionStorage::hash_token("test-token-123");
        let hash2 = SessionStorage::hash_token("test-token-123");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, SessionStorage::hash_token("test-token-124"));
    }

    #[test]
    fn test_verify_token_hash() {
        let hash = SessionStorage::hash_token("abc");
        assert!(SessionStorage::verify_token_hash("abc", &hash));
        assert!(!SessionStorage::verify_token_hash("abd", &hash));
    }
}
