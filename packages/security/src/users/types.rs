// ABOUTME: User type definitions
// ABOUTME: Stored account records and the profile shape exposed over HTTP

use chrono::{DateTime, Utc};
use quill_storage::StorageError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User record as stored, including the password hash
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreateInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdateInput {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Public view of a user with the password hash stripped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            avatar_url: quill_core::avatar_url(&user.email),
            id: user.id,
            email: user.email,
            name: user.name,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// Why a login attempt was rejected
#[derive(Error, Debug)]
pub enum LoginFailure {
    #[error("That email does not exist, please try again.")]
    UnknownEmail,
    #[error("Password incorrect, please try again.")]
    WrongPassword,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
