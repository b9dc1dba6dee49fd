// ABOUTME: Comment type definitions
// ABOUTME: Stored comments enriched with the commenter's name and avatar

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    #[serde(rename = "authorId")]
    pub author_id: Option<i64>,
    #[serde(rename = "authorName")]
    pub author_name: Option<String>,
    /// Gravatar URL derived from the commenter's email
    #[serde(rename = "avatarUrl")]
    pub avatar_url: Option<String>,
    #[serde(rename = "postId")]
    pub post_id: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInput {
    pub text: String,
}
