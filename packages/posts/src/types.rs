// ABOUTME: Post type definitions
// ABOUTME: Stored posts and the editable fields submitted by the admin

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    /// Display date stamped at creation, e.g. "October 15, 2026"
    pub date: String,
    /// HTML produced by the rich-text editor
    pub body: String,
    #[serde(rename = "imgUrl")]
    pub img_url: String,
    #[serde(rename = "authorId")]
    pub author_id: Option<i64>,
    #[serde(rename = "authorName")]
    pub author_name: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Fields of the post form; used for both create and edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    #[serde(rename = "imgUrl")]
    pub img_url: String,
}
