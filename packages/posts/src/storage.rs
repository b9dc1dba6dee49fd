// ABOUTME: Post storage layer using SQLite
// ABOUTME: Handles CRUD operations for posts, joined with the author's name

use chrono::Utc;
use quill_core::{format_post_date, validate_post_fields};
use quill_storage::{map_unique_violation, StorageError};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{Post, PostInput};

const SELECT_POSTS: &str = r#"
    SELECT p.id, p.title, p.subtitle, p.date, p.body, p.img_url, p.author_id,
           p.created_at, p.updated_at, u.name AS author_name
    FROM posts p
    LEFT JOIN users u ON u.id = p.author_id
"#;

fn duplicate_title(title: &str) -> String {
    format!("A post titled '{}' already exists", title.trim())
}

pub struct PostStorage {
    pool: SqlitePool,
}

impl PostStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List posts with pagination, newest first. Returns the page and the total count.
    pub async fn list_posts_paginated(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<(Vec<Post>, i64), StorageError> {
        debug!("Fetching posts (limit: {:?}, offset: {:?})", limit, offset);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        // LIMIT -1 means "no limit" in SQLite
        let query = format!("{} ORDER BY p.id DESC LIMIT ? OFFSET ?", SELECT_POSTS);
        let rows = sqlx::query(&query)
            .bind(limit.unwrap_or(-1))
            .bind(offset.unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;

        let posts = rows
            .iter()
            .map(row_to_post)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((posts, total))
    }

    /// Get a single post by ID
    pub async fn get_post(&self, post_id: i64) -> Result<Post, StorageError> {
        debug!("Fetching post: {}", post_id);

        let query = format!("{} WHERE p.id = ?", SELECT_POSTS);
        let row = sqlx::query(&query)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound("Post"))?;

        row_to_post(&row)
    }

    /// Create a new post authored by `author_id`, stamped with today's date
    pub async fn create_post(&self, author_id: i64, input: PostInput) -> Result<Post, StorageError> {
        validate_post_fields(&input.title, &input.subtitle, &input.img_url, &input.body)?;

        let now = Utc::now();
        debug!("Creating post '{}' by user {}", input.title, author_id);

        let result = sqlx::query(
            r#"
            INSERT INTO posts (title, subtitle, date, body, img_url, author_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.title.trim())
        .bind(input.subtitle.trim())
        .bind(format_post_date(now))
        .bind(&input.body)
        .bind(input.img_url.trim())
        .bind(author_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, duplicate_title(&input.title)))?;

        self.get_post(result.last_insert_rowid()).await
    }

    /// Replace a post's content. The editor becomes the post's author.
    pub async fn update_post(
        &self,
        post_id: i64,
        editor_id: i64,
        input: PostInput,
    ) -> Result<Post, StorageError> {
        validate_post_fields(&input.title, &input.subtitle, &input.img_url, &input.body)?;

        debug!("Updating post: {}", post_id);

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = ?, subtitle = ?, body = ?, img_url = ?, author_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.title.trim())
        .bind(input.subtitle.trim())
        .bind(&input.body)
        .bind(input.img_url.trim())
        .bind(editor_id)
        .bind(Utc::now())
        .bind(post_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, duplicate_title(&input.title)))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("Post"));
        }

        self.get_post(post_id).await
    }

    /// Delete a post; its comments go with it
    pub async fn delete_post(&self, post_id: i64) -> Result<(), StorageError> {
        debug!("Deleting post: {}", post_id);

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("Post"));
        }
        Ok(())
    }
}

fn row_to_post(row: &sqlx::sqlite::SqliteRow) -> Result<Post, StorageError> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        subtitle: row.try_get("subtitle")?,
        date: row.try_get("date")?,
        body: row.try_get("body")?,
        img_url: row.try_get("img_url")?,
        author_id: row.try_get("author_id")?,
        author_name: row.try_get("author_name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
