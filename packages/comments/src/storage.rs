// ABOUTME: Comment storage layer using SQLite
// ABOUTME: Lists comments per post with commenter details and handles edits and removal

use chrono::Utc;
use quill_core::{avatar_url, validate_comment_text};
use quill_storage::StorageError;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::Comment;

const SELECT_COMMENTS: &str = r#"
    SELECT c.id, c.text, c.author_id, c.post_id, c.created_at, c.updated_at,
           u.name AS author_name, u.email AS author_email
    FROM comments c
    LEFT JOIN users u ON u.id = c.author_id
"#;

pub struct CommentStorage {
    pool: SqlitePool,
}

impl CommentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_post_exists(&self, post_id: i64) -> Result<(), StorageError> {
        let post: Option<i64> = sqlx::query_scalar("SELECT id FROM posts WHERE id = ?")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;
        post.map(|_| ()).ok_or(StorageError::NotFound("Post"))
    }

    /// List comments on a post, oldest first. Returns the page and the total count.
    ///
    /// Fails with `NotFound` when the post itself does not exist.
    pub async fn list_for_post(
        &self,
        post_id: i64,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<(Vec<Comment>, i64), StorageError> {
        debug!(
            "Fetching comments for post {} (limit: {:?}, offset: {:?})",
            post_id, limit, offset
        );

        self.ensure_post_exists(post_id).await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "{} WHERE c.post_id = ? ORDER BY c.id ASC LIMIT ? OFFSET ?",
            SELECT_COMMENTS
        );
        let rows = sqlx::query(&query)
            .bind(post_id)
            .bind(limit.unwrap_or(-1))
            .bind(offset.unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;

        let comments = rows
            .iter()
            .map(row_to_comment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((comments, total))
    }

    pub async fn get_comment(&self, comment_id: i64) -> Result<Comment, StorageError> {
        debug!("Fetching comment: {}", comment_id);

        let query = format!("{} WHERE c.id = ?", SELECT_COMMENTS);
        let row = sqlx::query(&query)
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound("Comment"))?;

        row_to_comment(&row)
    }

    /// Add a comment to an existing post
    pub async fn create_comment(
        &self,
        post_id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<Comment, StorageError> {
        validate_comment_text(text)?;

        self.ensure_post_exists(post_id).await?;

        let now = Utc::now();
        debug!("Creating comment on post {} by user {}", post_id, author_id);

        let result = sqlx::query(
            r#"
            INSERT INTO comments (text, author_id, post_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(text.trim())
        .bind(author_id)
        .bind(post_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_comment(result.last_insert_rowid()).await
    }

    pub async fn update_comment(&self, comment_id: i64, text: &str) -> Result<Comment, StorageError> {
        validate_comment_text(text)?;

        debug!("Updating comment: {}", comment_id);

        let result = sqlx::query("UPDATE comments SET text = ?, updated_at = ? WHERE id = ?")
            .bind(text.trim())
            .bind(Utc::now())
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("Comment"));
        }

        self.get_comment(comment_id).await
    }

    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), StorageError> {
        debug!("Deleting comment: {}", comment_id);

        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("Comment"));
        }
        Ok(())
    }
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Result<Comment, StorageError> {
    let author_email: Option<String> = row.try_get("author_email")?;

    Ok(Comment {
        id: row.try_get("id")?,
        text: row.try_get("text")?,
        author_id: row.try_get("author_id")?,
        author_name: row.try_get("author_name")?,
        avatar_url: author_email.as_deref().map(avatar_url),
        post_id: row.try_get("post_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
