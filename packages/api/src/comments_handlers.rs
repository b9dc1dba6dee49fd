// ABOUTME: HTTP request handlers for comments
// ABOUTME: Anyone can read; logged-in users comment, edit their own, and delete their own

use axum::{
    extract::State,
    response::Response,
};
use quill_comments::CommentInput;
use tracing::info;

use super::auth::{CurrentUser, MaybeUser};
use super::error::{ApiError, ApiResult};
use super::extract::{Json, Path, Query};
use super::pagination::{PaginatedResponse, PaginationParams};
use super::response::{created, message, ok};
use super::state::AppState;

const LOGIN_TO_COMMENT: &str = "You need to login or register to comment.";

/// List comments on a post, oldest first
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Query(pagination): Query<PaginationParams>,
) -> ApiResult<Response> {
    info!(
        "Listing comments for post: {} (page: {})",
        post_id,
        pagination.page()
    );

    let (comments, total) = state
        .comments
        .list_for_post(post_id, Some(pagination.limit()), Some(pagination.offset()))
        .await?;

    Ok(ok(PaginatedResponse::new(comments, &pagination, total)))
}

/// Add a comment to a post. Anonymous visitors are told to log in.
pub async fn create_comment(
    State(state): State<AppState>,
    MaybeUser(current): MaybeUser,
    Path(post_id): Path<i64>,
    Json(input): Json<CommentInput>,
) -> ApiResult<Response> {
    let current = current.ok_or_else(|| ApiError::unauthorized(LOGIN_TO_COMMENT))?;

    info!("User {} commenting on post {}", current.user.id, post_id);

    let comment = state
        .comments
        .create_comment(post_id, current.user.id, &input.text)
        .await?;
    Ok(created(comment))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Getting comment: {}", comment_id);

    let comment = state.comments.get_comment(comment_id).await?;
    Ok(ok(comment))
}

/// Edit a comment; only its author may do so
pub async fn update_comment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(comment_id): Path<i64>,
    Json(input): Json<CommentInput>,
) -> ApiResult<Response> {
    let existing = state.comments.get_comment(comment_id).await?;
    if existing.author_id != Some(current.user.id) {
        return Err(ApiError::forbidden("You can only edit your own comments"));
    }

    info!("User {} editing comment {}", current.user.id, comment_id);

    let comment = state
        .comments
        .update_comment(comment_id, &input.text)
        .await?;
    Ok(ok(comment))
}

/// Delete a comment; its author or any admin may do so
pub async fn delete_comment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(comment_id): Path<i64>,
) -> ApiResult<Response> {
    let existing = state.comments.get_comment(comment_id).await?;
    if existing.author_id != Some(current.user.id) && !current.user.is_admin {
        return Err(ApiError::forbidden("You can only delete your own comments"));
    }

    info!("User {} deleting comment {}", current.user.id, comment_id);

    state.comments.delete_comment(comment_id).await?;
    Ok(message("Comment deleted"))
}
