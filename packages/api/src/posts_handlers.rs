// ABOUTME: HTTP request handlers for blog posts
// ABOUTME: Public listing and reading; creating, editing, and deleting require an admin

use axum::{
    extract::State,
    response::Response,
};
use quill_comments::Comment;
use quill_posts::{Post, PostInput};
use serde::Serialize;
use tracing::info;

use super::auth::AdminUser;
use super::error::ApiResult;
use super::extract::{Json, Path, Query};
use super::pagination::{PaginatedResponse, PaginationParams};
use super::response::{created, message, ok};
use super::state::AppState;

/// A post together with the first page of its comments
#[derive(Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub comments: PaginatedResponse<Comment>,
}

/// List posts, newest first
pub async fn list_posts(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> ApiResult<Response> {
    info!("Listing posts (page: {})", pagination.page());

    let (posts, total) = state
        .posts
        .list_posts_paginated(Some(pagination.limit()), Some(pagination.offset()))
        .await?;

    Ok(ok(PaginatedResponse::new(posts, &pagination, total)))
}

/// Show one post with its comments
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Getting post: {}", post_id);

    let post = state.posts.get_post(post_id).await?;

    let pagination = PaginationParams::default();
    let (comments, total) = state
        .comments
        .list_for_post(post_id, Some(pagination.limit()), Some(pagination.offset()))
        .await?;

    Ok(ok(PostDetail {
        post,
        comments: PaginatedResponse::new(comments, &pagination, total),
    }))
}

pub async fn create_post(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<PostInput>,
) -> ApiResult<Response> {
    info!("Creating post '{}' as user {}", input.title, admin.user.id);

    let post = state.posts.create_post(admin.user.id, input).await?;
    Ok(created(post))
}

/// Replace a post's content; the editing admin becomes its author
pub async fn update_post(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(post_id): Path<i64>,
    Json(input): Json<PostInput>,
) -> ApiResult<Response> {
    info!("Updating post {} as user {}", post_id, admin.user.id);

    let post = state.posts.update_post(post_id, admin.user.id, input).await?;
    Ok(ok(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(post_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Deleting post {} as user {}", post_id, admin.user.id);

    state.posts.delete_post(post_id).await?;
    Ok(message("Post deleted"))
}
