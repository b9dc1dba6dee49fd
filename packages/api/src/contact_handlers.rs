// ABOUTME: HTTP request handlers for the contact form
// ABOUTME: Logged-in users send messages; admins read them

use axum::{
    extract::State,
    response::Response,
};
use quill_contact::ContactInput;
use tracing::info;

use super::auth::{AdminUser, CurrentUser};
use super::error::ApiResult;
use super::extract::{Json, Query};
use super::pagination::{PaginatedResponse, PaginationParams};
use super::response::{created, ok};
use super::state::AppState;

pub async fn send_message(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(input): Json<ContactInput>,
) -> ApiResult<Response> {
    info!("Contact message from user {}", current.user.id);

    let stored = state.contact.create_message(current.user.id, input).await?;
    Ok(created(stored))
}

pub async fn list_messages(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(pagination): Query<PaginationParams>,
) -> ApiResult<Response> {
    info!("Listing contact messages (page: {})", pagination.page());

    let (messages, total) = state
        .contact
        .list_messages(Some(pagination.limit()), Some(pagination.offset()))
        .await?;

    Ok(ok(PaginatedResponse::new(messages, &pagination, total)))
}
