// ABOUTME: HTTP request handlers for user administration
// ABOUTME: Admins list accounts and grant or revoke the admin flag

use axum::{
    extract::State,
    response::Response,
};
use quill_security::UserProfile;
use serde::Deserialize;
use tracing::info;

use super::auth::AdminUser;
use super::error::{ApiError, ApiResult};
use super::extract::{Json, Path};
use super::response::ok;
use super::state::AppState;

#[derive(Deserialize)]
pub struct SetAdminRequest {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Response> {
    info!("Listing users");

    let users: Vec<UserProfile> = state
        .users
        .list_users()
        .await?
        .into_iter()
        .map(UserProfile::from)
        .collect();
    Ok(ok(users))
}

/// Grant or revoke admin access. Admins cannot demote themselves.
pub async fn set_admin(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i64>,
    Json(request): Json<SetAdminRequest>,
) -> ApiResult<Response> {
    if user_id == admin.user.id && !request.is_admin {
        return Err(ApiError::forbidden(
            "You cannot revoke your own admin access",
        ));
    }

    let user = state.users.set_admin(user_id, request.is_admin).await?;
    info!(
        target_user = user.id,
        is_admin = user.is_admin,
        changed_by = admin.user.id,
        audit = true,
        "Admin flag updated"
    );

    Ok(ok(UserProfile::from(user)))
}
