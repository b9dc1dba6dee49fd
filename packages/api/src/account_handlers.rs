// ABOUTME: HTTP request handlers for the logged-in user's own account
// ABOUTME: Viewing the profile and changing name or password

use axum::{extract::State, response::Response};
use quill_security::{AccountUpdateInput, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::auth::CurrentUser;
use super::error::ApiResult;
use super::extract::Json;
use super::response::ok;
use super::state::AppState;

#[derive(Deserialize)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct AccountUpdated {
    pub user: UserProfile,
    /// Other sessions logged out because the password changed
    #[serde(rename = "revokedSessions")]
    pub revoked_sessions: u64,
}

pub async fn get_account(current: CurrentUser) -> ApiResult<Response> {
    Ok(ok(UserProfile::from(current.user)))
}

/// Change name and/or password. A new password logs out every other session.
pub async fn update_account(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<UpdateAccountRequest>,
) -> ApiResult<Response> {
    info!("Updating account for user {}", current.user.id);

    let password_changed = request.password.is_some();
    let user = state
        .users
        .update_account(
            current.user.id,
            AccountUpdateInput {
                name: request.name,
                password: request.password,
            },
        )
        .await?;

    let revoked_sessions = if password_changed {
        let revoked = state
            .sessions
            .revoke_all_for_user(user.id, Some(&current.session.id))
            .await?;
        info!(
            user_id = user.id,
            revoked = revoked,
            audit = true,
            "Password changed, other sessions revoked"
        );
        revoked
    } else {
        0
    };

    Ok(ok(AccountUpdated {
        user: user.into(),
        revoked_sessions,
    }))
}
