// ABOUTME: HTTP request handlers for registration, login, and logout
// ABOUTME: Issues and revokes server-side sessions and the matching cookie

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use quill_security::{User, UserCreateInput, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::auth::{clear_session_cookie, session_cookie, CurrentUser, MaybeUser};
use super::error::ApiResult;
use super::extract::Json;
use super::response::{ok, ApiResponse};
use super::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned after a successful login or registration
#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    /// Same value as the session cookie, for clients using `Authorization: Bearer`
    pub token: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

async fn start_session(
    state: &AppState,
    user: User,
    status: StatusCode,
) -> ApiResult<Response> {
    let issued = state
        .sessions
        .create_session(user.id, state.session_settings.ttl)
        .await?;
    let cookie = session_cookie(&issued.token, &state.session_settings)?;

    let body = AuthResponse {
        user: user.into(),
        token: issued.token,
        expires_at: issued.session.expires_at,
    };

    Ok((status, [(SET_COOKIE, cookie)], axum::Json(ApiResponse::success(body))).into_response())
}

/// Create an account and log it in. A taken email is a 409.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Response> {
    info!("Registering new user");

    let user = state
        .users
        .create_user(UserCreateInput {
            email: request.email,
            name: request.name,
            password: request.password,
        })
        .await?;

    if user.is_admin {
        info!(user_id = user.id, audit = true, "First account registered as admin");
    }

    start_session(&state, user, StatusCode::CREATED).await
}

/// Verify credentials and open a session
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Response> {
    let user = match state
        .users
        .verify_credentials(&request.email, &request.password)
        .await
    {
        Ok(user) => user,
        Err(failure) => {
            warn!(
                email = %quill_core::normalize_email(&request.email),
                reason = %failure,
                audit = true,
                "Login failed"
            );
            return Err(failure.into());
        }
    };

    info!(user_id = user.id, "User logged in");
    start_session(&state, user, StatusCode::OK).await
}

/// Revoke the current session, if any, and clear the cookie
pub async fn logout(
    State(state): State<AppState>,
    MaybeUser(current): MaybeUser,
) -> ApiResult<Response> {
    if let Some(current) = current {
        state.sessions.revoke(&current.token).await?;
        info!(user_id = current.user.id, "User logged out");
    }

    let cookie = clear_session_cookie(&state.session_settings)?;
    let body = ApiResponse::success(serde_json::json!({ "message": "Logged out" }));
    Ok(([(SET_COOKIE, cookie)], axum::Json(body)).into_response())
}

/// The logged-in user's profile
pub async fn me(current: CurrentUser) -> impl IntoResponse {
    ok(UserProfile::from(current.user))
}
