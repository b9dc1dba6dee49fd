// ABOUTME: Session authentication extractors for handlers
// ABOUTME: Reads the session cookie or bearer token and enforces login and admin gates

use axum::{
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
};
use quill_core::SESSION_COOKIE_NAME;
use quill_security::{Session, User};
use quill_storage::StorageError;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{AppState, SessionSettings};

/// An authenticated request: the user, their live session, and the raw token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session: Session,
    pub token: String,
}

/// Like `CurrentUser` but also requires the admin flag
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

/// Resolves to `None` for anonymous visitors instead of rejecting
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

/// Pull the session token from `Authorization: Bearer` or the session cookie
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(bearer) = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        let bearer = bearer.trim();
        if !bearer.is_empty() {
            return Some(bearer.to_string());
        }
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value that stores a freshly issued session token
pub fn session_cookie(token: &str, settings: &SessionSettings) -> Result<HeaderValue, ApiError> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE_NAME,
        token,
        settings.ttl.num_seconds()
    );
    if settings.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(ApiError::internal)
}

/// `Set-Cookie` value that removes the session cookie from the browser
pub fn clear_session_cookie(settings: &SessionSettings) -> Result<HeaderValue, ApiError> {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE_NAME
    );
    if settings.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(ApiError::internal)
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<Option<CurrentUser>, ApiError> {
    let Some(token) = session_token(&parts.headers) else {
        return Ok(None);
    };

    let Some(session) = state.sessions.resolve(&token).await? else {
        debug!("Session token did not resolve to a live session");
        return Ok(None);
    };

    match state.users.get_user(session.user_id).await {
        Ok(user) => Ok(Some(CurrentUser {
            user,
            session,
            token,
        })),
        Err(StorageError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(authenticate(parts, state).await?))
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
            .await?
            .ok_or_else(ApiError::login_required)
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let current = CurrentUser::from_request_parts(parts, state).await?;
        if !current.user.is_admin {
            return Err(ApiError::forbidden("Admin access required"));
        }
        Ok(AdminUser(current))
    }
}
