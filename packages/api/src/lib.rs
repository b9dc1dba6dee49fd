// ABOUTME: HTTP API layer for Quill providing REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use axum::{
    routing::{get, post, put},
    Router,
};

pub mod account_handlers;
pub mod auth;
pub mod auth_handlers;
pub mod comments_handlers;
pub mod contact_handlers;
pub mod error;
pub mod extract;
pub mod health;
pub mod pagination;
pub mod posts_handlers;
pub mod response;
pub mod state;
pub mod users_handlers;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, SessionSettings};

/// Registration, login, logout (nested under /api/auth)
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/logout", post(auth_handlers::logout))
        .route("/me", get(auth_handlers::me))
}

/// Posts and the comments under them (nested under /api/posts)
pub fn create_posts_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(posts_handlers::list_posts).post(posts_handlers::create_post),
        )
        .route(
            "/{id}",
            get(posts_handlers::get_post)
                .put(posts_handlers::update_post)
                .delete(posts_handlers::delete_post),
        )
        .route(
            "/{id}/comments",
            get(comments_handlers::list_comments).post(comments_handlers::create_comment),
        )
}

/// Individual comments (nested under /api/comments)
pub fn create_comments_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(comments_handlers::get_comment)
            .put(comments_handlers::update_comment)
            .delete(comments_handlers::delete_comment),
    )
}

/// The caller's own account (nested under /api/account)
pub fn create_account_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(account_handlers::get_account).put(account_handlers::update_account),
    )
}

/// User administration (nested under /api/users)
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users_handlers::list_users))
        .route("/{id}/admin", put(users_handlers::set_admin))
}

/// Contact form (nested under /api/contact)
pub fn create_contact_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(contact_handlers::list_messages).post(contact_handlers::send_message),
    )
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route")
}

/// Assemble every API route and bind the shared state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/auth", create_auth_router())
        .nest("/api/posts", create_posts_router())
        .nest("/api/comments", create_comments_router())
        .nest("/api/account", create_account_router())
        .nest("/api/users", create_users_router())
        .nest("/api/contact", create_contact_router())
        .fallback(route_not_found)
        .with_state(state)
}
