// ABOUTME: Liveness endpoint
// ABOUTME: Reports service version and whether the database answers

use axum::{extract::State, response::Response};
use chrono::Utc;
use serde_json::json;
use tracing::warn;

use super::response::ok;
use super::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => "ok",
        Err(e) => {
            warn!("Health check database probe failed: {}", e);
            "unavailable"
        }
    };

    ok(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "quill",
        "database": database,
    }))
}
