use crate::config::Config;
use crate::server::build_app;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use quill_api::AppState;
use quill_storage::connect_in_memory;
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::ServiceExt;

fn config(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

async fn app(config: &Config) -> axum::Router {
    let pool = connect_in_memory().await.unwrap();
    build_app(AppState::new(pool, config.session_settings()), config).unwrap()
}

#[tokio::test]
async fn test_health_through_full_stack() {
    let app = app(&config(&[])).await;

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    assert!(response.headers().get("strict-transport-security").is_none());
}

#[tokio::test]
async fn test_secure_cookies_enable_hsts() {
    let config = config(&[("QUILL_COOKIE_SECURE", "true")]);
    let app = app(&config).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "ada@example.com", "name": "Ada", "password": "correct horse battery" })
                .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().get("strict-transport-security").is_some());
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.ends_with("; Secure"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = app(&config(&[("QUILL_MAX_BODY_BYTES", "64")])).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "ada@example.com", "name": "A".repeat(200), "password": "correct horse battery" })
                .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let app = app(&config(&[("QUILL_CORS_ORIGIN", "https://blog.example.com")])).await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/posts")
        .header(header::ORIGIN, "https://blog.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://blog.example.com"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_errors_keep_the_envelope() {
    let app = app(&config(&[])).await;

    let request = Request::builder()
        .uri("/api/posts/12345")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
