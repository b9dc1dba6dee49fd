// ABOUTME: HTTP server assembly and lifecycle
// ABOUTME: Wraps the API router in middleware, opens the database, and serves until shutdown

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    Router,
};
use quill_api::{create_router, AppState};
use quill_security::SessionStorage;
use quill_storage::init_pool;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::{Config, ConfigError};
use crate::middleware::{create_panic_handler, SecurityHeadersLayer};

/// Wrap the API router with every layer the server runs with
pub fn build_app(state: AppState, config: &Config) -> Result<Router, ConfigError> {
    let security_headers = if config.cookie_secure {
        SecurityHeadersLayer::new().with_hsts()
    } else {
        SecurityHeadersLayer::new()
    };

    let mut app = create_router(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(create_panic_handler())
        .layer(security_headers);

    if let Some(origin) = &config.cors_origin {
        let origin = origin
            .parse::<HeaderValue>()
            .map_err(|_| ConfigError::InvalidCorsOrigin(origin.clone()))?;

        // Credentials are allowed so the session cookie crosses origins
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true);
        app = app.layer(cors);
    }

    Ok(app.layer(TraceLayer::new_for_http()))
}

/// Open the database, clear expired sessions, and serve until Ctrl+C or SIGTERM
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Opening database at {}", config.database_path.display());
    let pool = init_pool(&config.database_path).await?;

    let purged = SessionStorage::new(pool.clone()).purge_expired().await?;
    if purged > 0 {
        info!("Removed {} expired session(s)", purged);
    }

    let state = AppState::new(pool.clone(), config.session_settings());
    let app = build_app(state, &config)?;

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Quill listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
