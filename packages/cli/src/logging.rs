// ABOUTME: Tracing subscriber setup for the quill binary
// ABOUTME: RUST_LOG wins; otherwise Quill and HTTP request logs at info

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "quill=info,tower_http=info";

pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("quill=debug,tower_http=debug")
        } else {
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    });

    // try_init: a second call (tests, embedding) must not panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
