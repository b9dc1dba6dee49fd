// ABOUTME: Quill server runtime: configuration, logging, middleware, and startup
// ABOUTME: The `quill` binary in src/bin drives these pieces

pub mod config;
pub mod logging;
pub mod middleware;
pub mod server;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError};
pub use server::{build_app, run_server};
