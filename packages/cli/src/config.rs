// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Validates host, port, database path, session, CORS, and body limit settings

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;

use chrono::Duration;
use quill_api::state::{SessionSettings, DEFAULT_SESSION_TTL_HOURS};
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
/// Ten years
pub const MAX_SESSION_TTL_HOURS: i64 = 87_600;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid session lifetime '{0}': expected 1 to 87600 hours")]
    InvalidSessionTtl(String),
    #[error("Invalid boolean for {name}: {value}")]
    InvalidBool { name: &'static str, value: String },
    #[error("Invalid body size limit: {0}")]
    InvalidBodyLimit(String),
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
    pub cors_origin: Option<String>,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source; `from_env` uses the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host_str = lookup("QUILL_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host_str
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_str.clone()))?;

        let port = match lookup("QUILL_PORT").or_else(|| lookup("PORT")) {
            Some(value) => value.trim().parse::<u16>()?,
            None => DEFAULT_PORT,
        };
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let database_path = lookup("QUILL_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(quill_core::default_database_path);

        let session_ttl_hours = match lookup("QUILL_SESSION_TTL_HOURS") {
            Some(value) => match value.trim().parse::<i64>() {
                Ok(hours) if (1..=MAX_SESSION_TTL_HOURS).contains(&hours) => hours,
                _ => return Err(ConfigError::InvalidSessionTtl(value)),
            },
            None => DEFAULT_SESSION_TTL_HOURS,
        };

        let cookie_secure = match lookup("QUILL_COOKIE_SECURE") {
            Some(value) => parse_bool("QUILL_COOKIE_SECURE", &value)?,
            None => false,
        };

        let cors_origin = match lookup("QUILL_CORS_ORIGIN") {
            Some(origin) if !origin.trim().is_empty() => {
                let origin = origin.trim().to_string();
                if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                    return Err(ConfigError::InvalidCorsOrigin(origin));
                }
                Some(origin)
            }
            _ => None,
        };

        let max_body_bytes = match lookup("QUILL_MAX_BODY_BYTES") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(bytes) if bytes > 0 => bytes,
                _ => return Err(ConfigError::InvalidBodyLimit(value)),
            },
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Config {
            host,
            port,
            database_path,
            session_ttl_hours,
            cookie_secure,
            cors_origin,
            max_body_bytes,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            ttl: Duration::hours(self.session_ttl_hours),
            cookie_secure: self.cookie_secure,
        }
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: value.to_string(),
        }),
    }
}
