use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DIST_DIR: &str = "../frontend/dist";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("FINANCE_SERVER_ADDR '{0}' is not a socket address")]
    InvalidAddr(String),
    #[error("FINANCE_ALLOWED_ORIGIN '{0}' is not a valid header value")]
    InvalidOrigin(String),
}

/// Runtime settings for the static host
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Directory holding the built frontend (`index.html` plus assets)
    pub dist_dir: PathBuf,
    /// Origin allowed to call the server during `trunk serve` development
    pub allowed_origin: HeaderValue,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys use the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let addr_text = value("FINANCE_SERVER_ADDR", DEFAULT_ADDR);
        let addr = addr_text
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr_text.clone()))?;

        let origin_text = value("FINANCE_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN);
        let allowed_origin = HeaderValue::from_str(&origin_text)
            .map_err(|_| ConfigError::InvalidOrigin(origin_text.clone()))?;

        Ok(Self {
            addr,
            dist_dir: PathBuf::from(value("FINANCE_DIST_DIR", DEFAULT_DIST_DIR)),
            allowed_origin,
        })
    }
}
