//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "/data/flights.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Error reading server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?} in SKYPATH_BIND")]
    InvalidBind { value: String },
}

/// Process-level settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Dataset file loaded at startup (`FLIGHTS_DATA_PATH`)
    pub data_path: PathBuf,

    /// Listen address (`SKYPATH_BIND`)
    pub bind: SocketAddr,

    /// Allowed browser origins (`SKYPATH_CORS_ORIGINS`, comma-separated)
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_raw = get("SKYPATH_BIND", DEFAULT_BIND);
        let bind = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBind { value: bind_raw })?;

        let cors_origins = get("SKYPATH_CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            data_path: PathBuf::from(get("FLIGHTS_DATA_PATH", DEFAULT_DATA_PATH)),
            bind,
            cors_origins,
        })
    }
}
