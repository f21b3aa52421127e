//! API server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `OXCART_HOST` - Bind address (default: 127.0.0.1)
//! - `OXCART_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., production, staging)
    pub sentry_environment: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a set variable fails to
    /// parse. Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = match std::env::var("OXCART_HOST") {
            Ok(raw) => raw.parse().map_err(|err| {
                ConfigError::InvalidEnvVar("OXCART_HOST".to_owned(), format!("{err}: {raw}"))
            })?,
            Err(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match std::env::var("OXCART_PORT") {
            Ok(raw) => raw.parse().map_err(|err| {
                ConfigError::InvalidEnvVar("OXCART_PORT".to_owned(), format!("{err}: {raw}"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            sentry_environment: std::env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }

    /// Socket address to bind the listener to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = ApiConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            sentry_dsn: None,
            sentry_environment: None,
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }
}
