//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;

use tokio::net::lookup_host;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind
    pub http_host: String,

    /// HTTP port
    pub http_port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Pool size
    pub db_max_connections: u32,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    pub log_format: LogFormat,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_host: lookup("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            http_port: lookup("HTTP_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| "./bikeshop.db".to_string()),

            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            log_format: match lookup("LOG_FORMAT").as_deref() {
                None | Some("") | Some("text") => LogFormat::Text,
                Some("json") => LogFormat::Json,
                Some(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
            },
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_PATH".to_string()));
        }

        Ok(config)
    }

    /// Socket address the server listens on.
    ///
    /// `HTTP_HOST` may be an IP literal or a host name such as `localhost`;
    /// names resolve to their first address.
    pub async fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = || ConfigError::InvalidValue("HTTP_HOST".to_string());

        let mut addrs = lookup_host((self.http_host.as_str(), self.http_port))
            .await
            .map_err(|_| invalid())?;
        addrs.next().ok_or_else(invalid)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[tokio::test]
    async fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.database_path, "./bikeshop.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.bind_addr().await.unwrap().to_string(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_overrides() {
        let config = load(&[
            ("HTTP_HOST", "127.0.0.1"),
            ("HTTP_PORT", "9000"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr().await.unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[tokio::test]
    async fn test_host_name_resolves() {
        let config = load(&[("HTTP_HOST", "localhost"), ("HTTP_PORT", "9001")]).unwrap();
        let addr = config.bind_addr().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 9001);
    }

    #[tokio::test]
    async fn test_invalid_values() {
        assert!(matches!(
            load(&[("HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "HTTP_PORT"
        ));
        assert!(load(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
        assert!(load(&[("HTTP_HOST", "not a host")])
            .unwrap()
            .bind_addr()
            .await
            .is_err());
    }
}
