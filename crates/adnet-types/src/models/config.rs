//! Application-level configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// Full application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Key-value store settings
    #[serde(default)]
    pub store: StoreConfig,
    /// API keys per role
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.timeout_ms == 0 {
            return Err(ConfigError::ValidationError {
                field: "store.timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.store.backend == StoreBackend::Postgres
            && self.store.database_url.as_deref().is_none_or(str::is_empty)
        {
            return Err(ConfigError::ValidationError {
                field: "store.database_url".to_string(),
                message: "required when store.backend is postgres".to_string(),
            });
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Which key-value backend holds the priority records.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process maps, lost on restart
    #[default]
    Memory,
    /// PostgreSQL tables emulating a key-value store
    Postgres,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Memory => write!(f, "memory"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Key-value store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Connection string, required for the postgres backend
    #[serde(default)]
    pub database_url: Option<String>,
    /// Deadline for a single store call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { backend: StoreBackend::default(), database_url: None, timeout_ms: default_timeout_ms() }
    }
}

fn default_timeout_ms() -> u64 {
    2000
}

/// API keys granting the `dashboard` and `processing` roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// Keys allowed to read all raw records
    #[serde(default)]
    pub dashboard_keys: Vec<String>,
    /// Keys allowed to bulk-update records
    #[serde(default)]
    pub processing_keys: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.timeout_ms, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Postgres;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { ref field, .. }) if field == "store.database_url"
        ));

        config.store.database_url = Some("postgres://localhost/adnet".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.store.timeout_ms = 0;
        assert!(config.validate().is_err());
    }
}
