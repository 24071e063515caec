//! Configuration loading: defaults, then a JSON file, then environment overrides.

use adnet_types::{AppConfig, ConfigError};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "adnet";
const CONFIG_FILE: &str = "config.json";

pub const ENV_PORT: &str = "ADNET_PORT";
pub const ENV_DATABASE_URL: &str = "ADNET_DATABASE_URL";
pub const ENV_DASHBOARD_KEY: &str = "ADNET_DASHBOARD_KEY";
pub const ENV_PROCESSING_KEY: &str = "ADNET_PROCESSING_KEY";

/// `<config_dir>/adnet/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the effective configuration.
///
/// An explicit `path` must exist; the default location is optional.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config_file(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(default_path) => load_config_file(&default_path)?,
            None => AppConfig::default(),
        },
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    config.validate()?;
    Ok(config)
}

/// Parse a JSON config file. Missing fields take their defaults.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.display().to_string() });
    }
    let content = fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(&e))?;
    let config = serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Apply `ADNET_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(ENV_PORT) {
        config.server.port = port.trim().parse().map_err(|_| ConfigError::ValidationError {
            field: ENV_PORT.to_string(),
            message: format!("not a valid port: {port}"),
        })?;
    }
    if let Some(url) = lookup(ENV_DATABASE_URL).filter(|u| !u.is_empty()) {
        config.store.database_url = Some(url);
        config.store.backend = adnet_types::StoreBackend::Postgres;
    }
    if let Some(key) = lookup(ENV_DASHBOARD_KEY).filter(|k| !k.is_empty()) {
        config.auth.dashboard_keys.push(key);
    }
    if let Some(key) = lookup(ENV_PROCESSING_KEY).filter(|k| !k.is_empty()) {
        config.auth.processing_keys.push(key);
    }
    Ok(())
}
