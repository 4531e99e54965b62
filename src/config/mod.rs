//! Configuration management for the posts API checks.
//!
//! Configuration is read from an optional JSON file, then from environment
//! variables, and kept in a process-wide holder so the suite and the binary
//! see the same settings.

pub mod schema;

pub use schema::{ApiClientConfig, DEFAULT_BASE_URL};

use once_cell::sync::Lazy;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Key the settings may be nested under inside a larger settings document.
pub const SETTINGS_KEY: &str = "posts-api";

/// Environment variable overriding the base address.
pub const ENV_BASE_URL: &str = "POSTS_API_BASE_URL";

/// Environment variable overriding the request timeout (milliseconds).
pub const ENV_TIMEOUT_MS: &str = "POSTS_API_TIMEOUT_MS";

/// Environment variable overriding the fixture directory.
pub const ENV_FIXTURES_DIR: &str = "POSTS_API_FIXTURES_DIR";

/// Global configuration instance.
static CONFIG: Lazy<RwLock<ApiClientConfig>> =
    Lazy::new(|| RwLock::new(ApiClientConfig::default()));

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid environment override {name}={value}")]
    InvalidOverride { name: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Loads configuration from a JSON value.
///
/// The settings may sit at the top level or be nested under the
/// `"posts-api"` key. Fields that are missing keep their defaults. The
/// validated result replaces the global configuration.
///
/// # Example
///
/// ```
/// use posts_api_check::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "posts-api": {
///         "baseUrl": "http://localhost:3000",
///         "timeout": 5000
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, 5000);
/// # posts_api_check::config::reset_config();
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ApiClientConfig, ConfigError> {
    let config = match settings_json {
        Some(settings) => {
            let section = settings.get(SETTINGS_KEY).cloned().unwrap_or(settings);
            serde_json::from_value::<ApiClientConfig>(section)?
        }
        None => ApiClientConfig::default(),
    };

    install(config)
}

/// Loads configuration from a JSON file.
pub fn load_config_file(path: &Path) -> Result<ApiClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content)?;
    log::debug!("Loaded configuration from {}", path.display());
    load_config(Some(value))
}

/// Applies `POSTS_API_*` environment overrides to the global configuration.
pub fn apply_env_overrides() -> Result<ApiClientConfig, ConfigError> {
    let mut config = get_config();
    apply_overrides(&mut config, |name| std::env::var(name).ok())?;
    install(config)
}

/// Applies overrides read through `lookup` onto `config`.
fn apply_overrides<F>(config: &mut ApiClientConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.base_url = base_url;
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        config.timeout = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidOverride {
                name: ENV_TIMEOUT_MS,
                value: raw.clone(),
            })?;
    }

    if let Some(dir) = lookup(ENV_FIXTURES_DIR) {
        config.fixtures_dir = Some(PathBuf::from(dir));
    }

    Ok(())
}

fn install(config: ApiClientConfig) -> Result<ApiClientConfig, ConfigError> {
    config.validate().map_err(ConfigError::Invalid)?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets a clone of the current global configuration.
pub fn get_config() -> ApiClientConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| ApiClientConfig::default())
}

/// Updates the global configuration in place.
///
/// An update that leaves the configuration invalid is discarded and the
/// previous configuration is kept.
pub fn update_config<F>(updater: F) -> Result<(), ConfigError>
where
    F: FnOnce(&mut ApiClientConfig),
{
    let mut candidate = get_config();
    updater(&mut candidate);
    install(candidate).map(|_| ())
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = ApiClientConfig::default();
    }
}
