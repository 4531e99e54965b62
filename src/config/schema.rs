//! Configuration schema for the posts API checks.
//!
//! This module defines the configuration structure and validation logic for
//! every setting the client, the assertion layer and the suite read.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Public endpoint the checks target when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Main configuration structure.
///
/// Settings are read from a JSON document (keys in camelCase). Missing
/// settings fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiClientConfig {
    /// Base address every request path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Content type sent with every request.
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Content type every response is expected to carry.
    #[serde(default = "default_expected_content_type")]
    pub expected_content_type: String,

    /// Request timeout in milliseconds.
    ///
    /// Must be greater than 0. Defaults to 30000ms.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to automatically follow HTTP redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow when `follow_redirects` is set.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate TLS certificates.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Whether request and response lines are logged.
    #[serde(default = "default_log_exchanges")]
    pub log_exchanges: bool,

    /// Directory holding `filter_valid_posts.csv` and
    /// `filter_invalid_posts.csv`. The bundled fixtures are used when unset.
    #[serde(default)]
    pub fixtures_dir: Option<PathBuf>,

    /// Headers added to every request.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            content_type: default_content_type(),
            expected_content_type: default_expected_content_type(),
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            log_exchanges: default_log_exchanges(),
            fixtures_dir: None,
            default_headers: default_headers(),
        }
    }
}

impl ApiClientConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive message.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("baseUrl is not a valid URL: {}", e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!(
                "baseUrl must use http or https, got: {}",
                parsed.scheme()
            ));
        }

        if self.content_type.trim().is_empty() {
            return Err("contentType must not be empty".to_string());
        }

        if self.expected_content_type.trim().is_empty() {
            return Err("expectedContentType must not be empty".to_string());
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_content_type() -> String {
    "application/json".to_string()
}

fn default_expected_content_type() -> String {
    "application/json; charset=utf-8".to_string()
}

fn default_timeout() -> u64 {
    30000
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_log_exchanges() -> bool {
    true
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_string(),
        concat!("posts-api-check/", env!("CARGO_PKG_VERSION")).to_string(),
    );
    headers
}
