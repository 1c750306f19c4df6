//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Prefix of environment variables overriding file settings,
/// e.g. `BOOKSTORE_ADMIN__API_BASE_URL`.
pub const ENV_PREFIX: &str = "BOOKSTORE_ADMIN";

/// Settings shared by every list view of the dashboard.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(default)]
pub struct AdminConfig {
    #[validate(url)]
    pub api_base_url: String,
    /// Bearer token sent with every request when present.
    pub api_token: Option<String>,
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
    #[validate(range(min = 1, max = 1000))]
    pub page_size: usize,
    #[validate(range(max = 10000))]
    pub search_debounce_ms: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            api_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl AdminConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Errors raised while assembling [`AdminConfig`].
#[cfg(feature = "cli")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Merges the optional YAML file at `path` with `BOOKSTORE_ADMIN__*`
/// environment variables (environment wins), then validates the result.
#[cfg(feature = "cli")]
pub fn load_config(path: Option<&str>) -> Result<AdminConfig, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path).required(true));
    }
    let settings = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let config: AdminConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
