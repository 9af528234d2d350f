//! Configuration module for the storage client

use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};
use std::path::PathBuf;

use crate::client::{ClientConfig, HssError};

/// Main application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub http: HttpSettings,
}

/// Storage service endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    /// Base endpoint for writes and deletes
    #[serde(default)]
    pub api_url: String,
    /// Application storage path, appended to both endpoints
    #[serde(default)]
    pub app_path: String,
    /// Read (CDN) endpoint; falls back to `api_url`
    pub read_url: Option<String>,
}

impl StorageSettings {
    /// Validate the endpoints and build a client configuration
    pub fn client_config(&self) -> Result<ClientConfig, HssError> {
        ClientConfig::new(&self.api_url, &self.app_path, self.read_url.as_deref())
    }
}

/// Outbound HTTP configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("hss-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with HSS_)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        Self::load_from(&config_dir)
    }

    /// Load configuration rooted at a specific directory
    pub fn load_from(config_dir: &std::path::Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // HSS_STORAGE__API_URL, HSS_HTTP__TIMEOUT_SECS, etc.
            .add_source(
                Environment::with_prefix("HSS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
            );

        builder.build()?.try_deserialize()
    }
}
