//! Endpoint configuration for the storage client

use url::Url;

use super::error::{HssError, HssResult};
use super::locator::Locator;

/// Validated, immutable endpoint configuration.
///
/// The strings are kept exactly as given: every target URL is built by plain
/// concatenation, so `app_path` must compose cleanly with both endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: String,
    read_url: String,
    app_path: String,
}

impl ClientConfig {
    /// Validate endpoints and build the configuration.
    ///
    /// `read_url` of `None` or `""` falls back to `api_url`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hss_client::ClientConfig;
    ///
    /// let config = ClientConfig::new("http://www.example.com", "/some/random/path", None).unwrap();
    /// assert_eq!(config.read_url(), config.api_url());
    /// ```
    pub fn new(api_url: &str, app_path: &str, read_url: Option<&str>) -> HssResult<Self> {
        validate_endpoint("API URL", api_url)?;

        let read_url = match read_url {
            Some(read) if !read.is_empty() => read,
            _ => api_url,
        };
        validate_endpoint("Read URL", read_url)?;

        Ok(ClientConfig {
            api_url: api_url.to_string(),
            read_url: read_url.to_string(),
            app_path: app_path.to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn read_url(&self) -> &str {
        &self.read_url
    }

    pub fn app_path(&self) -> &str {
        &self.app_path
    }

    /// POST target for uploads: `api_url + app_path`
    pub fn write_target(&self) -> String {
        format!("{}{}", self.api_url, self.app_path)
    }

    /// Public URL for a stored identifier: `read_url + app_path + "/" + id`
    pub fn stored_url(&self, identifier: &str) -> String {
        format!("{}{}/{}", self.read_url, self.app_path, identifier)
    }

    /// DELETE target: `api_url + locator path`. The locator's host is ignored.
    pub fn delete_target(&self, locator: &Locator) -> String {
        format!("{}{}", self.api_url, locator.path())
    }
}

fn validate_endpoint(name: &str, value: &str) -> HssResult<()> {
    if value.trim().is_empty() {
        return Err(HssError::Validation(format!("{} is required", name)));
    }

    let url = Url::parse(value)
        .map_err(|e| HssError::Validation(format!("{} is not a valid URL ({}): {}", name, value, e)))?;

    if !url.has_host() {
        return Err(HssError::Validation(format!("{} has no host: {}", name, value)));
    }

    Ok(())
}
